use std::fmt;

use crate::error::{Error, Result};

/// Cities that can be selected by name. OpenWeather wants its own numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Madrid,
    MexicoCity,
    NewYork,
    Toronto,
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Madrid => "Madrid",
            City::MexicoCity => "MexicoCity",
            City::NewYork => "NewYork",
            City::Toronto => "Toronto",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            City::Madrid => "3117735",
            City::MexicoCity => "3530597",
            City::NewYork => "5128581",
            City::Toronto => "6167865",
        }
    }

    pub const fn all() -> &'static [City] {
        &[City::Madrid, City::MexicoCity, City::NewYork, City::Toronto]
    }

    pub fn known_names() -> String {
        City::all()
            .iter()
            .map(City::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The OpenWeather city id a run reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityId(String);

impl CityId {
    /// Resolves a city name from the catalogue (case-insensitive) or a literal
    /// numeric id. The remote API is the only judge of whether an id exists.
    pub fn resolve(value: &str) -> Result<Self> {
        let value = value.trim();

        if let Some(city) = City::all()
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
        {
            return Ok(CityId(city.id().to_string()));
        }

        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(CityId(value.to_string()));
        }

        Err(Error::UnknownCity(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
