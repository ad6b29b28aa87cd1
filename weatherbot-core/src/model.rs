//! Schema records for the OpenWeather 2.5 API.
//!
//! Fields the API leaves out decode to zero values; a field that is present
//! with the wrong type fails the whole decode, and the error carries its path.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

/// Decodes a JSON body, recording the path of the first field that failed.
pub fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(body);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|e| Error::Decode {
        endpoint,
        path: e.path().to_string(),
        source: e.into_inner(),
    })?;
    de.end().map_err(|source| Error::Decode {
        endpoint,
        path: ".".into(),
        source,
    })?;
    Ok(value)
}

/// Temperatures in Kelvin, humidity in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Readings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    pub country: String,
}

/// `GET /weather` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    pub name: String,
    pub sys: Sys,
    pub weather: Vec<Condition>,
    pub main: Readings,
}

/// One 3-hour slot of `GET /forecast`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastEntry {
    pub dt: i64,
    pub dt_txt: String,
    pub weather: Vec<Condition>,
    pub main: Readings,
}

/// `GET /forecast` response, entries in the order the API sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
}

impl Forecast {
    /// Keeps only the first `n` entries.
    pub fn truncate(&mut self, n: usize) {
        self.list.truncate(n);
    }
}

fn first_description(weather: &[Condition]) -> &str {
    weather
        .first()
        .map(|c| c.description.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or("unknown")
}

impl CurrentWeather {
    pub fn description(&self) -> &str {
        first_description(&self.weather)
    }
}

impl ForecastEntry {
    pub fn description(&self) -> &str {
        first_description(&self.weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_current_weather_payload() {
        let json = r#"{
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 300.0, "feels_like": 299.0, "temp_min": 298.0, "temp_max": 302.0, "pressure": 1012, "humidity": 50},
            "sys": {"country": "MX", "sunrise": 1700000000},
            "name": "Mexico City",
            "cod": 200
        }"#;

        let parsed: CurrentWeather = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "Mexico City");
        assert_eq!(parsed.sys.country, "MX");
        assert_eq!(parsed.description(), "clear sky");
        assert_eq!(parsed.main.humidity, 50);
        assert_eq!(parsed.main.temp_max, 302.0);
    }

    #[test]
    fn absent_fields_default_to_zero() {
        let parsed: CurrentWeather = serde_json::from_str(r#"{"name": "Toronto"}"#).unwrap();
        assert_eq!(parsed.name, "Toronto");
        assert_eq!(parsed.main, Readings::default());
        assert_eq!(parsed.description(), "unknown");
    }

    #[test]
    fn wrong_type_names_the_field() {
        let err = decode::<CurrentWeather>("weather", r#"{"name": "X", "main": {"temp": 300.0, "humidity": "high"}}"#)
            .unwrap_err();
        match err {
            Error::Decode { endpoint, path, source } => {
                assert_eq!(endpoint, "weather");
                assert_eq!(path, "main.humidity");
                assert!(source.to_string().contains("invalid type"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn forecast_path_includes_list_index() {
        let body = r#"{"list": [{"dt_txt": "a"}, {"dt_txt": 7}]}"#;
        let err = decode::<Forecast>("forecast", body).unwrap_err();
        assert!(err.to_string().contains("list[1].dt_txt"), "{err}");
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let err = decode::<Forecast>("forecast", r#"{"list": []} x"#).unwrap_err();
        assert!(matches!(err, Error::Decode { ref path, .. } if path == "."));
    }

    #[test]
    fn truncate_keeps_order() {
        let mut forecast = Forecast {
            list: (0..5)
                .map(|i| ForecastEntry {
                    dt: i,
                    ..Default::default()
                })
                .collect(),
        };
        forecast.truncate(3);
        let dts: Vec<i64> = forecast.list.iter().map(|e| e.dt).collect();
        assert_eq!(dts, vec![0, 1, 2]);
    }
}
