use chrono::{DateTime, TimeZone};
use std::fmt::Write;

use crate::{
    model::{CurrentWeather, Forecast, Readings},
    units::kelvin_to_celsius,
};

/// Header line: `WeatherBot 3:04PM`.
pub fn header<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("WeatherBot {}", now.format("%-I:%M%p"))
}

fn readings(r: &Readings) -> String {
    format!(
        "🌡 Temperature (°C) {:.0}. Feels like {:.0} (L {:.0} - H {:.0}), {:2} humidity.",
        kelvin_to_celsius(r.temp),
        kelvin_to_celsius(r.feels_like),
        kelvin_to_celsius(r.temp_min),
        kelvin_to_celsius(r.temp_max),
        r.humidity,
    )
}

/// Current-weather section, starting on its own line.
pub fn current_section(current: &CurrentWeather) -> String {
    format!(
        "\n{} ({}) {}. {}",
        current.name,
        current.sys.country,
        current.description(),
        readings(&current.main),
    )
}

/// One line per forecast entry, in the order given.
pub fn forecast_section(forecast: &Forecast) -> String {
    let mut out = String::new();
    for entry in &forecast.list {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "\n⌚ {} {}. {}",
            entry.dt_txt,
            entry.description(),
            readings(&entry.main),
        );
    }
    out
}

/// Assembles the full message. Sections that were not requested are `None`.
pub fn message<Tz: TimeZone>(
    now: &DateTime<Tz>,
    current: Option<&CurrentWeather>,
    forecast: Option<&Forecast>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = header(now);
    if let Some(current) = current {
        out.push_str(&current_section(current));
    }
    if let Some(forecast) = forecast {
        out.push_str(&forecast_section(forecast));
    }
    out
}
