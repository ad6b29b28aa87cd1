//! Core library for `weatherbot`.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and its schema records
//! - Message formatting and Telegram delivery
//! - The report pipeline tying them together
//!
//! It is used by `weatherbot-cli`, but can also be reused by other binaries or services.

pub mod city;
pub mod config;
pub mod error;
pub mod format;
pub mod mode;
pub mod model;
pub mod notifier;
pub mod provider;
pub mod report;
pub mod units;

pub use city::{City, CityId};
pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use mode::Mode;
pub use model::{CurrentWeather, Forecast, ForecastEntry};
pub use notifier::{Notifier, StdoutNotifier, TelegramNotifier};
pub use provider::{OpenWeatherClient, WeatherSource};
pub use report::{Outcome, Request};
