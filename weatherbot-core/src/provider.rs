use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    city::CityId,
    error::Result,
    model::{CurrentWeather, Forecast},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Source of weather data for one city.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, city: &CityId) -> Result<CurrentWeather>;

    async fn forecast(&self, city: &CityId) -> Result<Forecast>;
}
