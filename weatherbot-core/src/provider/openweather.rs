use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    city::CityId,
    error::{Error, Result, truncate_body},
    model::{CurrentWeather, Forecast, decode},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Points the client at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &'static str, city: &CityId) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, city = %city, "requesting OpenWeather {endpoint}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("id", city.as_str()),
                ("APPID", self.api_key.as_str()),
                ("lang", "en"),
            ])
            .send()
            .await
            .map_err(Error::transport(endpoint))?;

        let status = res.status();
        let body = res.text().await.map_err(Error::transport(endpoint))?;

        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        decode(endpoint, &body)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, city: &CityId) -> Result<CurrentWeather> {
        self.fetch("weather", city).await
    }

    async fn forecast(&self, city: &CityId) -> Result<Forecast> {
        self.fetch("forecast", city).await
    }
}
