//! HTTP client for the City and Weather APIs.

use std::time::Duration;

use cityinfo_core::UpstreamConfig;
use tracing::instrument;

use crate::error::UpstreamError;
use crate::types::{CityData, WeatherForecast};

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Self::with_base_url(&config.base_url, config.timeout())
    }

    /// Build a client against an explicit base URL. No retries are made;
    /// a request exceeding `timeout` fails with a network timeout.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cityinfo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, resource, urlencoding::encode(id))
    }

    /// GET `url` and parse the body as JSON.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, UpstreamError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("Upstream reported not found: {}", url);
            return Err(UpstreamError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!("Upstream {} returned {}", url, status);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: if text.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                } else {
                    text
                },
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::invalid(format!("JSON parse error: {}", e)))
    }

    /// Fetch city metadata from `/cities/{city_id}`.
    #[instrument(skip(self), level = "info")]
    pub async fn get_city(&self, city_id: &str) -> Result<CityData, UpstreamError> {
        let value = self.fetch_json(&self.resource_url("cities", city_id)).await?;
        CityData::from_json(value)
    }

    /// Fetch the two-day forecast from `/weather/{city_id}`.
    #[instrument(skip(self), level = "info")]
    pub async fn get_weather(&self, city_id: &str) -> Result<WeatherForecast, UpstreamError> {
        let value = self.fetch_json(&self.resource_url("weather", city_id)).await?;
        WeatherForecast::from_json(value)
    }
}
