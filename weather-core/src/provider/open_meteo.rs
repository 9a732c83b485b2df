use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::ProviderConfig,
    error::{Error, Result, Stage},
    model::{GeocodingResponse, Location},
};

use super::{
    FORECAST_CURRENT, FORECAST_HOURLY, GEOCODING_LANGUAGE, GEOCODING_MAX_CANDIDATES,
    WeatherProvider,
};

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    config: ProviderConfig,
    http: Client,
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl OpenMeteoProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Send a GET and return the body, failing on transport errors and
    /// non-2xx statuses.
    async fn get_text(
        &self,
        stage: Stage,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String> {
        debug!(%stage, url, ?query, "Sending Open-Meteo request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| Error::Request { stage, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Request { stage, source })?;

        if !status.is_success() {
            return Err(Error::Status {
                stage,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn search_locations(&self, city: &str) -> Result<Vec<Location>> {
        let query = [
            ("name", city.to_string()),
            ("count", GEOCODING_MAX_CANDIDATES.to_string()),
            ("language", GEOCODING_LANGUAGE.to_string()),
            ("format", "json".to_string()),
        ];

        let body = self
            .get_text(Stage::Geocoding, &self.config.geocoding_url(), &query)
            .await?;

        let parsed: GeocodingResponse =
            serde_json::from_str(&body).map_err(|source| Error::Decode {
                stage: Stage::Geocoding,
                source,
            })?;

        Ok(parsed.results)
    }

    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Value> {
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", FORECAST_HOURLY.join(",")),
            ("current", FORECAST_CURRENT.join(",")),
        ];

        let body = self
            .get_text(Stage::Forecast, &self.config.forecast_url(), &query)
            .await?;

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            stage: Stage::Forecast,
            source,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
