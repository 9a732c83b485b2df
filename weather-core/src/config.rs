pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_BASE_URL: &str = "https://api.open-meteo.com";

/// Endpoints used by the Open-Meteo provider.
///
/// Only the base URL is configurable; paths and query parameters are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub geocoding_base_url: String,
    pub forecast_base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: DEFAULT_GEOCODING_BASE_URL.to_string(),
            forecast_base_url: DEFAULT_FORECAST_BASE_URL.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Point both services at the same host; handy for a local mock.
    pub fn with_base_url(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            geocoding_base_url: base.clone(),
            forecast_base_url: base,
        }
    }

    pub fn geocoding_url(&self) -> String {
        format!("{}/v1/search", self.geocoding_base_url.trim_end_matches('/'))
    }

    pub fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.forecast_base_url.trim_end_matches('/'))
    }
}
