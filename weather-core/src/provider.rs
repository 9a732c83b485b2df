use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{Location, error::Result};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// Query parameters of the geocoding search.
pub const GEOCODING_MAX_CANDIDATES: u32 = 10;
pub const GEOCODING_LANGUAGE: &str = "en";

/// Hourly series requested from the forecast service.
pub const FORECAST_HOURLY: &[&str] = &["temperature_2m"];

/// Current-conditions fields requested from the forecast service.
pub const FORECAST_CURRENT: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "wind_speed_10m",
    "precipitation",
    "rain",
    "showers",
    "cloud_cover",
    "apparent_temperature",
];

/// The two outbound calls a lookup is made of.
///
/// Implementations must not cache: every call goes to the network.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Candidate locations for a place name, in provider order. Empty when
    /// nothing matches.
    async fn search_locations(&self, city: &str) -> Result<Vec<Location>>;

    /// Raw forecast document for a coordinate pair.
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_fields_are_unique() {
        let mut fields = FORECAST_CURRENT.to_vec();
        fields.sort_unstable();
        fields.dedup();
        assert_eq!(fields.len(), FORECAST_CURRENT.len());
    }
}
