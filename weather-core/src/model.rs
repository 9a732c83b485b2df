use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub city: String,
}

impl LookupRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Outcome of a single weather lookup.
///
/// `NotFound` is a normal outcome, not an error: the geocoder simply had no
/// candidates for the given name.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    NotFound { city: String },
    /// Raw forecast document for the first geocoding candidate, untouched.
    Weather { payload: Value },
}

/// One geocoding candidate.
///
/// Only the coordinates are required; the remaining fields are descriptive and
/// used for logging.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Location {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
            country: None,
            admin1: None,
            timezone: None,
        }
    }

    /// Human-friendly label, e.g. "Paris, Île-de-France, France".
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [&self.name, &self.admin1, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();

        if parts.is_empty() {
            format!("{:.4}, {:.4}", self.latitude, self.longitude)
        } else {
            parts.join(", ")
        }
    }
}

/// Open-Meteo omits `results` entirely when nothing matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<Location>,
}
