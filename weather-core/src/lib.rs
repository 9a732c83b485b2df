//! Core library for the weather MCP server.
//!
//! This crate defines:
//! - The lookup flow (geocode, then forecast for the first match)
//! - Abstraction over the weather provider, with an Open-Meteo implementation
//! - Shared domain models (requests, results, locations)
//!
//! It is used by `weather-mcp`, but has no knowledge of the protocol it is
//! exposed through.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::ProviderConfig;
pub use error::{Error, Result, Stage};
pub use lookup::{lookup, resolve_weather};
pub use model::{LookupRequest, LookupResult, Location};
pub use provider::{OpenMeteoProvider, WeatherProvider};
