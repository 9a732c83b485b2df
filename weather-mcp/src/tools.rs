//! The `get-weather` tool.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use weather_core::{LookupRequest, LookupResult, WeatherProvider, lookup};

use crate::error::{Error, Result};

pub const GET_WEATHER: &str = "get-weather";
pub const GET_WEATHER_DESCRIPTION: &str = "Tool to get the weather for a city";

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWeatherParams {
    /// The name of the city to get the weather for
    pub city: String,
}

impl GetWeatherParams {
    /// Validate raw `tools/call` arguments.
    pub fn from_arguments(arguments: Option<JsonObject>) -> Result<Self> {
        let arguments = arguments.unwrap_or_default();
        let params: Self = serde_json::from_value(Value::Object(arguments)).map_err(|e| {
            Error::InvalidParams(format!("Invalid arguments for tool {GET_WEATHER}: {e}"))
        })?;

        if params.city.trim().is_empty() {
            return Err(Error::InvalidParams(format!(
                "Invalid arguments for tool {GET_WEATHER}: `city` must not be empty"
            )));
        }

        Ok(params)
    }
}

impl From<GetWeatherParams> for LookupRequest {
    fn from(params: GetWeatherParams) -> Self {
        LookupRequest::new(params.city)
    }
}

/// Input schema derived from a parameter struct.
fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    Arc::new(schema.as_object().cloned().unwrap_or_default())
}

pub fn get_weather_tool() -> Tool {
    Tool::new(
        GET_WEATHER,
        GET_WEATHER_DESCRIPTION,
        input_schema::<GetWeatherParams>(),
    )
}

/// Every tool this server exposes.
pub fn all_tools() -> Vec<Tool> {
    vec![get_weather_tool()]
}

/// Run a lookup and wrap the outcome in a single text block.
pub async fn get_weather<P>(provider: &P, params: GetWeatherParams) -> Result<CallToolResult>
where
    P: WeatherProvider + ?Sized,
{
    info!(city = %params.city, "Looking up weather");
    let result = lookup(provider, &params.into()).await?;
    render(result)
}

/// Render a lookup outcome as tool content.
///
/// The forecast is opaque here: it is only pretty-printed, never reshaped,
/// and keeps the provider's key order.
pub fn render(result: LookupResult) -> Result<CallToolResult> {
    let text = match result {
        LookupResult::NotFound { city } => format!("City \"{city}\" not found."),
        LookupResult::Weather { payload } => serde_json::to_string_pretty(&payload)?,
    };

    let mut result = CallToolResult::success(vec![Content::text(text)]);
    // Plain `{content: [...]}` on the wire.
    result.is_error = None;
    Ok(result)
}
