use tracing::{debug, info};

use crate::{
    error::Result,
    model::{LookupRequest, LookupResult},
    provider::WeatherProvider,
};

/// Resolve a city name to its forecast.
///
/// Geocodes `city`, then fetches the forecast for the first candidate. Zero
/// candidates yield [`LookupResult::NotFound`] without a forecast call. Any
/// failure of either call is returned as is; there are no retries and no
/// partial results.
pub async fn resolve_weather<P>(provider: &P, city: &str) -> Result<LookupResult>
where
    P: WeatherProvider + ?Sized,
{
    let candidates = provider.search_locations(city).await?;

    let Some(first) = candidates.first() else {
        info!(city, "No geocoding candidates");
        return Ok(LookupResult::NotFound {
            city: city.to_string(),
        });
    };

    debug!(
        city,
        candidates = candidates.len(),
        location = %first.label(),
        "Using first geocoding candidate"
    );

    let payload = provider
        .fetch_forecast(first.latitude, first.longitude)
        .await?;

    Ok(LookupResult::Weather { payload })
}

/// Same as [`resolve_weather`], taking a [`LookupRequest`].
pub async fn lookup<P>(provider: &P, request: &LookupRequest) -> Result<LookupResult>
where
    P: WeatherProvider + ?Sized,
{
    resolve_weather(provider, &request.city).await
}
