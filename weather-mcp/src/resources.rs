//! The resource catalog: one live entry with the current conditions for the
//! configured default city.

use chrono::Utc;
use rmcp::ErrorData as McpError;
use rmcp::model::*;
use tracing::{error, info};

use weather_core::WeatherProvider;
use weather_core::provider::openweather::normalize_current;

pub fn current_weather_uri(city: &str) -> String {
    format!("weather://{city}/current")
}

/// List the single current-conditions resource.
pub fn list(default_city: &str) -> ListResourcesResult {
    let resource = RawResource {
        uri: current_weather_uri(default_city),
        name: format!("Current weather in {default_city}"),
        mime_type: Some("application/json".into()),
        title: None,
        description: Some(format!(
            "Live weather conditions for {default_city}, fetched on every read"
        )),
        size: None,
        icons: None,
    };

    ListResourcesResult {
        resources: vec![resource.no_annotation()],
        next_cursor: None,
    }
}

/// Read a resource by URI.
///
/// Only the default-city URI is known; everything else is rejected before
/// any upstream call. Upstream failures surface as protocol-level internal
/// errors carrying the provider's message.
pub async fn read(
    provider: &dyn WeatherProvider,
    default_city: &str,
    uri: &str,
) -> Result<ReadResourceResult, McpError> {
    if uri != current_weather_uri(default_city) {
        return Err(McpError::resource_not_found(
            format!("unknown resource URI: {uri}"),
            None,
        ));
    }

    info!(city = %default_city, "reading current weather resource");

    let resp = provider.fetch_current(default_city).await.map_err(|e| {
        error!(error = %e, "current weather fetch failed");
        McpError::internal_error(format!("Weather API error: {e}"), None)
    })?;

    let data = normalize_current(&resp, Utc::now())
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;

    let json = serde_json::to_string_pretty(&data).map_err(|e| {
        McpError::internal_error(format!("failed to serialize weather data: {e}"), None)
    })?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(json, uri.to_string())],
    })
}
