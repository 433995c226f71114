//! The forecast tool: catalog entry, argument handling, and dispatch.

use std::sync::Arc;

use chrono::Utc;
use rmcp::ErrorData as McpError;
use rmcp::model::*;
use schemars::{JsonSchema, schema_for};
use tracing::{error, info};

use weather_core::provider::openweather::aggregate_forecast;
use weather_core::{ForecastArgs, WeatherProvider};

pub const FORECAST_TOOL: &str = "get_forecast";

/// Schema-only mirror of the tool arguments; inbound payloads go through
/// [`ForecastArgs::parse`] instead of serde so that malformed shapes are
/// rejected with a precise reason.
#[derive(JsonSchema)]
struct GetForecastArgs {
    /// City name
    #[allow(dead_code)]
    city: String,
    /// Number of days (1-5)
    #[allow(dead_code)]
    #[schemars(range(min = 1, max = 5))]
    days: Option<u32>,
}

fn to_schema<T: JsonSchema>() -> Result<Arc<serde_json::Map<String, serde_json::Value>>, McpError> {
    let schema = schema_for!(T);
    let json_value = serde_json::to_value(schema)
        .map_err(|e| McpError::internal_error(format!("failed to serialize schema: {e}"), None))?;
    let object = json_value
        .as_object()
        .ok_or_else(|| McpError::internal_error("schema is not a JSON object", None))?
        .clone();
    Ok(Arc::new(object))
}

/// List the single forecast tool.
pub fn list() -> Result<ListToolsResult, McpError> {
    Ok(ListToolsResult {
        tools: vec![Tool {
            name: FORECAST_TOOL.into(),
            title: None,
            description: Some("Get weather forecast for a city".into()),
            input_schema: to_schema::<GetForecastArgs>()?,
            output_schema: None,
            annotations: None,
            icons: None,
        }],
        next_cursor: None,
    })
}

/// Call a tool by name with the given arguments.
pub async fn call(
    provider: &dyn WeatherProvider,
    tool_name: &str,
    arguments: serde_json::Map<String, serde_json::Value>,
) -> Result<CallToolResult, McpError> {
    match tool_name {
        FORECAST_TOOL => get_forecast(provider, serde_json::Value::Object(arguments)).await,
        _ => Err(McpError::method_not_found::<CallToolRequestMethod>()),
    }
}

/// The forecast pipeline: validate, clamp, fetch, aggregate.
///
/// Upstream failures come back as an error-flagged tool result (the call
/// itself succeeds at the protocol level), so the host can display them.
async fn get_forecast(
    provider: &dyn WeatherProvider,
    arguments: serde_json::Value,
) -> Result<CallToolResult, McpError> {
    let args = ForecastArgs::parse(&arguments)
        .map_err(|reason| McpError::invalid_params(reason, None))?;
    let days = args.effective_days();

    info!(city = %args.city, days, "handling get_forecast");

    match provider.fetch_forecast(&args.city, days).await {
        Ok(resp) => {
            let forecast = aggregate_forecast(&resp, days, Utc::now().date_naive());
            let json = serde_json::to_string_pretty(&forecast).map_err(|e| {
                McpError::internal_error(format!("failed to serialize forecast: {e}"), None)
            })?;
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Err(e) => {
            error!(error = %e, "forecast fetch failed");
            Ok(CallToolResult::error(vec![Content::text(format!(
                "Weather API error: {e}"
            ))]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use weather_core::ProviderError;
    use weather_core::provider::openweather::{
        ConditionEntry, CurrentResponse, ForecastEntry, ForecastResponse, MainFields,
    };

    /// Stub provider; the `Unreachable` variant panics, proving the
    /// rejection paths never reach the network.
    #[derive(Debug)]
    enum Stub {
        Forecast(ForecastResponse),
        Fail(&'static str),
        Unreachable,
    }

    #[async_trait]
    impl WeatherProvider for Stub {
        async fn fetch_current(&self, _city: &str) -> Result<CurrentResponse, ProviderError> {
            panic!("unexpected upstream call");
        }

        async fn fetch_forecast(
            &self,
            _city: &str,
            _days: u8,
        ) -> Result<ForecastResponse, ProviderError> {
            match self {
                Stub::Forecast(resp) => Ok(resp.clone()),
                Stub::Fail(message) => Err(ProviderError::Api {
                    status: 502,
                    message: (*message).to_string(),
                }),
                Stub::Unreachable => panic!("unexpected upstream call"),
            }
        }
    }

    /// `count` consistent 3-hour samples starting 2024-01-15, temp == index.
    fn listing(count: usize) -> ForecastResponse {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let list = (0..count)
            .map(|i| ForecastEntry {
                main: MainFields {
                    temp: i as f64,
                    humidity: 60,
                },
                weather: vec![ConditionEntry {
                    description: "scattered clouds".to_string(),
                }],
                dt_txt: Some(
                    (start + chrono::Duration::hours(3 * i as i64))
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string(),
                ),
            })
            .collect();
        ForecastResponse { list }
    }

    fn args(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().expect("object literal").clone()
    }

    fn result_json(result: &CallToolResult) -> serde_json::Value {
        serde_json::to_value(result).expect("serializable result")
    }

    #[test]
    fn catalog_has_one_forecast_tool() {
        let result = list().expect("tool list");

        assert_eq!(result.tools.len(), 1);
        assert_eq!(result.tools[0].name, FORECAST_TOOL);

        let schema = serde_json::to_value(result.tools[0].input_schema.as_ref()).unwrap();
        assert!(schema["properties"]["city"].is_object());
        assert!(schema["properties"]["days"].is_object());
    }

    #[tokio::test]
    async fn unknown_tool_is_method_not_found_without_upstream_call() {
        let err = call(&Stub::Unreachable, "get_tides", args(json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_arguments_are_rejected_without_upstream_call() {
        let err = call(&Stub::Unreachable, FORECAST_TOOL, args(json!({ "days": 3 })))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("city"));
    }

    #[tokio::test]
    async fn two_day_forecast_picks_the_first_sample_of_each_day() {
        let result = call(
            &Stub::Forecast(listing(24)),
            FORECAST_TOOL,
            args(json!({ "city": "Paris", "days": 2 })),
        )
        .await
        .expect("tool call succeeds");

        let value = result_json(&result);
        assert_ne!(value["isError"], json!(true));

        let text = value["content"][0]["text"].as_str().expect("text content");
        let forecast: serde_json::Value = serde_json::from_str(text).expect("valid JSON payload");
        let entries = forecast.as_array().expect("array payload");

        // Samples at indices 0 and 8.
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["date"], "2024-01-15");
        assert_eq!(entries[0]["temperature"], 0.0);
        assert_eq!(entries[1]["date"], "2024-01-16");
        assert_eq!(entries[1]["temperature"], 8.0);
    }

    #[tokio::test]
    async fn days_defaults_to_three() {
        let result = call(
            &Stub::Forecast(listing(40)),
            FORECAST_TOOL,
            args(json!({ "city": "Paris" })),
        )
        .await
        .expect("tool call succeeds");

        let value = result_json(&result);
        let text = value["content"][0]["text"].as_str().expect("text content");
        let forecast: serde_json::Value = serde_json::from_str(text).expect("valid JSON payload");

        assert_eq!(forecast.as_array().expect("array payload").len(), 3);
    }

    #[tokio::test]
    async fn upstream_failure_is_an_error_flagged_result() {
        let result = call(
            &Stub::Fail("city not found"),
            FORECAST_TOOL,
            args(json!({ "city": "Atlantis", "days": 2 })),
        )
        .await
        .expect("protocol call still succeeds");

        let value = result_json(&result);
        assert_eq!(value["isError"], json!(true));

        let text = value["content"][0]["text"].as_str().expect("text content");
        assert!(text.contains("city not found"));
    }
}
