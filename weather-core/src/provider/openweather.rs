//! OpenWeatherMap accessor and the transformations from its raw payloads
//! into the adapter's output schema.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::model::{ForecastDay, WeatherData};

use super::{ProviderError, WeatherProvider};

/// The forecast endpoint returns samples at fixed 3-hour spacing, so 8
/// samples cover one calendar day.
pub const SAMPLES_PER_DAY: usize = 8;

/// Subset of the `main` block shared by both endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MainFields {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindFields {
    pub speed: f64,
}

/// Raw current-conditions payload, reduced to the documented field subset.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub main: MainFields,
    pub weather: Vec<ConditionEntry>,
    pub wind: WindFields,
}

/// One 3-hour interval sample of the forecast listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub main: MainFields,
    pub weather: Vec<ConditionEntry>,
    /// `"YYYY-MM-DD HH:MM:SS"`; absent only for malformed upstream data.
    #[serde(default)]
    pub dt_txt: Option<String>,
}

/// Raw forecast payload: a flat, ordered list of interval samples.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(url = %url, "requesting OpenWeatherMap endpoint");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: provider_message(&body, status.as_u16()),
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<CurrentResponse, ProviderError> {
        self.get_json(
            "weather",
            &[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .await
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<ForecastResponse, ProviderError> {
        let cnt = (usize::from(days) * SAMPLES_PER_DAY).to_string();
        self.get_json(
            "forecast",
            &[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("cnt", cnt.as_str()),
            ],
        )
        .await
    }
}

/// Extract the provider's own error text from a non-success body, falling
/// back to a generic status message.
fn provider_message(body: &str, status: u16) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Map a raw current-conditions payload into [`WeatherData`].
///
/// `captured_at` is the capture time of the read; the upstream "current"
/// endpoint carries no timestamp of its own. An empty `weather` list is an
/// upstream-contract violation and fails rather than being defaulted.
pub fn normalize_current(
    resp: &CurrentResponse,
    captured_at: DateTime<Utc>,
) -> Result<WeatherData, ProviderError> {
    let conditions = resp
        .weather
        .first()
        .ok_or(ProviderError::Contract(
            "current conditions carried no weather entries",
        ))?
        .description
        .clone();

    Ok(WeatherData {
        temperature: resp.main.temp,
        conditions,
        humidity: resp.main.humidity,
        wind_speed: resp.wind.speed,
        timestamp: captured_at.to_rfc3339(),
    })
}

/// Reduce the flat interval listing to one entry per calendar day.
///
/// Takes the first sample of each 8-sample group (indices 0, 8, 16, ...) as
/// the day's representative; intentionally not a daily average. The date is
/// the sample's `dt_txt` truncated at the first space; `fallback_date` (the
/// capture-time date) stands in when a sample carries none. Output is
/// truncated, never padded, when the upstream returned fewer samples.
pub fn aggregate_forecast(
    resp: &ForecastResponse,
    days: u8,
    fallback_date: NaiveDate,
) -> Vec<ForecastDay> {
    resp.list
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .take(usize::from(days))
        .map(|entry| {
            let date = entry
                .dt_txt
                .as_deref()
                .and_then(|txt| txt.split(' ').next())
                .map(str::to_owned)
                .unwrap_or_else(|| fallback_date.format("%Y-%m-%d").to_string());

            let conditions = entry
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_else(|| "unknown".to_string());

            ForecastDay {
                date,
                temperature: entry.main.temp,
                conditions,
            }
        })
        .collect()
}
