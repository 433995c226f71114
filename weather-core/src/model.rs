use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current conditions in the adapter's stable output schema.
///
/// Produced fresh on every resource read; the timestamp records the capture
/// time of the read, since the upstream "current" endpoint carries none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    pub temperature: f64,
    pub conditions: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub timestamp: String,
}

/// One forecast entry per calendar day, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub temperature: f64,
    pub conditions: String,
}

/// Arguments of the `get_forecast` tool, the only externally supplied input
/// structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastArgs {
    pub city: String,
    /// Raw requested day count. Any numeric value passes validation; range
    /// handling happens in [`ForecastArgs::effective_days`].
    pub days: Option<f64>,
}

impl ForecastArgs {
    pub const DEFAULT_DAYS: u8 = 3;
    pub const MAX_DAYS: u8 = 5;

    /// Structural validation of an inbound tool payload.
    ///
    /// Accepts only non-null objects with a string `city` and, when present,
    /// a numeric `days`. Rejections carry a reason and must be reported
    /// before any network call is made.
    pub fn parse(raw: &Value) -> Result<Self, String> {
        let obj = raw
            .as_object()
            .ok_or_else(|| "arguments must be an object".to_string())?;

        let city = match obj.get("city") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err("'city' must be a string".to_string()),
            None => return Err("missing required argument 'city'".to_string()),
        };

        let days = match obj.get("days") {
            None => None,
            Some(v) => Some(
                v.as_f64()
                    .ok_or_else(|| "'days' must be a number".to_string())?,
            ),
        };

        Ok(Self { city, days })
    }

    /// Day count actually used downstream: clamped to `1..=MAX_DAYS`,
    /// defaulting to [`Self::DEFAULT_DAYS`] when absent.
    pub fn effective_days(&self) -> u8 {
        match self.days {
            None => Self::DEFAULT_DAYS,
            Some(d) => d.clamp(1.0, f64::from(Self::MAX_DAYS)) as u8,
        }
    }
}
