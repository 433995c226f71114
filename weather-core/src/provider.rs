use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

pub use openweather::{CurrentResponse, ForecastResponse, OpenWeatherProvider};

/// Failures surfaced by the upstream weather provider.
///
/// Callers never see transport-library internals; every error is one of
/// these variants with a displayable message.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never completed (connection, timeout, body read).
    #[error("weather service unreachable: {0}")]
    Transport(String),

    /// The provider answered with a non-success status. `message` carries
    /// the provider's own error text when the body contained one.
    #[error("weather service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the documented shape.
    #[error("unexpected weather service response: {0}")]
    Decode(String),

    /// The documented field subset was violated (e.g. empty conditions list).
    #[error("malformed weather service response: {0}")]
    Contract(&'static str),
}

/// Typed accessor for the upstream weather API.
///
/// Both operations are plain request/response: no retries, caching, or
/// rate limiting at this layer. The trait is the seam the request router is
/// tested through.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a city.
    async fn fetch_current(&self, city: &str) -> Result<CurrentResponse, ProviderError>;

    /// Fetch the 3-hour interval forecast listing covering `days` calendar
    /// days.
    async fn fetch_forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<ForecastResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_carries_provider_message() {
        let err = ProviderError::Api {
            status: 404,
            message: "city not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("city not found"));
    }

    #[test]
    fn transport_error_display_is_generic() {
        let err = ProviderError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("unreachable"));
    }
}
