use anyhow::{Context, Result};

/// Environment variable holding the OpenWeatherMap API key (required).
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
/// Environment variable overriding the default city advertised as a resource.
pub const DEFAULT_CITY_VAR: &str = "OPENWEATHER_DEFAULT_CITY";
/// Environment variable overriding the API base URL (test hook).
pub const BASE_URL_VAR: &str = "OPENWEATHER_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_CITY: &str = "London";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Read-only adapter configuration, established once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub default_city: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A missing or empty API key is a fatal startup condition, not a
    /// runtime error.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an explicit variable lookup.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .with_context(|| format!("{API_KEY_VAR} environment variable is required"))?;

        let default_city = get(DEFAULT_CITY_VAR)
            .filter(|city| !city.is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        let base_url = get(BASE_URL_VAR)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            default_city,
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}
