//! Core library for the weather MCP adapter.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client and the raw response subset it depends on
//! - Shared domain models and the current/forecast transformations
//!
//! It is used by `weather-mcp`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod provider;

pub use config::Config;
pub use model::{ForecastArgs, ForecastDay, WeatherData};
pub use provider::{OpenWeatherProvider, ProviderError, WeatherProvider};
