//! Binary crate for the weather MCP server.
//!
//! This crate focuses on:
//! - Startup (logging, configuration, CLI flags)
//! - Dispatching MCP requests to the core weather pipeline
//! - Serving the protocol over stdio

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::stdio;

use weather_core::{Config, OpenWeatherProvider};

mod resources;
mod server;
mod tools;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-mcp", version, about = "Weather MCP server")]
struct Cli {
    /// Override the default city advertised through the resource catalog.
    #[arg(long)]
    city: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    let default_city = cli.city.unwrap_or_else(|| config.default_city.clone());

    let provider =
        OpenWeatherProvider::new(&config).context("failed to initialize OpenWeatherMap client")?;

    tracing::info!(city = %default_city, "starting weather MCP server on stdio");

    let service = server::WeatherServer::new(Arc::new(provider), default_city)
        .serve(stdio())
        .await
        .context("failed to start MCP service")?;

    service.waiting().await?;
    Ok(())
}
