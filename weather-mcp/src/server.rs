//! MCP server wiring.
//!
//! [`WeatherServer`] holds the one-time configuration (provider handle and
//! default city) and delegates each request kind to the `resources` and
//! `tools` modules.

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::ServerHandler;
use rmcp::model::*;
use rmcp::service::{RequestContext, RoleServer};

use weather_core::WeatherProvider;

#[derive(Clone)]
pub struct WeatherServer {
    provider: Arc<dyn WeatherProvider>,
    default_city: String,
}

impl WeatherServer {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            default_city: default_city.into(),
        }
    }
}

impl ServerHandler for WeatherServer {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2025_03_26,
            server_info: Implementation {
                name: "weather-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("Weather MCP Server".into()),
                icons: None,
                website_url: None,
            },
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            instructions: Some(format!(
                "Weather data from OpenWeatherMap. Read the weather://{}/current \
                 resource for current conditions, or call the get_forecast tool \
                 with a city name and an optional day count (1-5, default 3).",
                self.default_city
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(crate::resources::list(&self.default_city))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        crate::resources::read(self.provider.as_ref(), &self.default_city, &request.uri).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        crate::tools::list()
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        crate::tools::call(self.provider.as_ref(), &request.name, arguments).await
    }
}
