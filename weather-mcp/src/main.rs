//! Binary crate for the `weather-mcp` server.
//!
//! Registers the three weather operations as MCP tools and serves them over
//! stdio. The process takes no arguments; the only startup knob is the
//! provider base URL override (config file or `WEATHER_BASE_URL`).

mod tools;

use rmcp::{ServerHandler, ServiceExt, model::*, tool_handler, transport::stdio};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::Config;

use crate::tools::WeatherMcpServer;

#[tool_handler]
impl ServerHandler for WeatherMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Weather MCP server: current conditions for any city, demo weather alerts and multi-city comparison, backed by wttr.in.".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr; stdout carries the stdio transport.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    tracing::info!(base_url = %config.resolved_base_url(), "starting weather MCP server");

    let service = WeatherMcpServer::new(&config).serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
