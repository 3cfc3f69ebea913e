//! API Gateway (v1)
//!
//! A single-process reverse-proxy gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                 API GATEWAY                   │
//!                          │                                               │
//!     Client Request       │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ─────────────────────┼─▶│  http   │───▶│ routing  │───▶│  proxy  │──┼──▶ Backend
//!                          │  │ server  │    │  table   │    │forwarder│  │
//!                          │  └─────────┘    └──────────┘    └─────────┘  │
//!                          │       │               │               │      │
//!     Client Response      │       ▼               ▼               ▼      │
//!     ◀────────────────────┼── CORS headers   longest-prefix   X-Gateway  │
//!                          │   on every         match          on proxied │
//!                          │   response                        responses  │
//!                          │                                               │
//!                          │  ┌────────────────────────────────────────┐  │
//!                          │  │        Cross-Cutting Concerns           │  │
//!                          │  │  config  │  observability  │ lifecycle  │  │
//!                          │  └────────────────────────────────────────┘  │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;

use api_gateway::config::{self, GatewayConfig};
use api_gateway::http::HttpServer;
use api_gateway::lifecycle::Shutdown;
use api_gateway::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config path from the environment, next to the binary by default.
    let config_path =
        std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "gateway.toml".to_string());

    let config: GatewayConfig = if Path::new(&config_path).exists() {
        config::load_config(Path::new(&config_path))?
    } else {
        let mut config = GatewayConfig::default();
        config::loader::apply_env_overrides(&mut config);
        config
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        routes = config.routes.len(),
        "Configuration loaded"
    );
    for route in &config.routes {
        tracing::info!(prefix = %route.prefix, backend = %route.backend, "Route configured");
    }
    if config.routes.is_empty() {
        tracing::warn!(config_path = %config_path, "No routes configured; every request will be a 404");
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    // Compile routes and run the server; a bad route is fatal here.
    let server = HttpServer::new(config)?;
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
