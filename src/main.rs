//! Platform Request Service
//!
//! A demo HTTP service for platform engineering observability, built with
//! Tokio and Axum. It simulates a platform team receiving and processing
//! feature requests from development teams.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │            PLATFORM REQUEST SERVICE           │
//!                    │                                              │
//!   POST /requests   │  ┌─────────┐    ┌───────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│  http   │───▶│ processor │──▶│ storage │ │
//!                    │  │ server  │    │ (defaults,│   │ (SQLite │ │
//!   GET /healthz     │  │ + probes│    │  delay,   │   │  insert)│ │
//!   GET /readyz      │  └─────────┘    │  outcome) │   └─────────┘ │
//!                    │                 └─────┬─────┘               │
//!                    │                       │                     │
//!                    │                       ▼                     │
//!                    │         ┌──────────────────────────┐        │
//!                    │         │      observability       │        │
//!                    │         │ tracing spans + log lines│        │
//!                    │         │ Prometheus counter/histo │        │
//!                    │         └──────────────────────────┘        │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use platform_request_service::config::{loader, ServiceConfig};
use platform_request_service::http::HttpServer;
use platform_request_service::observability::metrics;
use platform_request_service::processor::RequestProcessor;
use platform_request_service::storage::RequestRepository;

#[derive(Parser, Debug)]
#[command(name = "platform-request-service", version, about = "Demo platform request intake service")]
struct Args {
    /// Path to a TOML config file; built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address from the config.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("platform-request-service v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    // Install the Prometheus exporter before any traffic
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Open the request store and build the processor
    let repository = RequestRepository::new(&config.database.path).await?;
    let processor = Arc::new(RequestProcessor::new(repository));

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(processor);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
