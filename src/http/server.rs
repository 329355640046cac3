//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request tracing)
//! - Bind server to listener
//! - Graceful shutdown on Ctrl+C
//!
//! No request timeout is applied: the simulated delay always runs to
//! completion, and load shedding is left to the hosting environment.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::processor::RequestProcessor;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<RequestProcessor>,
}

/// HTTP server for the platform request service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around the shared processor.
    pub fn new(processor: Arc<RequestProcessor>) -> Self {
        let state = AppState { processor };
        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all routes and middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/requests", post(handlers::create_request))
            .route("/healthz", get(handlers::healthz))
            .route("/readyz", get(handlers::readyz))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
