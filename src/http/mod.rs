//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → handlers.rs (POST /requests, GET /healthz, GET /readyz)
//!     → RequestProcessor (defaults, delay, outcome, persistence)
//!     → JSON response (or a bare 400/500)
//! ```

pub mod handlers;
pub mod server;

pub use server::HttpServer;
