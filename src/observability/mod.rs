//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request processor produces:
//!     → tracing events (structured log lines, one per call)
//!     → tracing spans (platform.request.create, one per call)
//!     → metrics.rs (counter + histogram per successful call)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metric handles are process-wide and append-only; recording is thread-safe
//! - The exporter is installed once at startup, before any traffic
//! - Spans close on drop, so failures still report exactly one span

pub mod metrics;
