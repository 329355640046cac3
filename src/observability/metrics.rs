//! Metrics collection and exposition.
//!
//! # Metrics
//! - `platform_requests_total` (counter): processed requests by team, type,
//!   urgency, response
//! - `time_to_initial_response_ms` (histogram): simulated latency distribution,
//!   same labels
//!
//! # Design Decisions
//! - Recorded only on the success path; simulated errors emit no sample
//! - Exposed on a dedicated Prometheus scrape address, separate from the API

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "platform_requests_total";
pub const RESPONSE_TIME_MS: &str = "time_to_initial_response_ms";

/// Install the Prometheus exporter on the given address.
///
/// Failure to install is logged and otherwise ignored: the service keeps
/// serving traffic, metric emission just becomes a no-op.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(REQUESTS_TOTAL, "Total number of platform requests");
            describe_histogram!(
                RESPONSE_TIME_MS,
                Unit::Milliseconds,
                "Time to initial response in milliseconds"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one processed request: a counter increment and a latency sample.
pub fn record_request(team: &str, request_type: &str, urgency: &str, response: &str, latency_ms: i64) {
    let labels = [
        ("team", team.to_string()),
        ("type", request_type.to_string()),
        ("urgency", urgency.to_string()),
        ("response", response.to_string()),
    ];

    counter!(REQUESTS_TOTAL, &labels).increment(1);
    histogram!(RESPONSE_TIME_MS, &labels).record(latency_ms as f64);
}
