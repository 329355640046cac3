//! Request processing subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → process() (one span per call, always closed)
//!         → validate latency override
//!         → fill unset fields from options.rs
//!         → simulated delay (cooperative sleep)
//!         → outcome draw, metrics, single INSERT
//!     → ProcessedOutcome serialized back to the caller
//! ```
//!
//! # Design Decisions
//! - No retries: each call is a single best-effort attempt
//! - The delay suspends only the calling task, never the runtime
//! - The simulated-error path skips persistence and metrics but still
//!   produces its span and log line

pub mod options;

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{field, Instrument, Span};

use crate::observability::metrics;
use crate::storage::{ProcessedRequest, RequestRepository};

/// Bounds of the random simulated latency, in milliseconds.
const LATENCY_RANGE_MS: std::ops::RangeInclusive<i64> = 120..=3200;

/// Optional fields of an incoming platform request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformRequestInput {
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub urgency: Option<String>,
    pub team: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// The result of one successfully processed request.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedOutcome {
    #[serde(rename = "id")]
    pub request_id: String,
    pub team: String,
    #[serde(rename = "type")]
    pub request_type: String,
    pub urgency: String,
    pub platform_response: String,
    pub time_to_response_ms: i64,
    pub comment: String,
}

/// Processing failure taxonomy.
///
/// `InvalidArgument` maps to a client error at the HTTP boundary; everything
/// else maps to a server error. Callers get a bare status code either way.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("simulated failure")]
    Simulated,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Processes platform requests end to end: defaults, delay, outcome,
/// telemetry, persistence.
pub struct RequestProcessor {
    repository: RequestRepository,
}

impl RequestProcessor {
    pub fn new(repository: RequestRepository) -> Self {
        Self { repository }
    }

    /// Process one platform request.
    ///
    /// Opens the per-call span; the span is closed when the call returns,
    /// success or failure.
    pub async fn process(
        &self,
        input: Option<PlatformRequestInput>,
        latency_ms: Option<i64>,
        simulate_error: bool,
    ) -> Result<ProcessedOutcome, ProcessError> {
        let span = tracing::info_span!(
            "platform.request.create",
            "request.team" = field::Empty,
            "request.type" = field::Empty,
            "request.urgency" = field::Empty,
            "platform.response" = field::Empty,
        );
        self.process_inner(input, latency_ms, simulate_error)
            .instrument(span)
            .await
    }

    async fn process_inner(
        &self,
        input: Option<PlatformRequestInput>,
        latency_ms: Option<i64>,
        simulate_error: bool,
    ) -> Result<ProcessedOutcome, ProcessError> {
        // A wholly absent body is the same as a body with no fields set.
        let input = input.unwrap_or_default();

        if let Some(ms) = latency_ms {
            if ms < 0 {
                return Err(ProcessError::InvalidArgument(
                    "latency cannot be negative".to_string(),
                ));
            }
        }

        // Fill unset fields. The RNG handle must not live across an await.
        let (team, request_type, urgency) = {
            let mut rng = rand::thread_rng();
            (
                supplied_or_random(input.team, options::TEAMS, &mut rng),
                supplied_or_random(input.request_type, options::REQUEST_TYPES, &mut rng),
                supplied_or_random(input.urgency, options::URGENCY_LEVELS, &mut rng),
            )
        };
        let title = input
            .title
            .unwrap_or_else(|| options::DEFAULT_TITLE.to_string());
        let description = input
            .description
            .unwrap_or_else(|| options::DEFAULT_DESCRIPTION.to_string());

        let span = Span::current();
        span.record("request.team", team.as_str());
        span.record("request.type", request_type.as_str());
        span.record("request.urgency", urgency.as_str());

        let actual_latency = match latency_ms {
            Some(ms) => ms,
            None => rand::thread_rng().gen_range(LATENCY_RANGE_MS),
        };
        tokio::time::sleep(Duration::from_millis(actual_latency as u64)).await;

        if simulate_error {
            tracing::error!(
                team = %team,
                "type" = %request_type,
                urgency = %urgency,
                title = %title,
                "request_failed"
            );
            return Err(ProcessError::Simulated);
        }

        let (platform_response, comment, request_id) = {
            let mut rng = rand::thread_rng();
            (
                options::pick(&mut rng, options::RESPONSES).to_string(),
                options::pick(&mut rng, options::COMMENTS).to_string(),
                generate_request_id(&mut rng),
            )
        };
        span.record("platform.response", platform_response.as_str());

        metrics::record_request(&team, &request_type, &urgency, &platform_response, actual_latency);

        let record = ProcessedRequest::new(
            request_id.clone(),
            team.clone(),
            request_type.clone(),
            urgency.clone(),
            title.clone(),
            description,
            platform_response.clone(),
            actual_latency,
            comment.clone(),
        );
        self.repository.insert(&record).await?;

        tracing::info!(
            team = %team,
            "type" = %request_type,
            urgency = %urgency,
            response = %platform_response,
            latency_ms = actual_latency,
            title = %title,
            "request_processed"
        );

        Ok(ProcessedOutcome {
            request_id,
            team,
            request_type,
            urgency,
            platform_response,
            time_to_response_ms: actual_latency,
            comment,
        })
    }
}

fn supplied_or_random<R: Rng + ?Sized>(
    value: Option<String>,
    table: &'static [&'static str],
    rng: &mut R,
) -> String {
    value.unwrap_or_else(|| options::pick(rng, table).to_string())
}

/// Not checked for uniqueness: the 5-digit space makes collisions possible
/// under sustained load, and the store accepts them.
fn generate_request_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("rq-{:05}", rng.gen_range(0..100_000))
}
