//! HTTP handlers for the platform request API.
//!
//! The write endpoint delegates straight to the processor and maps its error
//! taxonomy onto bare status codes: InvalidArgument becomes an empty 400,
//! everything else an empty 500. Callers can only tell the classes apart;
//! sub-causes live in the server-side logs and spans.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::processor::{PlatformRequestInput, ProcessError};

/// Query parameters of the write endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateRequestParams {
    /// Latency simulation override in milliseconds.
    pub latency_ms: Option<i64>,

    /// Simulate an internal failure for this call.
    #[serde(default)]
    pub error: bool,
}

/// `POST /requests` — create and process one platform request.
pub async fn create_request(
    State(state): State<AppState>,
    Query(params): Query<CreateRequestParams>,
    body: Option<Json<PlatformRequestInput>>,
) -> Response {
    let input = body.map(|Json(input)| input);

    match state
        .processor
        .process(input, params.latency_ms, params.error)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err @ ProcessError::InvalidArgument(_)) => {
            tracing::warn!(error = %err, "Invalid request parameters");
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to process request");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Fixed payload of the liveness/readiness probes.
#[derive(Serialize)]
pub struct ProbeStatus {
    pub status: &'static str,
}

/// `GET /healthz` — always healthy; probes nothing.
pub async fn healthz() -> Json<ProbeStatus> {
    Json(ProbeStatus { status: "ok" })
}

/// `GET /readyz` — always ready; probes nothing.
pub async fn readyz() -> Json<ProbeStatus> {
    Json(ProbeStatus { status: "ready" })
}
