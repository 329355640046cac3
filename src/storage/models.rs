//! Processed request row model for persistence.
//!
//! Maps to the `platform_requests` table and is used by RequestRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One processed platform request, as persisted.
///
/// `id` is the store-assigned surrogate key; it is zero until the row has been
/// inserted and only meaningful on rows read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProcessedRequest {
    #[sqlx(default)]
    pub id: i64,
    pub request_id: String,
    pub team: String,
    #[sqlx(rename = "type")]
    pub request_type: String,
    pub urgency: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub platform_response: String,
    pub time_to_response_ms: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProcessedRequest {
    /// Creates a new row with the current timestamp, ready for insertion.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        request_id: String,
        team: String,
        request_type: String,
        urgency: String,
        title: String,
        description: String,
        platform_response: String,
        time_to_response_ms: i64,
        comment: String,
    ) -> Self {
        Self {
            id: 0,
            request_id,
            team,
            request_type,
            urgency,
            title: Some(title),
            description: Some(description),
            platform_response,
            time_to_response_ms,
            comment: Some(comment),
            created_at: Utc::now(),
        }
    }
}
