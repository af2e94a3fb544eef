//! Error taxonomy for the telemetry API.
//!
//! Three failure classes matter to callers and map to distinct HTTP
//! statuses:
//! - [`ApiError::Validation`] – the client sent a malformed reading; not
//!   retryable, nothing was persisted.
//! - [`ApiError::Store`] – the reading store could not complete a read or
//!   write; transient and retryable by the caller (the service itself
//!   never retries).
//! - [`ApiError::EmptyStore`] – a read-path lookup found no readings at
//!   all; a "not found" signal, not a server fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

// ---

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input to the ingestion path. Surfaced before any
    /// persistence is attempted.
    #[error("invalid reading: {0}")]
    Validation(String),

    /// The reading store could not complete an operation.
    #[error("reading store unavailable: {0}")]
    Store(#[from] sqlx::Error),

    /// No readings have ever been recorded.
    #[error("no sensor data found")]
    EmptyStore,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::EmptyStore => StatusCode::NOT_FOUND,
        };

        match &self {
            ApiError::Store(e) => tracing::error!("store failure: {e}"),
            other => tracing::debug!("request failed: {other}"),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
