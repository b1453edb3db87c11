//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that maps upstream failures onto HTTP
//! responses carrying the upstream's own diagnostics (URI, headers, raw
//! body). Server-side failures are captured to Sentry before responding.
//! All route handlers return `Result<T, AppError>`.

use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::upstream::{ErrorKind, UpstreamError, UpstreamService};

/// Application-level error type for the search gateway.
#[derive(Debug, Error)]
pub enum AppError {
    /// A primary upstream call failed; its classification decides the
    /// response status.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Anything not classifiable as an upstream failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire shape of error responses.
///
/// Mirrors the upstream diagnostics carried by [`UpstreamError`]; the
/// optional fields are omitted when no upstream response was involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Internal error code, e.g. `MS-01-101`.
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Status returned to the caller.
    pub http_status: u16,
    /// Upstream URI that failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Response headers of the failed upstream call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Raw response body of the failed upstream call, never parsed further.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
}

/// Error code for anything without a more specific classification.
pub const UNKNOWN_ERROR: &str = "MS-01-000";

/// Per-service, per-kind error code, following the `MS-01-xyz` scheme:
/// `x` identifies the upstream, `y z` the failure kind.
#[must_use]
pub const fn error_code(service: UpstreamService, kind: &ErrorKind) -> &'static str {
    match (service, kind) {
        (UpstreamService::Products, ErrorKind::InvalidRequest) => "MS-01-100",
        (UpstreamService::Products, ErrorKind::NotFound) => "MS-01-101",
        (UpstreamService::Products, ErrorKind::Upstream { .. }) => "MS-01-102",
        (UpstreamService::Categories, ErrorKind::InvalidRequest) => "MS-01-200",
        (UpstreamService::Categories, ErrorKind::NotFound) => "MS-01-201",
        (UpstreamService::Categories, ErrorKind::Upstream { .. }) => "MS-01-202",
        (UpstreamService::Sellers, ErrorKind::InvalidRequest) => "MS-01-300",
        (UpstreamService::Sellers, ErrorKind::NotFound) => "MS-01-301",
        (UpstreamService::Sellers, ErrorKind::Upstream { .. }) => "MS-01-302",
        (UpstreamService::Reviews, ErrorKind::InvalidRequest) => "MS-01-400",
        (UpstreamService::Reviews, ErrorKind::NotFound) => "MS-01-401",
        (UpstreamService::Reviews, ErrorKind::Upstream { .. }) => "MS-01-402",
        (UpstreamService::Qa, ErrorKind::InvalidRequest) => "MS-01-500",
        (UpstreamService::Qa, ErrorKind::NotFound) => "MS-01-501",
        (UpstreamService::Qa, ErrorKind::Upstream { .. }) => "MS-01-502",
    }
}

const fn status_for(kind: &ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Upstream { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry; NotFound/InvalidRequest
        // are caller errors and stay out of error tracking.
        let is_server_error = match &self {
            Self::Upstream(err) => matches!(err.kind, ErrorKind::Upstream { .. }),
            Self::Internal(_) => true,
        };
        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self {
            Self::Upstream(err) => {
                let status = status_for(&err.kind);
                let body = ErrorResponse {
                    code: error_code(err.service, &err.kind).to_owned(),
                    description: err.to_string(),
                    http_status: status.as_u16(),
                    uri: Some(err.uri),
                    headers: (!err.headers.is_empty()).then_some(err.headers),
                    response_body: (!err.body.is_empty()).then_some(err.body),
                };
                (status, Json(body)).into_response()
            }
            // Don't expose internal error details to clients
            Self::Internal(_) => {
                let body = ErrorResponse {
                    code: UNKNOWN_ERROR.to_owned(),
                    description: "Internal server error".to_owned(),
                    http_status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    uri: None,
                    headers: None,
                    response_body: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
