//! Uniform JSON error envelope for HTTP handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Wire shape every failed API call returns.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Builds an error response with the given status and message.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

/// Maps a slice error to `500 Internal Server Error` without leaking details.
pub fn internal_error<E: std::fmt::Display>(err: E) -> Response {
    tracing::error!(%err, "Unhandled internal error");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
