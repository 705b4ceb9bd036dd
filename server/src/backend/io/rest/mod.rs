//! # REST API Interface Layer
//!
//! HTTP endpoints for the ledger bridge. This layer handles:
//! - JSON request/response serialization
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! Business logic stays in the domain layer; handlers only translate.

pub mod account_apis;
pub mod import_apis;
pub mod system_apis;

#[cfg(test)]
pub mod test_support;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::backend::domain::ImportError;
use shared::ErrorResponse;

/// Map a domain error onto a consistent JSON error payload
pub fn error_response(err: &ImportError) -> Response {
    let status = match err {
        ImportError::Validation(_) => StatusCode::BAD_REQUEST,
        ImportError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        ImportError::Session(_) => StatusCode::BAD_GATEWAY,
        ImportError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
