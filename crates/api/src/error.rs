//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::SalesError;

const INTERNAL_MESSAGE: &str = "internal server error";

/// API-level error type that maps to HTTP responses.
///
/// Every response body has the shape `{"error": "<message>"}`. Internal
/// failures are logged with their details and answered with a generic
/// message.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Sales domain error.
    Sales(SalesError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Sales(err) => sales_error_to_response(err),
        };

        metrics::counter!("http_errors_total", "status" => status.as_u16().to_string())
            .increment(1);
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn sales_error_to_response(err: SalesError) -> (StatusCode, String) {
    match &err {
        SalesError::InvalidAmount { .. }
        | SalesError::InvalidStatus { .. }
        | SalesError::EmptyKey
        | SalesError::OwnerNotFound(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        SalesError::SaleNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        SalesError::InvalidTransition { .. } | SalesError::VersionConflict { .. } => {
            (StatusCode::CONFLICT, err.to_string())
        }
        SalesError::OwnerLookup { .. } => {
            tracing::debug!(error = %err, "answering with internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

impl From<SalesError> for ApiError {
    fn from(err: SalesError) -> Self {
        ApiError::Sales(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
