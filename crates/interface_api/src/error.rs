//! Translation of domain errors into HTTP responses
//!
//! Handlers return `ApiError` and the `From<BillingError>` impl decides the
//! status code, so the mapping lives in one place instead of per handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_billing::BillingError;
use domain_client::ClientError;

/// Errors a handler can surface to the client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON body every error response carries
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        if err.is_not_found() {
            return ApiError::NotFound(err.to_string());
        }
        match err {
            BillingError::Client(ClientError::MissingBillingDetails(_)) => {
                ApiError::BadRequest(err.to_string())
            }
            BillingError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_billing::PortError;

    #[test]
    fn test_missing_record_maps_to_404() {
        let err: ApiError = BillingError::from(PortError::not_found("Project", "abc")).into();
        assert!(matches!(err, ApiError::NotFound(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unbillable_client_maps_to_400() {
        let err: ApiError =
            BillingError::from(ClientError::MissingBillingDetails("abc".to_string())).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_storage_failure_maps_to_500() {
        let err: ApiError = BillingError::from(PortError::storage("connection reset")).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
