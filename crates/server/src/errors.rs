use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::{ErrorKind, ServiceError};
use thiserror::Error;
use tracing::error;

/// JSON error response: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match e.kind() {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Duplicated | ErrorKind::Timeout | ErrorKind::Internal => {
                error!(err = %e, "transfer operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_kinds_map_to_status() {
        let cases = [
            (ServiceError::bad_request("x"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("transfer"), StatusCode::NOT_FOUND),
            (ServiceError::Duplicated("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Timeout("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (e, status) in cases {
            assert_eq!(ApiError::from(e).status, status);
        }
    }

    #[test]
    fn message_is_the_service_message() {
        let e = ServiceError::not_found("transfer").context("error getting transfer 1 from repository");
        let api = ApiError::from(e);
        assert_eq!(api.message, "error getting transfer 1 from repository: transfer not found");
    }
}
