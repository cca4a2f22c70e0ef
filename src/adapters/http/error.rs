//! Error-to-status mapping shared by all routers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::membership::MembershipError;

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Uniform API error: an `ErrorCode` plus a human-readable message.
#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code,
            message: err.message,
        }
    }
}

fn status_for(code: &ErrorCode) -> StatusCode {
    match code {
        ErrorCode::PlanNotFound
        | ErrorCode::MemberNotFound
        | ErrorCode::MembershipNotFound
        | ErrorCode::PaymentRequestNotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyMarked
        | ErrorCode::AlreadyProcessed
        | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::NoActiveMembership => StatusCode::BAD_REQUEST,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(&self.code);
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        let body = ErrorResponse::new(self.code.to_string(), self.message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_map_to_404() {
        assert_eq!(status_for(&ErrorCode::PlanNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&ErrorCode::MemberNotFound),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn conflict_codes_map_to_409() {
        assert_eq!(status_for(&ErrorCode::AlreadyMarked), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&ErrorCode::AlreadyProcessed),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ErrorCode::InvalidStateTransition),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(status_for(&ErrorCode::Forbidden), StatusCode::FORBIDDEN);
    }

    #[test]
    fn membership_error_carries_its_code() {
        let err = MembershipError::NoActiveMembership(
            crate::domain::foundation::UserId::new("u-1").unwrap(),
        );
        let api: ApiError = err.into();
        assert_eq!(status_for(&api.code), StatusCode::BAD_REQUEST);
    }
}
