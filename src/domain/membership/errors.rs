//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | PlanNotFound | 404 |
//! | MemberNotFound | 404 |
//! | NotFound | 404 |
//! | NoActiveMembership | 400 |
//! | RequestNotPending | 409 |
//! | InvalidState | 409 |
//! | ValidationFailed | 400 |
//! | Forbidden | 403 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, MembershipId, PaymentRequestId, PlanId, UserId, ValidationError,
};

/// Errors from lifecycle and reconciliation operations.
#[derive(Debug, Clone, Error)]
pub enum MembershipError {
    #[error("Plan {0} not found")]
    PlanNotFound(PlanId),

    #[error("Member {0} not found")]
    MemberNotFound(UserId),

    #[error("Membership {0} not found")]
    NotFound(MembershipId),

    #[error("Member {0} has no active membership")]
    NoActiveMembership(UserId),

    #[error("Payment request {0} is not pending")]
    RequestNotPending(PaymentRequestId),

    #[error("Payment request {0} not found")]
    RequestNotFound(PaymentRequestId),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl MembershipError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error code used by the HTTP boundary for status mapping.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            MembershipError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            MembershipError::NotFound(_) => ErrorCode::MembershipNotFound,
            MembershipError::NoActiveMembership(_) => ErrorCode::NoActiveMembership,
            MembershipError::RequestNotPending(_) => ErrorCode::AlreadyProcessed,
            MembershipError::RequestNotFound(_) => ErrorCode::PaymentRequestNotFound,
            MembershipError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Forbidden(_) => ErrorCode::Forbidden,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => {
                MembershipError::Forbidden(err.message)
            }
            ErrorCode::InvalidStateTransition => MembershipError::InvalidState(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MembershipError::Infrastructure(err.message),
        }
    }
}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        MembershipError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_maps_by_code() {
        let err: MembershipError =
            DomainError::new(ErrorCode::DatabaseError, "connection refused").into();
        assert!(matches!(err, MembershipError::Infrastructure(_)));

        let err: MembershipError =
            DomainError::new(ErrorCode::InvalidStateTransition, "bad transition").into();
        assert!(matches!(err, MembershipError::InvalidState(_)));
    }

    #[test]
    fn validation_error_preserves_field() {
        let err: MembershipError = ValidationError::empty_field("name").into();
        match err {
            MembershipError::ValidationFailed { field, .. } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn code_mapping_distinguishes_not_found_variants() {
        assert_eq!(
            MembershipError::PlanNotFound(PlanId::new()).code(),
            ErrorCode::PlanNotFound
        );
        assert_eq!(
            MembershipError::NotFound(MembershipId::new()).code(),
            ErrorCode::MembershipNotFound
        );
    }
}
