//! Attendance errors.

use thiserror::Error;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors from attendance marking and the absentee report.
#[derive(Debug, Clone, Error)]
pub enum AttendanceError {
    #[error("No member matches '{0}'")]
    MemberNotFound(String),

    #[error("Member {user_id} already checked in on {date}")]
    AlreadyMarked { user_id: UserId, date: NaiveDate },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl AttendanceError {
    /// Error code used by the HTTP boundary for status mapping.
    pub fn code(&self) -> ErrorCode {
        match self {
            AttendanceError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            AttendanceError::AlreadyMarked { .. } => ErrorCode::AlreadyMarked,
            AttendanceError::Forbidden(_) => ErrorCode::Forbidden,
            AttendanceError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for AttendanceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => {
                AttendanceError::Forbidden(err.message)
            }
            _ => AttendanceError::Infrastructure(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_marked_maps_to_conflict_code() {
        let err = AttendanceError::AlreadyMarked {
            user_id: UserId::new("u-1").unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        };
        assert_eq!(err.code(), ErrorCode::AlreadyMarked);
    }

    #[test]
    fn forbidden_domain_error_stays_forbidden() {
        let err: AttendanceError =
            DomainError::new(ErrorCode::Forbidden, "admin only").into();
        assert!(matches!(err, AttendanceError::Forbidden(_)));
    }
}
