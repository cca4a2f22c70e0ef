//! Attendance repository port.

use async_trait::async_trait;

use crate::domain::attendance::CheckIn;
use crate::domain::foundation::{DomainError, Timestamp, UserId};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Append a check-in. The same-day duplicate rule is enforced by the
    /// handler via `find_for_user_between` before appending.
    async fn append(&self, checkin: &CheckIn) -> Result<(), DomainError>;

    /// Check-ins for a member with `checked_in_at` inside `[from, to)`.
    async fn find_for_user_between(
        &self,
        user_id: &UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<CheckIn>, DomainError>;

    /// The member's most recent check-in, if any.
    async fn last_for_user(&self, user_id: &UserId) -> Result<Option<CheckIn>, DomainError>;
}
