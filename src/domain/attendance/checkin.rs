//! Check-in records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AttendanceId, Timestamp, UserId};

/// A single gym visit. At most one per member per local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: AttendanceId,
    pub user_id: UserId,
    pub checked_in_at: Timestamp,
}

impl CheckIn {
    pub fn new(id: AttendanceId, user_id: UserId, checked_in_at: Timestamp) -> Self {
        Self {
            id,
            user_id,
            checked_in_at,
        }
    }
}
