//! In-memory attendance log.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::attendance::CheckIn;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::AttendanceRepository;

#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    checkins: RwLock<Vec<CheckIn>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, checkin: CheckIn) {
        self.checkins
            .write()
            .expect("InMemoryAttendanceRepository lock poisoned")
            .push(checkin);
    }

    pub fn all(&self) -> Vec<CheckIn> {
        self.checkins
            .read()
            .expect("InMemoryAttendanceRepository lock poisoned")
            .clone()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn append(&self, checkin: &CheckIn) -> Result<(), DomainError> {
        self.checkins
            .write()
            .expect("InMemoryAttendanceRepository lock poisoned")
            .push(checkin.clone());
        Ok(())
    }

    async fn find_for_user_between(
        &self,
        user_id: &UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<CheckIn>, DomainError> {
        let mut rows: Vec<CheckIn> = self
            .all()
            .into_iter()
            .filter(|c| &c.user_id == user_id && c.checked_in_at >= from && c.checked_in_at < to)
            .collect();
        rows.sort_by(|a, b| a.checked_in_at.cmp(&b.checked_in_at));
        Ok(rows)
    }

    async fn last_for_user(&self, user_id: &UserId) -> Result<Option<CheckIn>, DomainError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|c| &c.user_id == user_id)
            .max_by_key(|c| c.checked_in_at))
    }
}
