//! PostgreSQL implementation of AttendanceRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::attendance::CheckIn;
use crate::domain::foundation::{AttendanceId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::AttendanceRepository;

pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CheckInRow {
    id: Uuid,
    user_id: String,
    checked_in_at: DateTime<Utc>,
}

impl TryFrom<CheckInRow> for CheckIn {
    type Error = DomainError;

    fn try_from(row: CheckInRow) -> Result<Self, Self::Error> {
        Ok(CheckIn {
            id: AttendanceId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            checked_in_at: Timestamp::from_datetime(row.checked_in_at),
        })
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn append(&self, checkin: &CheckIn) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO attendance (id, user_id, checked_in_at) VALUES ($1, $2, $3)")
            .bind(checkin.id.as_uuid())
            .bind(checkin.user_id.as_str())
            .bind(checkin.checked_in_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to append check-in", e))?;

        Ok(())
    }

    async fn find_for_user_between(
        &self,
        user_id: &UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<CheckIn>, DomainError> {
        let rows: Vec<CheckInRow> = sqlx::query_as(
            "SELECT id, user_id, checked_in_at FROM attendance \
             WHERE user_id = $1 AND checked_in_at >= $2 AND checked_in_at < $3 \
             ORDER BY checked_in_at ASC",
        )
        .bind(user_id.as_str())
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list check-ins", e))?;

        rows.into_iter().map(CheckIn::try_from).collect()
    }

    async fn last_for_user(&self, user_id: &UserId) -> Result<Option<CheckIn>, DomainError> {
        let row: Option<CheckInRow> = sqlx::query_as(
            "SELECT id, user_id, checked_in_at FROM attendance \
             WHERE user_id = $1 ORDER BY checked_in_at DESC LIMIT 1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find last check-in", e))?;

        row.map(CheckIn::try_from).transpose()
    }
}
