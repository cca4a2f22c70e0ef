//! PostgreSQL implementation of SweepStateStore.
//!
//! Single-row table; an upsert keeps the latest completed sweep date.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::db_error;
use crate::domain::foundation::DomainError;
use crate::ports::SweepStateStore;

pub struct PostgresSweepState {
    pool: PgPool,
}

impl PostgresSweepState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SweepStateStore for PostgresSweepState {
    async fn last_run(&self) -> Result<Option<NaiveDate>, DomainError> {
        let row: Option<(NaiveDate,)> =
            sqlx::query_as("SELECT last_run FROM sweep_state WHERE id = TRUE")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to read sweep state", e))?;

        Ok(row.map(|(date,)| date))
    }

    async fn record_run(&self, date: NaiveDate) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sweep_state (id, last_run) VALUES (TRUE, $1)
            ON CONFLICT (id) DO UPDATE SET last_run = EXCLUDED.last_run
            "#,
        )
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record sweep run", e))?;

        Ok(())
    }
}
