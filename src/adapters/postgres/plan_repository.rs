//! PostgreSQL implementation of PlanRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{DomainError, ErrorCode, Money, PlanId, Timestamp};
use crate::domain::plan::Plan;
use crate::ports::PlanRepository;

pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    name: String,
    duration_days: i32,
    price_paise: i64,
    active: bool,
    pt_sessions: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PlanRow> for Plan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let duration_days = u32::try_from(row.duration_days).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid duration_days: {}", row.duration_days),
            )
        })?;
        let pt_sessions = row
            .pt_sessions
            .map(|n| {
                u32::try_from(n).map_err(|_| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid pt_sessions: {}", n),
                    )
                })
            })
            .transpose()?;

        Ok(Plan {
            id: PlanId::from_uuid(row.id),
            name: row.name,
            duration_days,
            price: Money::from_paise(row.price_paise),
            active: row.active,
            pt_sessions,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn save(&self, plan: &Plan) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO plans (id, name, duration_days, price_paise, active, pt_sessions, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(plan.id.as_uuid())
        .bind(&plan.name)
        .bind(plan.duration_days as i32)
        .bind(plan.price.as_paise())
        .bind(plan.active)
        .bind(plan.pt_sessions.map(|n| n as i32))
        .bind(plan.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save plan", e))?;

        Ok(())
    }

    async fn update(&self, plan: &Plan) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE plans SET
                name = $2,
                duration_days = $3,
                price_paise = $4,
                active = $5,
                pt_sessions = $6
            WHERE id = $1
            "#,
        )
        .bind(plan.id.as_uuid())
        .bind(&plan.name)
        .bind(plan.duration_days as i32)
        .bind(plan.price.as_paise())
        .bind(plan.active)
        .bind(plan.pt_sessions.map(|n| n as i32))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update plan", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PlanNotFound, "Plan not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            "SELECT id, name, duration_days, price_paise, active, pt_sessions, created_at \
             FROM plans WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find plan", e))?;

        row.map(Plan::try_from).transpose()
    }

    async fn list_active(&self) -> Result<Vec<Plan>, DomainError> {
        let rows: Vec<PlanRow> = sqlx::query_as(
            "SELECT id, name, duration_days, price_paise, active, pt_sessions, created_at \
             FROM plans WHERE active ORDER BY price_paise ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list plans", e))?;

        rows.into_iter().map(Plan::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_duration_is_rejected() {
        let row = PlanRow {
            id: Uuid::new_v4(),
            name: "Monthly".to_string(),
            duration_days: -1,
            price_paise: 100_000,
            active: true,
            pt_sessions: None,
            created_at: Utc::now(),
        };
        assert!(Plan::try_from(row).is_err());
    }

    #[test]
    fn valid_row_maps_to_plan() {
        let row = PlanRow {
            id: Uuid::new_v4(),
            name: "Quarterly".to_string(),
            duration_days: 90,
            price_paise: 250_000,
            active: true,
            pt_sessions: Some(12),
            created_at: Utc::now(),
        };
        let plan = Plan::try_from(row).unwrap();
        assert_eq!(plan.duration_days, 90);
        assert_eq!(plan.pt_sessions, Some(12));
    }
}
