//! PostgreSQL implementation of MembershipRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{
    DomainError, ErrorCode, MembershipId, Money, PlanId, Timestamp, UserId,
};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::MembershipRepository;

pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: String,
    plan_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
    original_price_paise: i64,
    discount_paise: i64,
    final_price_paise: i64,
    created_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            plan_id: PlanId::from_uuid(row.plan_id),
            start_date: Timestamp::from_datetime(row.start_date),
            end_date: Timestamp::from_datetime(row.end_date),
            status: parse_status(&row.status)?,
            original_price: Money::from_paise(row.original_price_paise),
            discount_amount: Money::from_paise(row.discount_paise),
            final_price: Money::from_paise(row.final_price_paise),
            created_at: Timestamp::from_datetime(row.created_at),
            revoked_at: row.revoked_at.map(Timestamp::from_datetime),
        })
    }
}

fn parse_status(s: &str) -> Result<MembershipStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "active" => Ok(MembershipStatus::Active),
        "cancelled" => Ok(MembershipStatus::Cancelled),
        "revoked" => Ok(MembershipStatus::Revoked),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: &MembershipStatus) -> &'static str {
    match status {
        MembershipStatus::Active => "active",
        MembershipStatus::Cancelled => "cancelled",
        MembershipStatus::Revoked => "revoked",
    }
}

const SELECT_COLUMNS: &str = "id, user_id, plan_id, start_date, end_date, status, \
     original_price_paise, discount_paise, final_price_paise, created_at, revoked_at";

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, user_id, plan_id, start_date, end_date, status,
                original_price_paise, discount_paise, final_price_paise,
                created_at, revoked_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.user_id.as_str())
        .bind(membership.plan_id.as_uuid())
        .bind(membership.start_date.as_datetime())
        .bind(membership.end_date.as_datetime())
        .bind(status_to_string(&membership.status))
        .bind(membership.original_price.as_paise())
        .bind(membership.discount_amount.as_paise())
        .bind(membership.final_price.as_paise())
        .bind(membership.created_at.as_datetime())
        .bind(membership.revoked_at.as_ref().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save membership", e))?;

        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships SET
                status = $2,
                start_date = $3,
                end_date = $4,
                revoked_at = $5
            WHERE id = $1
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(status_to_string(&membership.status))
        .bind(membership.start_date.as_datetime())
        .bind(membership.end_date.as_datetime())
        .bind(membership.revoked_at.as_ref().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update membership", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships WHERE user_id = $1 ORDER BY end_date DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list memberships", e))?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships \
             WHERE user_id = $1 AND status = 'active' ORDER BY end_date DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list active memberships", e))?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn find_ending_within(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships \
             WHERE status = 'active' AND end_date >= $1 AND end_date < $2 \
             ORDER BY end_date ASC",
            SELECT_COLUMNS
        ))
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find expiring memberships", e))?;

        rows.into_iter().map(Membership::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_accepts_all_values() {
        assert_eq!(parse_status("active").unwrap(), MembershipStatus::Active);
        assert_eq!(
            parse_status("cancelled").unwrap(),
            MembershipStatus::Cancelled
        );
        assert_eq!(parse_status("revoked").unwrap(), MembershipStatus::Revoked);
        assert_eq!(parse_status("ACTIVE").unwrap(), MembershipStatus::Active);
    }

    #[test]
    fn parse_status_rejects_invalid_values() {
        assert!(parse_status("expired").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn status_strings_roundtrip() {
        for status in [
            MembershipStatus::Active,
            MembershipStatus::Cancelled,
            MembershipStatus::Revoked,
        ] {
            let parsed = parse_status(status_to_string(&status)).unwrap();
            assert_eq!(status, parsed);
        }
    }
}
