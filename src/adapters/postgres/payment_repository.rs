//! PostgreSQL implementation of the append-only payment ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{
    DomainError, ErrorCode, MembershipId, Money, PaymentId, Timestamp, UserId,
};
use crate::domain::payment::{Payment, PaymentMethod, ReceiptNumber};
use crate::ports::PaymentRepository;

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    membership_id: Option<Uuid>,
    user_id: String,
    amount_paise: i64,
    paid_at: DateTime<Utc>,
    method: String,
    notes: Option<String>,
    receipt_no: String,
    recorded_by: Option<String>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let invalid_user = |e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        };
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            membership_id: row.membership_id.map(MembershipId::from_uuid),
            user_id: UserId::new(row.user_id).map_err(invalid_user)?,
            amount: Money::from_paise(row.amount_paise),
            paid_at: Timestamp::from_datetime(row.paid_at),
            method: PaymentMethod::from(row.method),
            notes: row.notes,
            receipt_no: ReceiptNumber::from_string(row.receipt_no),
            recorded_by: row
                .recorded_by
                .map(UserId::new)
                .transpose()
                .map_err(invalid_user)?,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, membership_id, user_id, amount_paise, paid_at, method, notes, receipt_no, recorded_by";

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn append(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, membership_id, user_id, amount_paise, paid_at,
                method, notes, receipt_no, recorded_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.membership_id.as_ref().map(MembershipId::as_uuid))
        .bind(payment.user_id.as_str())
        .bind(payment.amount.as_paise())
        .bind(payment.paid_at.as_datetime())
        .bind(payment.method.to_string())
        .bind(&payment.notes)
        .bind(payment.receipt_no.as_str())
        .bind(payment.recorded_by.as_ref().map(UserId::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to append payment", e))?;

        Ok(())
    }

    async fn find_by_membership(
        &self,
        membership_id: &MembershipId,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE membership_id = $1 ORDER BY paid_at ASC",
            SELECT_COLUMNS
        ))
        .bind(membership_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE user_id = $1 ORDER BY paid_at ASC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn find_in_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE paid_at >= $1 AND paid_at < $2 ORDER BY paid_at ASC",
            SELECT_COLUMNS
        ))
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}
