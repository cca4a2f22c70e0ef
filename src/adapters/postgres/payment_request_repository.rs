//! PostgreSQL implementation of PaymentRequestRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{
    DomainError, ErrorCode, Money, PaymentRequestId, PlanId, Timestamp, UserId,
};
use crate::domain::payment::{PaymentRequest, RequestStatus};
use crate::ports::PaymentRequestRepository;

pub struct PostgresPaymentRequestRepository {
    pool: PgPool,
}

impl PostgresPaymentRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRequestRow {
    id: Uuid,
    user_id: String,
    plan_id: Uuid,
    amount_paise: i64,
    note: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    processed_by: Option<String>,
}

impl TryFrom<PaymentRequestRow> for PaymentRequest {
    type Error = DomainError;

    fn try_from(row: PaymentRequestRow) -> Result<Self, Self::Error> {
        let invalid_user = |e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        };
        Ok(PaymentRequest {
            id: PaymentRequestId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(invalid_user)?,
            plan_id: PlanId::from_uuid(row.plan_id),
            amount: Money::from_paise(row.amount_paise),
            note: row.note,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            processed_at: row.processed_at.map(Timestamp::from_datetime),
            processed_by: row
                .processed_by
                .map(UserId::new)
                .transpose()
                .map_err(invalid_user)?,
        })
    }
}

fn parse_status(s: &str) -> Result<RequestStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(RequestStatus::Pending),
        "completed" => Ok(RequestStatus::Completed),
        "rejected" => Ok(RequestStatus::Rejected),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: &RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "pending",
        RequestStatus::Completed => "completed",
        RequestStatus::Rejected => "rejected",
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, plan_id, amount_paise, note, status, created_at, processed_at, processed_by";

#[async_trait]
impl PaymentRequestRepository for PostgresPaymentRequestRepository {
    async fn save(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payment_requests (
                id, user_id, plan_id, amount_paise, note, status,
                created_at, processed_at, processed_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.user_id.as_str())
        .bind(request.plan_id.as_uuid())
        .bind(request.amount.as_paise())
        .bind(&request.note)
        .bind(status_to_string(&request.status))
        .bind(request.created_at.as_datetime())
        .bind(request.processed_at.as_ref().map(Timestamp::as_datetime))
        .bind(request.processed_by.as_ref().map(UserId::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save payment request", e))?;

        Ok(())
    }

    async fn update(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payment_requests SET
                status = $2,
                processed_at = $3,
                processed_by = $4
            WHERE id = $1
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(status_to_string(&request.status))
        .bind(request.processed_at.as_ref().map(Timestamp::as_datetime))
        .bind(request.processed_by.as_ref().map(UserId::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update payment request", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PaymentRequestNotFound,
                "Payment request not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &PaymentRequestId,
    ) -> Result<Option<PaymentRequest>, DomainError> {
        let row: Option<PaymentRequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payment_requests WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find payment request", e))?;

        row.map(PaymentRequest::try_from).transpose()
    }

    async fn list_pending(&self) -> Result<Vec<PaymentRequest>, DomainError> {
        let rows: Vec<PaymentRequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payment_requests WHERE status = 'pending' ORDER BY created_at ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list pending requests", e))?;

        rows.into_iter().map(PaymentRequest::try_from).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<PaymentRequest>, DomainError> {
        let rows: Vec<PaymentRequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payment_requests WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list payment requests", e))?;

        rows.into_iter().map(PaymentRequest::try_from).collect()
    }
}
