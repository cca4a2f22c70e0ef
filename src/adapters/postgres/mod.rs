//! PostgreSQL persistence adapters.
//!
//! One adapter per repository port, all sharing a `PgPool`. Rows map to
//! domain types through `TryFrom`, so a corrupt row surfaces as a
//! `DatabaseError` instead of a panic.

mod attendance_repository;
mod member_directory;
mod membership_repository;
mod payment_repository;
mod payment_request_repository;
mod plan_repository;
mod sweep_state;

pub use attendance_repository::PostgresAttendanceRepository;
pub use member_directory::PostgresMemberDirectory;
pub use membership_repository::PostgresMembershipRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use payment_request_repository::PostgresPaymentRequestRepository;
pub use plan_repository::PostgresPlanRepository;
pub use sweep_state::PostgresSweepState;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Builds a connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to connect to database: {}", e),
            )
        })
}

pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}
