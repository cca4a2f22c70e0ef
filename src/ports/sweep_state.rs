//! Sweep state port.
//!
//! The daily sweep records the last local date it ran so a restart the
//! same day does not send reminders twice.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::DomainError;

#[async_trait]
pub trait SweepStateStore: Send + Sync {
    /// The local date of the last completed sweep, if one has run.
    async fn last_run(&self) -> Result<Option<NaiveDate>, DomainError>;

    /// Record a completed sweep for `date`.
    async fn record_run(&self, date: NaiveDate) -> Result<(), DomainError>;
}
