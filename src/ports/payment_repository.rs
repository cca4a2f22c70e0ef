//! Payment ledger port.
//!
//! The ledger is append-only: no update or delete. Balances are always
//! recomputed from these rows.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MembershipId, Timestamp, UserId};
use crate::domain::payment::Payment;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Append a ledger entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Ledger entries for one membership, oldest first.
    async fn find_by_membership(
        &self,
        membership_id: &MembershipId,
    ) -> Result<Vec<Payment>, DomainError>;

    /// Ledger entries for one member across memberships, oldest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError>;

    /// Entries with `paid_at` inside `[from, to)`, for revenue reporting.
    async fn find_in_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Payment>, DomainError>;
}
