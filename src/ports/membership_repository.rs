//! Membership repository port.
//!
//! Persistence contract for `Membership` aggregates. A member may hold
//! several rows with status `active` at once (current coverage plus
//! queued renewals); what must never happen is two active rows whose
//! date ranges overlap. Writers serialize per-member through
//! [`crate::ports::MemberLock`], so implementations do not need their
//! own uniqueness constraint on (user, status).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MembershipId, Timestamp, UserId};
use crate::domain::membership::Membership;

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Persist a new membership.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update an existing membership (status transitions).
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the row does not exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// All memberships ever held by the user, newest `end_date` first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError>;

    /// Memberships with status `active` for the user, newest `end_date`
    /// first. Includes queued renewals whose `start_date` is in the
    /// future.
    async fn find_active_by_user(&self, user_id: &UserId)
        -> Result<Vec<Membership>, DomainError>;

    /// Active memberships whose `end_date` falls inside `[from, to)`,
    /// across all members. Drives the renewal-reminder sweep.
    async fn find_ending_within(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Membership>, DomainError>;
}
