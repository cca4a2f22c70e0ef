//! Per-member lock port.
//!
//! Creating coverage reads the member's latest active membership and then
//! writes a new row; two concurrent creates for the same member could
//! both read the same end date and produce overlapping coverage. Writers
//! take this lock around the read-then-write section.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::UserId;

/// Held for the duration of a coverage write. Releases on drop.
pub struct MemberLockGuard {
    _guard: OwnedMutexGuard<()>,
}

impl MemberLockGuard {
    pub fn new(guard: OwnedMutexGuard<()>) -> Self {
        Self { _guard: guard }
    }
}

#[async_trait]
pub trait MemberLock: Send + Sync {
    /// Acquire the mutual-exclusion guard for one member. Waits if
    /// another writer holds it.
    async fn acquire(&self, user_id: &UserId) -> MemberLockGuard;
}
