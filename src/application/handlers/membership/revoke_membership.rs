//! RevokeMembershipHandler - admin withdrawal of active coverage.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{EventId, Principal, SerializableDomainEvent, UserId};
use crate::domain::membership::{MembershipError, MembershipEvent};
use crate::ports::{Clock, EventPublisher, MemberLock, MembershipRepository};

#[derive(Debug, Clone)]
pub struct RevokeMembershipCommand {
    pub principal: Principal,
    pub user_id: UserId,
}

/// Revokes the member's active membership (the latest-ending one).
/// Fails with `NoActiveMembership` when the member has none.
pub struct RevokeMembershipHandler {
    memberships: Arc<dyn MembershipRepository>,
    locks: Arc<dyn MemberLock>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RevokeMembershipHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        locks: Arc<dyn MemberLock>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            memberships,
            locks,
            publisher,
            clock,
        }
    }

    pub async fn handle(&self, cmd: RevokeMembershipCommand) -> Result<(), MembershipError> {
        cmd.principal.require_admin()?;

        let _lock = self.locks.acquire(&cmd.user_id).await;
        let now = self.clock.now();

        let mut membership = self
            .memberships
            .find_active_by_user(&cmd.user_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MembershipError::NoActiveMembership(cmd.user_id.clone()))?;

        membership.revoke(now)?;
        self.memberships.update(&membership).await?;

        let envelope = MembershipEvent::Revoked {
            event_id: EventId::new(),
            membership_id: membership.id,
            user_id: membership.user_id.clone(),
            occurred_at: now,
        }
        .to_envelope();
        if let Err(err) = self.publisher.publish(envelope).await {
            warn!(error = %err, "event publish failed");
        }
        Ok(())
    }
}
