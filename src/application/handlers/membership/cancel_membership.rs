//! CancelMembershipHandler - admin cancellation of a membership.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{
    EventId, MembershipId, Principal, SerializableDomainEvent,
};
use crate::domain::membership::{MembershipError, MembershipEvent};
use crate::ports::{Clock, EventPublisher, MembershipRepository};

#[derive(Debug, Clone)]
pub struct CancelMembershipCommand {
    pub principal: Principal,
    pub membership_id: MembershipId,
}

/// Cancels a membership. Cancelling an already-cancelled membership is
/// an idempotent success; cancelling a revoked one is rejected.
pub struct CancelMembershipHandler {
    memberships: Arc<dyn MembershipRepository>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CancelMembershipHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            memberships,
            publisher,
            clock,
        }
    }

    pub async fn handle(&self, cmd: CancelMembershipCommand) -> Result<(), MembershipError> {
        cmd.principal.require_admin()?;

        let mut membership = self
            .memberships
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or(MembershipError::NotFound(cmd.membership_id))?;

        let was_active = membership.is_active();
        membership.cancel()?;
        self.memberships.update(&membership).await?;

        // Only the transition itself notifies; an idempotent re-cancel
        // stays silent.
        if was_active {
            let envelope = MembershipEvent::Cancelled {
                event_id: EventId::new(),
                membership_id: membership.id,
                user_id: membership.user_id.clone(),
                occurred_at: self.clock.now(),
            }
            .to_envelope();
            if let Err(err) = self.publisher.publish(envelope).await {
                warn!(error = %err, "event publish failed");
            }
        }
        Ok(())
    }
}
