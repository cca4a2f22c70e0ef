//! CreateMembershipHandler - creates (or queues) coverage for a member.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{
    EventId, MembershipId, PaymentId, Principal, SerializableDomainEvent, TimeZoneOffset,
    Timestamp, UserId,
};
use crate::domain::membership::{
    Membership, MembershipError, MembershipEvent, MembershipPeriod, PriceQuote,
};
use crate::domain::payment::{Payment, PaymentEvent, PaymentMethod, ReceiptNumber};
use crate::ports::{
    Clock, EventPublisher, MemberDirectory, MemberLock, MembershipRepository, PaymentRepository,
    PlanRepository,
};

use super::MembershipView;

/// Command to create a membership for a member on a plan.
///
/// `custom_start`/`custom_end` together select the import path for
/// memberships sold before the system existed; the dates are trusted
/// verbatim. Otherwise the start chains from the member's latest-ending
/// active membership, or is "now".
#[derive(Debug, Clone)]
pub struct CreateMembershipCommand {
    pub principal: Principal,
    pub user_id: UserId,
    pub plan_id: crate::domain::foundation::PlanId,
    pub discount_amount: crate::domain::foundation::Money,
    /// Zero means no initial payment.
    pub initial_payment: crate::domain::foundation::Money,
    pub payment_method: PaymentMethod,
    pub payment_date: Option<Timestamp>,
    pub custom_start: Option<Timestamp>,
    pub custom_end: Option<Timestamp>,
}

/// Handler for membership creation.
///
/// The read-compute-write sequence runs under the member's advisory lock
/// so two concurrent creates cannot both chain from the same prior
/// coverage.
pub struct CreateMembershipHandler {
    plans: Arc<dyn PlanRepository>,
    directory: Arc<dyn MemberDirectory>,
    memberships: Arc<dyn MembershipRepository>,
    payments: Arc<dyn PaymentRepository>,
    locks: Arc<dyn MemberLock>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    receipt_prefix: String,
    tz: TimeZoneOffset,
}

impl CreateMembershipHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plans: Arc<dyn PlanRepository>,
        directory: Arc<dyn MemberDirectory>,
        memberships: Arc<dyn MembershipRepository>,
        payments: Arc<dyn PaymentRepository>,
        locks: Arc<dyn MemberLock>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        receipt_prefix: impl Into<String>,
        tz: TimeZoneOffset,
    ) -> Self {
        Self {
            plans,
            directory,
            memberships,
            payments,
            locks,
            publisher,
            clock,
            receipt_prefix: receipt_prefix.into(),
            tz,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateMembershipCommand,
    ) -> Result<MembershipView, MembershipError> {
        cmd.principal.require_admin()?;

        // Held for the whole read-compute-write sequence.
        let _lock = self.locks.acquire(&cmd.user_id).await;

        let now = self.clock.now();

        // Preconditions before any write.
        let plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await?
            .ok_or(MembershipError::PlanNotFound(cmd.plan_id))?;
        let mut profile = self
            .directory
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| MembershipError::MemberNotFound(cmd.user_id.clone()))?;

        let quote = PriceQuote::new(plan.price, cmd.discount_amount)?;

        let period = match (cmd.custom_start, cmd.custom_end) {
            (Some(start), Some(end)) => MembershipPeriod::new(start, end)?,
            _ => {
                let active = self.memberships.find_active_by_user(&cmd.user_id).await?;
                // Latest end wins; coverage chains from it, else starts now.
                let start = active.first().map(|m| m.end_date).unwrap_or(now);
                MembershipPeriod::from_duration(start, plan.duration_days)
            }
        };

        let membership = Membership::create(
            MembershipId::new(),
            cmd.user_id.clone(),
            cmd.plan_id,
            period,
            quote,
            now,
        );
        self.memberships.save(&membership).await?;

        if let Some(sessions) = plan.pt_sessions {
            profile.grant_pt_sessions(sessions);
            self.directory.update(&profile).await?;
        }

        let mut recorded = Vec::new();
        if cmd.initial_payment.is_positive() {
            let paid_at = cmd.payment_date.unwrap_or(now);
            let receipt_no =
                ReceiptNumber::generate(&self.receipt_prefix, self.tz.local_date(&paid_at));
            let payment = Payment::new(
                PaymentId::new(),
                Some(membership.id),
                cmd.user_id.clone(),
                cmd.initial_payment,
                paid_at,
                cmd.payment_method.clone(),
                None,
                receipt_no.clone(),
                Some(cmd.principal.user_id.clone()),
            )?;
            self.payments.append(&payment).await?;

            self.publish_best_effort(
                PaymentEvent::Received {
                    event_id: EventId::new(),
                    payment_id: payment.id,
                    membership_id: payment.membership_id,
                    user_id: payment.user_id.clone(),
                    amount: payment.amount,
                    method: payment.method.clone(),
                    receipt_no,
                    occurred_at: now,
                }
                .to_envelope(),
            )
            .await;
            recorded.push(payment);
        }

        self.publish_best_effort(
            MembershipEvent::Activated {
                event_id: EventId::new(),
                membership_id: membership.id,
                user_id: membership.user_id.clone(),
                plan_name: plan.name.clone(),
                start_date: membership.start_date,
                end_date: membership.end_date,
                final_price: membership.final_price,
                occurred_at: now,
            }
            .to_envelope(),
        )
        .await;

        Ok(MembershipView::from_parts(&membership, plan.name, &recorded))
    }

    async fn publish_best_effort(&self, envelope: crate::domain::foundation::EventEnvelope) {
        if let Err(err) = self.publisher.publish(envelope).await {
            warn!(error = %err, "event publish failed");
        }
    }
}
