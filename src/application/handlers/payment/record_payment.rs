//! RecordPaymentHandler - appends a payment to the ledger.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{
    EventId, Money, PaymentId, Principal, SerializableDomainEvent, TimeZoneOffset, UserId,
};
use crate::domain::membership::MembershipError;
use crate::domain::payment::{Payment, PaymentEvent, PaymentMethod, ReceiptNumber};
use crate::ports::{
    Clock, EventPublisher, MemberLock, MembershipRepository, PaymentRepository,
};

#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub principal: Principal,
    pub user_id: UserId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub notes: Option<String>,
}

/// Appends a ledger entry tagged with the member's current active
/// membership, or unlinked when none is active. Pure append: no existing
/// payment or membership row is mutated.
pub struct RecordPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    memberships: Arc<dyn MembershipRepository>,
    locks: Arc<dyn MemberLock>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    receipt_prefix: String,
    tz: TimeZoneOffset,
}

impl RecordPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        memberships: Arc<dyn MembershipRepository>,
        locks: Arc<dyn MemberLock>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        receipt_prefix: impl Into<String>,
        tz: TimeZoneOffset,
    ) -> Self {
        Self {
            payments,
            memberships,
            locks,
            publisher,
            clock,
            receipt_prefix: receipt_prefix.into(),
            tz,
        }
    }

    pub async fn handle(&self, cmd: RecordPaymentCommand) -> Result<Payment, MembershipError> {
        cmd.principal.require_admin()?;

        let _lock = self.locks.acquire(&cmd.user_id).await;
        let now = self.clock.now();

        let membership_id = self
            .memberships
            .find_active_by_user(&cmd.user_id)
            .await?
            .into_iter()
            .next()
            .map(|m| m.id);

        let receipt_no = ReceiptNumber::generate(&self.receipt_prefix, self.tz.local_date(&now));
        let payment = Payment::new(
            PaymentId::new(),
            membership_id,
            cmd.user_id.clone(),
            cmd.amount,
            now,
            cmd.method.clone(),
            cmd.notes.clone(),
            receipt_no.clone(),
            Some(cmd.principal.user_id.clone()),
        )?;
        self.payments.append(&payment).await?;

        let envelope = PaymentEvent::Received {
            event_id: EventId::new(),
            payment_id: payment.id,
            membership_id,
            user_id: cmd.user_id,
            amount: cmd.amount,
            method: cmd.method,
            receipt_no,
            occurred_at: now,
        }
        .to_envelope();
        if let Err(err) = self.publisher.publish(envelope).await {
            warn!(error = %err, "event publish failed");
        }

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryMemberLock, InMemoryMembershipRepository, InMemoryPaymentRepository,
    };
    use crate::domain::foundation::{MembershipId, PlanId, Role, Timestamp};
    use crate::domain::membership::{Membership, MembershipPeriod, PriceQuote};
    use crate::domain::payment::reconcile;

    fn admin() -> Principal {
        Principal::new(UserId::new("admin-1").unwrap(), Role::Admin)
    }

    fn member_id() -> UserId {
        UserId::new("member-1").unwrap()
    }

    struct Fixture {
        payments: Arc<InMemoryPaymentRepository>,
        memberships: Arc<InMemoryMembershipRepository>,
        bus: Arc<InMemoryEventBus>,
        handler: RecordPaymentHandler,
    }

    fn fixture() -> Fixture {
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = RecordPaymentHandler::new(
            payments.clone(),
            memberships.clone(),
            Arc::new(InMemoryMemberLock::new()),
            bus.clone(),
            Arc::new(FixedClock::at(Timestamp::now())),
            "GYM",
            TimeZoneOffset::ist(),
        );
        Fixture {
            payments,
            memberships,
            bus,
            handler,
        }
    }

    fn active_membership() -> Membership {
        let now = Timestamp::now();
        Membership::create(
            MembershipId::new(),
            member_id(),
            PlanId::new(),
            MembershipPeriod::from_duration(now, 30),
            PriceQuote::new(Money::from_rupees(900), Money::from_paise(0)).unwrap(),
            now,
        )
    }

    fn command(amount: i64) -> RecordPaymentCommand {
        RecordPaymentCommand {
            principal: admin(),
            user_id: member_id(),
            amount: Money::from_rupees(amount),
            method: PaymentMethod::Cash,
            notes: None,
        }
    }

    #[tokio::test]
    async fn tags_active_membership_and_decreases_due() {
        let fx = fixture();
        let membership = active_membership();
        let membership_id = membership.id;
        let final_price = membership.final_price;
        fx.memberships.seed(membership);

        fx.handler.handle(command(500)).await.unwrap();
        fx.handler.handle(command(400)).await.unwrap();

        let ledger = fx
            .payments
            .find_by_membership(&membership_id)
            .await
            .unwrap();
        assert_eq!(ledger.len(), 2);
        let summary = reconcile(final_price, &ledger);
        assert_eq!(summary.amount_due, Money::from_paise(0));
        assert_eq!(fx.bus.events_of_type("payment.received.v1").len(), 2);
    }

    #[tokio::test]
    async fn no_active_membership_records_unlinked() {
        let fx = fixture();
        let payment = fx.handler.handle(command(100)).await.unwrap();
        assert!(payment.membership_id.is_none());
        assert_eq!(fx.payments.all().len(), 1);
    }

    #[tokio::test]
    async fn overpayment_is_permitted() {
        let fx = fixture();
        let membership = active_membership();
        let membership_id = membership.id;
        let final_price = membership.final_price;
        fx.memberships.seed(membership);

        fx.handler.handle(command(1000)).await.unwrap();
        let ledger = fx
            .payments
            .find_by_membership(&membership_id)
            .await
            .unwrap();
        let summary = reconcile(final_price, &ledger);
        assert_eq!(summary.amount_due, Money::from_rupees(-100));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let fx = fixture();
        let err = fx.handler.handle(command(0)).await.unwrap_err();
        assert!(matches!(err, MembershipError::ValidationFailed { .. }));
        assert!(fx.payments.all().is_empty());
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let fx = fixture();
        let mut cmd = command(100);
        cmd.principal = Principal::new(member_id(), Role::Member);
        let err = fx.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, MembershipError::Forbidden(_)));
    }
}
