//! Payment domain events.

use crate::domain::foundation::{
    DomainEvent, EventId, MembershipId, Money, PaymentId, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::payment::PaymentMethod;
use super::receipt::ReceiptNumber;

/// Events emitted by the payment ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentEvent {
    /// A payment was appended to the ledger.
    Received {
        event_id: EventId,
        payment_id: PaymentId,
        membership_id: Option<MembershipId>,
        user_id: UserId,
        amount: Money,
        method: PaymentMethod,
        receipt_no: ReceiptNumber,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for PaymentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PaymentEvent::Received { .. } => "payment.received.v1",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        match self {
            PaymentEvent::Received { payment_id, .. } => payment_id.to_string(),
        }
    }

    fn aggregate_type(&self) -> &'static str {
        "Payment"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            PaymentEvent::Received { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            PaymentEvent::Received { event_id, .. } => event_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn received_event_envelope_routes_by_payment_id() {
        let payment_id = PaymentId::new();
        let now = Timestamp::now();
        let event = PaymentEvent::Received {
            event_id: EventId::new(),
            payment_id,
            membership_id: Some(MembershipId::new()),
            user_id: UserId::new("user-1").unwrap(),
            amount: Money::from_rupees(500),
            method: PaymentMethod::Upi,
            receipt_no: ReceiptNumber::from_string("GYM-20260115-deadbeef"),
            occurred_at: now,
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "payment.received.v1");
        assert_eq!(envelope.aggregate_type, "Payment");
        assert_eq!(envelope.aggregate_id, payment_id.to_string());
    }
}
