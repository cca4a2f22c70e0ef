//! Membership lifecycle events.
//!
//! Emitted on lifecycle changes and consumed by the notification
//! dispatcher. Events are named in past tense: something that has already
//! happened. Publishing is best-effort; consumers may see duplicates.

use crate::domain::foundation::{
    DomainEvent, EventId, MembershipId, Money, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// Events that occur during the membership lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipEvent {
    /// A membership was created and is (or will become) coverage.
    ///
    /// Emitted for both immediate starts and queued renewals; a queued
    /// renewal has `start_date` in the future.
    Activated {
        event_id: EventId,
        membership_id: MembershipId,
        user_id: UserId,
        plan_name: String,
        start_date: Timestamp,
        end_date: Timestamp,
        final_price: Money,
        occurred_at: Timestamp,
    },

    /// A membership was cancelled by an admin.
    Cancelled {
        event_id: EventId,
        membership_id: MembershipId,
        user_id: UserId,
        occurred_at: Timestamp,
    },

    /// A membership was revoked (coverage withdrawn).
    Revoked {
        event_id: EventId,
        membership_id: MembershipId,
        user_id: UserId,
        occurred_at: Timestamp,
    },

    /// A membership ends within the reminder window (daily sweep).
    RenewalDue {
        event_id: EventId,
        membership_id: MembershipId,
        user_id: UserId,
        end_date: Timestamp,
        days_left: u32,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for MembershipEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MembershipEvent::Activated { .. } => "membership.activated.v1",
            MembershipEvent::Cancelled { .. } => "membership.cancelled.v1",
            MembershipEvent::Revoked { .. } => "membership.revoked.v1",
            MembershipEvent::RenewalDue { .. } => "membership.renewal_due.v1",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        match self {
            MembershipEvent::Activated { membership_id, .. }
            | MembershipEvent::Cancelled { membership_id, .. }
            | MembershipEvent::Revoked { membership_id, .. }
            | MembershipEvent::RenewalDue { membership_id, .. } => membership_id.to_string(),
        }
    }

    fn aggregate_type(&self) -> &'static str {
        "Membership"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            MembershipEvent::Activated { occurred_at, .. }
            | MembershipEvent::Cancelled { occurred_at, .. }
            | MembershipEvent::Revoked { occurred_at, .. }
            | MembershipEvent::RenewalDue { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            MembershipEvent::Activated { event_id, .. }
            | MembershipEvent::Cancelled { event_id, .. }
            | MembershipEvent::Revoked { event_id, .. }
            | MembershipEvent::RenewalDue { event_id, .. } => event_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn activated_event_envelope_has_routing_fields() {
        let membership_id = MembershipId::new();
        let now = Timestamp::now();
        let event = MembershipEvent::Activated {
            event_id: EventId::new(),
            membership_id,
            user_id: UserId::new("user-1").unwrap(),
            plan_name: "Monthly".to_string(),
            start_date: now,
            end_date: now.add_days(30),
            final_price: Money::from_rupees(900),
            occurred_at: now,
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "membership.activated.v1");
        assert_eq!(envelope.aggregate_id, membership_id.to_string());
        assert_eq!(envelope.aggregate_type, "Membership");
        assert_eq!(envelope.schema_version, 1);
    }

    #[test]
    fn revoked_event_type_is_distinct_from_cancelled() {
        let base = (EventId::new(), MembershipId::new(), UserId::new("u").unwrap());
        let cancelled = MembershipEvent::Cancelled {
            event_id: base.0.clone(),
            membership_id: base.1,
            user_id: base.2.clone(),
            occurred_at: Timestamp::now(),
        };
        let revoked = MembershipEvent::Revoked {
            event_id: base.0,
            membership_id: base.1,
            user_id: base.2,
            occurred_at: Timestamp::now(),
        };
        assert_ne!(cancelled.event_type(), revoked.event_type());
    }
}
