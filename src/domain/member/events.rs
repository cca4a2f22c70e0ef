//! Member events.

use crate::domain::foundation::{DomainEvent, EventId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberEvent {
    /// The daily sweep found a member whose birthday is today.
    BirthdayToday {
        event_id: EventId,
        user_id: UserId,
        name: String,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for MemberEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MemberEvent::BirthdayToday { .. } => "member.birthday.v1",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        match self {
            MemberEvent::BirthdayToday { user_id, .. } => user_id.to_string(),
        }
    }

    fn aggregate_type(&self) -> &'static str {
        "Member"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            MemberEvent::BirthdayToday { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            MemberEvent::BirthdayToday { event_id, .. } => event_id.clone(),
        }
    }
}
