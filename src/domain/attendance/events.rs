//! Attendance events.

use crate::domain::foundation::{AttendanceId, DomainEvent, EventId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceEvent {
    /// A member checked in for the day.
    Recorded {
        event_id: EventId,
        attendance_id: AttendanceId,
        user_id: UserId,
        checked_in_at: Timestamp,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for AttendanceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AttendanceEvent::Recorded { .. } => "attendance.recorded.v1",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        match self {
            AttendanceEvent::Recorded { attendance_id, .. } => attendance_id.to_string(),
        }
    }

    fn aggregate_type(&self) -> &'static str {
        "Attendance"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            AttendanceEvent::Recorded { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            AttendanceEvent::Recorded { event_id, .. } => event_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn recorded_event_envelope_routes_by_attendance_id() {
        let attendance_id = AttendanceId::new();
        let now = Timestamp::now();
        let event = AttendanceEvent::Recorded {
            event_id: EventId::new(),
            attendance_id,
            user_id: UserId::new("user-1").unwrap(),
            checked_in_at: now,
            occurred_at: now,
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "attendance.recorded.v1");
        assert_eq!(envelope.aggregate_id, attendance_id.to_string());
    }
}
