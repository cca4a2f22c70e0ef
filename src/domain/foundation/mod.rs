//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, money and time types, error types
//! and the event infrastructure that form the vocabulary of the gym domain.

mod auth;
mod errors;
mod events;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use auth::{Principal, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AttendanceId, MembershipId, PaymentId, PaymentRequestId, PlanId, UserId};
pub use money::Money;
pub use state_machine::StateMachine;
pub use timestamp::{Timestamp, TimeZoneOffset};
