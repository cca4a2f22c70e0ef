//! Member domain module.
//!
//! The gym-side member record: contact details used by attendance lookup
//! and notifications, plus the PT-session entitlement counter.

mod events;
mod profile;

pub use events::MemberEvent;
pub use profile::MemberProfile;
