//! Membership domain module.
//!
//! The heart of the billing ledger: membership lifecycle, chaining of
//! queued renewals, discount pricing and lifecycle events.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `status` - MembershipStatus state machine
//! - `pricing` - original price / discount / final price arithmetic
//! - `events` - lifecycle domain events
//! - `errors` - membership-specific error type

mod aggregate;
mod errors;
mod events;
mod pricing;
mod status;

pub use aggregate::{Membership, MembershipPeriod};
pub use errors::MembershipError;
pub use events::MembershipEvent;
pub use pricing::PriceQuote;
pub use status::MembershipStatus;
