//! Plan domain module.
//!
//! Membership plans: duration, price and optional PT-session entitlement.

mod plan;

pub use plan::Plan;
