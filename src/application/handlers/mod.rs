//! Command and query handlers, one per operation.
//!
//! Handlers own the orchestration: authorization at entry, preconditions
//! before any write, event publication best-effort at the end. They
//! depend only on ports and are tested against the in-memory adapters.

pub mod attendance;
pub mod membership;
pub mod payment;
