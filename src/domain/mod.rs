//! Domain layer - entities, value objects, invariants and domain events.
//!
//! Pure business logic with no I/O. Persistence and transport live behind
//! the ports in `crate::ports` and the adapters in `crate::adapters`.

pub mod attendance;
pub mod foundation;
pub mod member;
pub mod membership;
pub mod payment;
pub mod plan;
