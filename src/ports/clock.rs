//! Clock port.
//!
//! Handlers never call `Timestamp::now()` directly; they take the time
//! from this port so tests can pin it.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
