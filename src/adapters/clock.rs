//! Clock adapters.

use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Test clock pinned to a chosen instant.
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.lock().expect("FixedClock lock poisoned") = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut guard = self.now.lock().expect("FixedClock lock poisoned");
        *guard = guard.add_days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("FixedClock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_on_demand() {
        let start = Timestamp::now();
        let clock = FixedClock::at(start);
        assert_eq!(clock.now(), start);
        clock.advance_days(3);
        assert_eq!(clock.now(), start.add_days(3));
    }
}
