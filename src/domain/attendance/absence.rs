//! Absence arithmetic for the regular-absentee report.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TimeZoneOffset, Timestamp};

/// How long a member has been away from the gym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Absence {
    /// Joined but never checked in.
    NeverAttended,
    /// Last check-in was `days` local calendar days ago.
    AbsentFor { days: u32 },
}

impl Absence {
    /// Days absent, treating never-attended as the maximum.
    pub fn days_or_max(&self) -> u32 {
        match self {
            Absence::NeverAttended => u32::MAX,
            Absence::AbsentFor { days } => *days,
        }
    }

    /// Whether this absence is strictly past the report threshold. A
    /// member whose last check-in is exactly `threshold_days` old is not
    /// yet absent.
    pub fn exceeds(&self, threshold_days: u32) -> bool {
        self.days_or_max() > threshold_days
    }
}

/// Classifies a member's absence from their most recent check-in.
///
/// Days are counted as local calendar-day boundaries crossed, so a
/// check-in late last night counts as one day absent this morning.
pub fn classify_absence(
    last_checkin: Option<Timestamp>,
    now: Timestamp,
    tz: TimeZoneOffset,
) -> Absence {
    match last_checkin {
        None => Absence::NeverAttended,
        Some(last) => {
            let days = tz.days_between(&last, &now).max(0) as u32;
            Absence::AbsentFor { days }
        }
    }
}
