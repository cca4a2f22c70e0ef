//! Receipt numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Human-readable unique identifier issued per payment for invoicing.
///
/// Format: `PREFIX-YYYYMMDD-XXXXXXXX` where the suffix is the first eight
/// hex digits of a fresh UUIDv4. Collisions would require two payments on
/// the same day drawing the same 32 random bits; at gym volume that is not
/// worth a retry loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptNumber(String);

impl ReceiptNumber {
    /// Issues a new receipt number for the given local calendar date.
    pub fn generate(prefix: &str, date: NaiveDate) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}-{}-{}",
            prefix,
            date.format("%Y%m%d"),
            &suffix[..8]
        ))
    }

    /// Wraps an existing receipt number (persistence rehydration).
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
