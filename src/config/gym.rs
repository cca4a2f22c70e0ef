//! Gym-specific settings.
//!
//! Controls the local timezone used for day boundaries (check-in
//! idempotency, receipts, birthday matching), receipt numbering, and
//! the daily sweep windows.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::TimeZoneOffset;

#[derive(Debug, Clone, Deserialize)]
pub struct GymConfig {
    /// Local timezone as minutes east of UTC. Defaults to IST (+05:30).
    #[serde(default = "default_timezone_minutes_east")]
    pub timezone_minutes_east: i32,

    /// Prefix on generated receipt numbers.
    #[serde(default = "default_receipt_prefix")]
    pub receipt_prefix: String,

    /// Days ahead the daily sweep looks for expiring memberships.
    #[serde(default = "default_renewal_reminder_days")]
    pub renewal_reminder_days: u32,

    /// Days without a check-in before a member counts as a regular absentee.
    #[serde(default = "default_absentee_threshold_days")]
    pub absentee_threshold_days: u32,

    /// Country calling code used to normalize phone lookups.
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl GymConfig {
    /// The configured timezone, already validated.
    pub fn timezone(&self) -> TimeZoneOffset {
        TimeZoneOffset::from_minutes_east(self.timezone_minutes_east)
            .unwrap_or_else(TimeZoneOffset::ist)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if TimeZoneOffset::from_minutes_east(self.timezone_minutes_east).is_none() {
            return Err(ValidationError::InvalidTimezoneOffset);
        }
        if self.receipt_prefix.trim().is_empty() {
            return Err(ValidationError::EmptyReceiptPrefix);
        }
        Ok(())
    }
}

impl Default for GymConfig {
    fn default() -> Self {
        Self {
            timezone_minutes_east: default_timezone_minutes_east(),
            receipt_prefix: default_receipt_prefix(),
            renewal_reminder_days: default_renewal_reminder_days(),
            absentee_threshold_days: default_absentee_threshold_days(),
            country_code: default_country_code(),
        }
    }
}

fn default_timezone_minutes_east() -> i32 {
    330
}

fn default_receipt_prefix() -> String {
    "GYM".to_string()
}

fn default_renewal_reminder_days() -> u32 {
    7
}

fn default_absentee_threshold_days() -> u32 {
    7
}

fn default_country_code() -> String {
    "+91".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ist() {
        let config = GymConfig::default();
        assert_eq!(config.timezone_minutes_east, 330);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_offset_is_invalid() {
        let config = GymConfig {
            timezone_minutes_east: 100_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_receipt_prefix_is_invalid() {
        let config = GymConfig {
            receipt_prefix: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
