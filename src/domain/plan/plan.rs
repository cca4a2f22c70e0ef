//! Plan entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, PlanId, Timestamp, ValidationError};

/// A membership plan offered by the gym.
///
/// # Invariants
///
/// - `duration_days` is positive
/// - `price` is non-negative
/// - `name` is non-empty
///
/// Plans are effectively immutable once a membership references them: the
/// membership copies the price at creation, so later administrative edits
/// never change existing billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier for this plan.
    pub id: PlanId,

    /// Display name (e.g. "Quarterly", "Annual + PT").
    pub name: String,

    /// Coverage length in days.
    pub duration_days: u32,

    /// List price copied onto memberships at creation.
    pub price: Money,

    /// Whether the plan is offered to new members.
    pub active: bool,

    /// Personal-training sessions granted per purchase, if any.
    pub pt_sessions: Option<u32>,

    /// When the plan was created.
    pub created_at: Timestamp,
}

impl Plan {
    /// Creates a new plan, validating all invariants.
    pub fn new(
        id: PlanId,
        name: impl Into<String>,
        duration_days: u32,
        price: Money,
        pt_sessions: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if duration_days == 0 {
            return Err(ValidationError::out_of_range("duration_days", 1, 3650, 0));
        }
        if price.is_negative() {
            return Err(ValidationError::invalid_format(
                "price",
                "plan price cannot be negative",
            ));
        }

        Ok(Self {
            id,
            name,
            duration_days,
            price,
            active: true,
            pt_sessions,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_valid_plan() {
        let plan = Plan::new(
            PlanId::new(),
            "Monthly",
            30,
            Money::from_rupees(1000),
            None,
        )
        .unwrap();
        assert_eq!(plan.duration_days, 30);
        assert!(plan.active);
        assert!(plan.pt_sessions.is_none());
    }

    #[test]
    fn rejects_zero_duration() {
        let result = Plan::new(PlanId::new(), "Broken", 0, Money::from_rupees(100), None);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_price() {
        let result = Plan::new(PlanId::new(), "Broken", 30, Money::from_paise(-1), None);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_blank_name() {
        let result = Plan::new(PlanId::new(), "  ", 30, Money::from_rupees(100), None);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn pt_plan_carries_session_count() {
        let plan = Plan::new(
            PlanId::new(),
            "Annual + PT",
            365,
            Money::from_rupees(12000),
            Some(12),
        )
        .unwrap();
        assert_eq!(plan.pt_sessions, Some(12));
    }
}
