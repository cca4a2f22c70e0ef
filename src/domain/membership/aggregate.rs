//! Membership aggregate entity.
//!
//! A membership is one link in a member's coverage chain. Creating a new
//! membership while one is active *queues* it: the new coverage starts at
//! the prior membership's end date, never before, so paid intervals do not
//! overlap. The chaining decision itself lives in the lifecycle engine;
//! this aggregate holds the data and the status transitions.
//!
//! # Design Decisions
//!
//! - **Money in paise**: all monetary values are i64 smallest units
//! - **Price copied at creation**: `original_price` never changes even if
//!   the plan is later edited
//! - **Idempotent cancel**: cancelling an already-cancelled membership is a
//!   no-op success; revocation is terminal and cannot be masked by cancel

use crate::domain::foundation::{
    DomainError, ErrorCode, MembershipId, PlanId, StateMachine, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::{MembershipStatus, PriceQuote};

/// Coverage interval of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPeriod {
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

impl MembershipPeriod {
    /// Builds a period, rejecting end-before-start intervals.
    pub fn new(start_date: Timestamp, end_date: Timestamp) -> Result<Self, DomainError> {
        if end_date.is_before(&start_date) {
            return Err(DomainError::validation(
                "end_date",
                "end date cannot precede start date",
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Period starting at `start` and covering the plan duration.
    pub fn from_duration(start: Timestamp, duration_days: u32) -> Self {
        Self {
            start_date: start,
            end_date: start.add_days(i64::from(duration_days)),
        }
    }
}

/// Membership aggregate - one purchased (or granted) coverage interval.
///
/// # Invariants
///
/// - `final_price == original_price - discount_amount`
/// - `start_date <= end_date`
/// - status transitions follow the `MembershipStatus` state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier for this membership.
    pub id: MembershipId,

    /// Member who owns this coverage.
    pub user_id: UserId,

    /// Plan this membership was purchased against.
    pub plan_id: PlanId,

    /// Coverage start.
    pub start_date: Timestamp,

    /// Coverage end.
    pub end_date: Timestamp,

    /// Lifecycle status.
    pub status: MembershipStatus,

    /// Plan price at creation. Never changes afterwards.
    pub original_price: crate::domain::foundation::Money,

    /// Discount granted at creation.
    pub discount_amount: crate::domain::foundation::Money,

    /// `original_price - discount_amount`, stored for the read side.
    pub final_price: crate::domain::foundation::Money,

    /// When the membership row was created.
    pub created_at: Timestamp,

    /// When the membership was revoked, if it was.
    pub revoked_at: Option<Timestamp>,
}

impl Membership {
    /// Creates an active membership for the given period and price.
    pub fn create(
        id: MembershipId,
        user_id: UserId,
        plan_id: PlanId,
        period: MembershipPeriod,
        quote: PriceQuote,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            plan_id,
            start_date: period.start_date,
            end_date: period.end_date,
            status: MembershipStatus::Active,
            original_price: quote.original_price,
            discount_amount: quote.discount_amount,
            final_price: quote.final_price(),
            created_at: now,
            revoked_at: None,
        }
    }

    /// True while the membership counts toward coverage.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// True if `at` falls inside this membership's coverage interval.
    pub fn covers(&self, at: &Timestamp) -> bool {
        self.is_active() && !at.is_before(&self.start_date) && !at.is_after(&self.end_date)
    }

    /// Cancel this membership.
    ///
    /// Idempotent: a second cancel succeeds without change. Cancelling a
    /// revoked membership is rejected so revocation stays visible in audit.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status == MembershipStatus::Cancelled {
            return Ok(());
        }
        self.transition_to(MembershipStatus::Cancelled)
    }

    /// Revoke this membership (admin withdrawal of coverage).
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the membership is active.
    pub fn revoke(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(MembershipStatus::Revoked)?;
        self.revoked_at = Some(now);
        Ok(())
    }

    fn transition_to(&mut self, target: MembershipStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition membership from {:?} to {:?}",
                    self.status, target
                ),
            )
            .with_detail("membership_id", self.id.to_string())
        })?;
        Ok(())
    }
}
