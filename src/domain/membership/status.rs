//! Membership status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a membership.
///
/// Queued (chained) memberships are also `Active`: the invariant across a
/// member's chain is non-overlapping coverage, not a single active row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Counts toward coverage; the default state from creation.
    Active,

    /// Ended by an admin cancel action. Terminal.
    Cancelled,

    /// Withdrawn by an admin revoke action (disciplinary / refund paths).
    /// Terminal, and distinct from Cancelled for audit purposes.
    Revoked,
}

impl MembershipStatus {
    /// Returns true if this membership counts toward coverage.
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!((self, target), (Active, Cancelled) | (Active, Revoked))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Active => vec![Cancelled, Revoked],
            Cancelled | Revoked => vec![],
        }
    }
}
