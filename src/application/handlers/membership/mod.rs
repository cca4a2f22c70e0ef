//! Membership lifecycle handlers.

mod approve_payment_request;
mod cancel_membership;
mod create_membership;
mod get_active_membership;
mod reject_payment_request;
mod revoke_membership;

pub use approve_payment_request::{ApprovePaymentRequestCommand, ApprovePaymentRequestHandler};
pub use cancel_membership::{CancelMembershipCommand, CancelMembershipHandler};
pub use create_membership::{CreateMembershipCommand, CreateMembershipHandler};
pub use get_active_membership::{GetActiveMembershipHandler, GetActiveMembershipQuery};
pub use reject_payment_request::{RejectPaymentRequestCommand, RejectPaymentRequestHandler};
pub use revoke_membership::{RevokeMembershipCommand, RevokeMembershipHandler};

use serde::Serialize;

use crate::domain::foundation::{MembershipId, Money, PlanId, Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::domain::payment::{reconcile, Payment};

/// Read model returned by lifecycle operations: the membership row
/// enriched with the plan's display name and the reconciled ledger
/// amounts.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipView {
    pub id: MembershipId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub plan_name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: MembershipStatus,
    pub original_price: Money,
    pub discount_amount: Money,
    pub final_price: Money,
    pub amount_paid: Money,
    pub amount_due: Money,
}

impl MembershipView {
    pub fn from_parts(
        membership: &Membership,
        plan_name: impl Into<String>,
        payments: &[Payment],
    ) -> Self {
        let summary = reconcile(membership.final_price, payments);
        Self {
            id: membership.id,
            user_id: membership.user_id.clone(),
            plan_id: membership.plan_id,
            plan_name: plan_name.into(),
            start_date: membership.start_date,
            end_date: membership.end_date,
            status: membership.status,
            original_price: membership.original_price,
            discount_amount: membership.discount_amount,
            final_price: membership.final_price,
            amount_paid: summary.amount_paid,
            amount_due: summary.amount_due,
        }
    }
}
