//! GetActiveMembershipHandler - "the" active membership for a member.

use std::sync::Arc;

use crate::domain::foundation::{Principal, UserId};
use crate::domain::membership::MembershipError;
use crate::ports::{MembershipRepository, PaymentRepository, PlanRepository};

use super::MembershipView;

#[derive(Debug, Clone)]
pub struct GetActiveMembershipQuery {
    pub principal: Principal,
    pub user_id: UserId,
}

/// Returns the active row with the latest end date, enriched with the
/// plan name and the reconciled ledger amounts. No active row is `None`,
/// not an error. Members may only read their own.
pub struct GetActiveMembershipHandler {
    memberships: Arc<dyn MembershipRepository>,
    payments: Arc<dyn PaymentRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl GetActiveMembershipHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        payments: Arc<dyn PaymentRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            memberships,
            payments,
            plans,
        }
    }

    pub async fn handle(
        &self,
        query: GetActiveMembershipQuery,
    ) -> Result<Option<MembershipView>, MembershipError> {
        query.principal.require_self_or_admin(&query.user_id)?;

        let active = self.memberships.find_active_by_user(&query.user_id).await?;
        let Some(membership) = active.into_iter().next() else {
            return Ok(None);
        };

        let plan_name = self
            .plans
            .find_by_id(&membership.plan_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_default();
        let payments = self.payments.find_by_membership(&membership.id).await?;

        Ok(Some(MembershipView::from_parts(
            &membership,
            plan_name,
            &payments,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryMembershipRepository, InMemoryPaymentRepository, InMemoryPlanRepository,
    };
    use crate::domain::foundation::{
        MembershipId, Money, PaymentId, PlanId, Role, Timestamp,
    };
    use crate::domain::membership::{Membership, MembershipPeriod, PriceQuote};
    use crate::domain::payment::{Payment, PaymentMethod, ReceiptNumber};
    use crate::domain::plan::Plan;

    fn member_id() -> UserId {
        UserId::new("member-1").unwrap()
    }

    fn membership(plan_id: PlanId, start: Timestamp, days: u32) -> Membership {
        Membership::create(
            MembershipId::new(),
            member_id(),
            plan_id,
            MembershipPeriod::from_duration(start, days),
            PriceQuote::new(Money::from_rupees(1000), Money::from_rupees(100)).unwrap(),
            start,
        )
    }

    fn handler(
        memberships: Arc<InMemoryMembershipRepository>,
        payments: Arc<InMemoryPaymentRepository>,
        plans: Arc<InMemoryPlanRepository>,
    ) -> GetActiveMembershipHandler {
        GetActiveMembershipHandler::new(memberships, payments, plans)
    }

    #[tokio::test]
    async fn none_when_no_active_membership() {
        let h = handler(
            Arc::new(InMemoryMembershipRepository::new()),
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::new(InMemoryPlanRepository::new()),
        );
        let view = h
            .handle(GetActiveMembershipQuery {
                principal: Principal::new(member_id(), Role::Member),
                user_id: member_id(),
            })
            .await
            .unwrap();
        assert!(view.is_none());
    }

    #[tokio::test]
    async fn latest_end_date_wins_and_amounts_reconcile() {
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::new());

        let plan = Plan::new(PlanId::new(), "Monthly", 30, Money::from_rupees(1000), None)
            .unwrap();
        let plan_id = plan.id;
        plans.seed(plan);

        let now = Timestamp::now();
        let earlier = membership(plan_id, now.minus_days(30), 30);
        let current = membership(plan_id, now, 30);
        memberships.seed(earlier);
        memberships.seed(current.clone());

        payments.seed(
            Payment::new(
                PaymentId::new(),
                Some(current.id),
                member_id(),
                Money::from_rupees(500),
                now,
                PaymentMethod::Cash,
                None,
                ReceiptNumber::from_string("GYM-20260115-deadbeef"),
                None,
            )
            .unwrap(),
        );

        let h = handler(memberships, payments, plans);
        let view = h
            .handle(GetActiveMembershipQuery {
                principal: Principal::new(member_id(), Role::Member),
                user_id: member_id(),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.id, current.id);
        assert_eq!(view.plan_name, "Monthly");
        assert_eq!(view.amount_paid, Money::from_rupees(500));
        assert_eq!(view.amount_due, Money::from_rupees(400));
    }

    #[tokio::test]
    async fn member_cannot_read_someone_else() {
        let h = handler(
            Arc::new(InMemoryMembershipRepository::new()),
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::new(InMemoryPlanRepository::new()),
        );
        let err = h
            .handle(GetActiveMembershipQuery {
                principal: Principal::new(UserId::new("other").unwrap(), Role::Member),
                user_id: member_id(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::Forbidden(_)));
    }
}
