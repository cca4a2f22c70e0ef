//! ApprovePaymentRequestHandler - admin approval of a pending request.

use std::sync::Arc;

use crate::domain::foundation::{Money, PaymentRequestId, Principal};
use crate::domain::membership::MembershipError;
use crate::domain::payment::PaymentMethod;
use crate::ports::{Clock, PaymentRequestRepository};

use super::{CreateMembershipCommand, CreateMembershipHandler, MembershipView};

#[derive(Debug, Clone)]
pub struct ApprovePaymentRequestCommand {
    pub principal: Principal,
    pub request_id: PaymentRequestId,
    pub discount_amount: Money,
    pub amount_paid: Money,
    pub payment_method: PaymentMethod,
}

/// Approval composes membership creation with the request state machine:
/// the pending check runs before any write, so a second approval fails
/// without creating a second membership.
pub struct ApprovePaymentRequestHandler {
    requests: Arc<dyn PaymentRequestRepository>,
    create_membership: Arc<CreateMembershipHandler>,
    clock: Arc<dyn Clock>,
}

impl ApprovePaymentRequestHandler {
    pub fn new(
        requests: Arc<dyn PaymentRequestRepository>,
        create_membership: Arc<CreateMembershipHandler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            create_membership,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApprovePaymentRequestCommand,
    ) -> Result<MembershipView, MembershipError> {
        cmd.principal.require_admin()?;

        let mut request = self
            .requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or(MembershipError::RequestNotFound(cmd.request_id))?;
        if !request.status.is_pending() {
            return Err(MembershipError::RequestNotPending(cmd.request_id));
        }

        let view = self
            .create_membership
            .handle(CreateMembershipCommand {
                principal: cmd.principal.clone(),
                user_id: request.user_id.clone(),
                plan_id: request.plan_id,
                discount_amount: cmd.discount_amount,
                initial_payment: cmd.amount_paid,
                payment_method: cmd.payment_method,
                payment_date: None,
                custom_start: None,
                custom_end: None,
            })
            .await?;

        request.approve(cmd.principal.user_id.clone(), self.clock.now())?;
        self.requests.update(&request).await?;

        Ok(view)
    }
}
