//! RejectPaymentRequestHandler - admin rejection of a pending request.

use std::sync::Arc;

use crate::domain::foundation::{PaymentRequestId, Principal};
use crate::domain::membership::MembershipError;
use crate::ports::{Clock, PaymentRequestRepository};

#[derive(Debug, Clone)]
pub struct RejectPaymentRequestCommand {
    pub principal: Principal,
    pub request_id: PaymentRequestId,
}

pub struct RejectPaymentRequestHandler {
    requests: Arc<dyn PaymentRequestRepository>,
    clock: Arc<dyn Clock>,
}

impl RejectPaymentRequestHandler {
    pub fn new(requests: Arc<dyn PaymentRequestRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { requests, clock }
    }

    pub async fn handle(&self, cmd: RejectPaymentRequestCommand) -> Result<(), MembershipError> {
        cmd.principal.require_admin()?;

        let mut request = self
            .requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or(MembershipError::RequestNotFound(cmd.request_id))?;
        if !request.status.is_pending() {
            return Err(MembershipError::RequestNotPending(cmd.request_id));
        }

        request.reject(cmd.principal.user_id.clone(), self.clock.now())?;
        self.requests.update(&request).await?;
        Ok(())
    }
}
