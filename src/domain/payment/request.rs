//! Payment request workflow.
//!
//! Members ask for a plan; an admin approves (creating the membership and
//! the initial ledger entry) or rejects. A request is processed exactly
//! once.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, PaymentRequestId, PlanId, StateMachine, Timestamp, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Completed,
    Rejected,
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

impl StateMachine for RequestStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (RequestStatus::Pending, RequestStatus::Completed)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            RequestStatus::Pending => vec![RequestStatus::Completed, RequestStatus::Rejected],
            RequestStatus::Completed | RequestStatus::Rejected => vec![],
        }
    }

    fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// A member's request to start a plan, awaiting admin action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub id: PaymentRequestId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    /// Amount the member claims to have paid or intends to pay up front.
    pub amount: Money,
    pub note: Option<String>,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub processed_at: Option<Timestamp>,
    pub processed_by: Option<UserId>,
}

impl PaymentRequest {
    pub fn create(
        id: PaymentRequestId,
        user_id: UserId,
        plan_id: PlanId,
        amount: Money,
        note: Option<String>,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        if amount.is_negative() {
            return Err(DomainError::validation(
                "amount",
                "requested amount cannot be negative",
            ));
        }
        Ok(Self {
            id,
            user_id,
            plan_id,
            amount,
            note,
            status: RequestStatus::Pending,
            created_at: now,
            processed_at: None,
            processed_by: None,
        })
    }

    /// Marks the request completed. Fails unless still pending.
    pub fn approve(&mut self, admin: UserId, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(RequestStatus::Completed, admin, now)
    }

    /// Marks the request rejected. Fails unless still pending.
    pub fn reject(&mut self, admin: UserId, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(RequestStatus::Rejected, admin, now)
    }

    fn transition_to(
        &mut self,
        target: RequestStatus,
        admin: UserId,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::AlreadyProcessed,
                format!("payment request is {}, not pending", self.status),
            )
            .with_detail("request_id", self.id.to_string()));
        }
        self.status = target;
        self.processed_at = Some(now);
        self.processed_by = Some(admin);
        Ok(())
    }
}
