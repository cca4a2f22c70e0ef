//! HTTP handlers for membership endpoints.
//!
//! Each handler builds the application handler from shared state, maps
//! the DTO onto a command and the result back into JSON.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use uuid::Uuid;

use crate::application::handlers::membership::{
    ApprovePaymentRequestCommand, ApprovePaymentRequestHandler, CancelMembershipCommand,
    CancelMembershipHandler, CreateMembershipCommand, CreateMembershipHandler,
    GetActiveMembershipHandler, GetActiveMembershipQuery, RejectPaymentRequestCommand,
    RejectPaymentRequestHandler, RevokeMembershipCommand, RevokeMembershipHandler,
};
use crate::domain::foundation::{
    MembershipId, Money, PaymentRequestId, PlanId, Principal, Timestamp, TimeZoneOffset, UserId,
};
use crate::domain::payment::PaymentMethod;
use crate::ports::{
    Clock, EventPublisher, MemberDirectory, MemberLock, MembershipRepository, PaymentRepository,
    PaymentRequestRepository, PlanRepository,
};

use super::super::error::ApiError;
use super::dto::{
    ActiveMembershipResponse, ApprovePaymentRequestRequest, CreateMembershipRequest,
    MembershipViewResponse,
};

/// Shared dependencies for membership endpoints, cloned per request.
#[derive(Clone)]
pub struct MembershipAppState {
    pub plans: Arc<dyn PlanRepository>,
    pub directory: Arc<dyn MemberDirectory>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub requests: Arc<dyn PaymentRequestRepository>,
    pub locks: Arc<dyn MemberLock>,
    pub publisher: Arc<dyn EventPublisher>,
    pub clock: Arc<dyn Clock>,
    pub receipt_prefix: String,
    pub tz: TimeZoneOffset,
}

impl MembershipAppState {
    fn create_handler(&self) -> Arc<CreateMembershipHandler> {
        Arc::new(CreateMembershipHandler::new(
            self.plans.clone(),
            self.directory.clone(),
            self.memberships.clone(),
            self.payments.clone(),
            self.locks.clone(),
            self.publisher.clone(),
            self.clock.clone(),
            self.receipt_prefix.clone(),
            self.tz,
        ))
    }

    fn get_active_handler(&self) -> GetActiveMembershipHandler {
        GetActiveMembershipHandler::new(
            self.memberships.clone(),
            self.payments.clone(),
            self.plans.clone(),
        )
    }

    fn cancel_handler(&self) -> CancelMembershipHandler {
        CancelMembershipHandler::new(
            self.memberships.clone(),
            self.publisher.clone(),
            self.clock.clone(),
        )
    }

    fn revoke_handler(&self) -> RevokeMembershipHandler {
        RevokeMembershipHandler::new(
            self.memberships.clone(),
            self.locks.clone(),
            self.publisher.clone(),
            self.clock.clone(),
        )
    }

    fn approve_handler(&self) -> ApprovePaymentRequestHandler {
        ApprovePaymentRequestHandler::new(
            self.requests.clone(),
            self.create_handler(),
            self.clock.clone(),
        )
    }

    fn reject_handler(&self) -> RejectPaymentRequestHandler {
        RejectPaymentRequestHandler::new(self.requests.clone(), self.clock.clone())
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| ApiError::from(crate::domain::foundation::DomainError::from(e)))
}

/// POST /memberships
pub async fn create_membership(
    State(state): State<MembershipAppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateMembershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateMembershipCommand {
        principal,
        user_id: parse_user_id(&request.user_id)?,
        plan_id: PlanId::from_uuid(request.plan_id),
        discount_amount: Money::from_paise(request.discount_paise),
        initial_payment: Money::from_paise(request.initial_payment_paise),
        payment_method: PaymentMethod::from(request.payment_method),
        payment_date: request.payment_date.map(Timestamp::from_datetime),
        custom_start: request.custom_start.map(Timestamp::from_datetime),
        custom_end: request.custom_end.map(Timestamp::from_datetime),
    };

    let view = state.create_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(MembershipViewResponse::from(view)),
    ))
}

/// GET /memberships/active/:user_id
pub async fn get_active_membership(
    State(state): State<MembershipAppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetActiveMembershipQuery {
        principal,
        user_id: parse_user_id(&user_id)?,
    };

    let view = state.get_active_handler().handle(query).await?;
    Ok(Json(ActiveMembershipResponse {
        membership: view.map(MembershipViewResponse::from),
    }))
}

/// POST /memberships/:id/cancel
pub async fn cancel_membership(
    State(state): State<MembershipAppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CancelMembershipCommand {
        principal,
        membership_id: MembershipId::from_uuid(id),
    };

    state.cancel_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /memberships/revoke/:user_id
pub async fn revoke_membership(
    State(state): State<MembershipAppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RevokeMembershipCommand {
        principal,
        user_id: parse_user_id(&user_id)?,
    };

    state.revoke_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /payment-requests/:id/approve
pub async fn approve_payment_request(
    State(state): State<MembershipAppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApprovePaymentRequestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ApprovePaymentRequestCommand {
        principal,
        request_id: PaymentRequestId::from_uuid(id),
        discount_amount: Money::from_paise(request.discount_paise),
        amount_paid: Money::from_paise(request.amount_paid_paise),
        payment_method: PaymentMethod::from(request.payment_method),
    };

    let view = state.approve_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(MembershipViewResponse::from(view)),
    ))
}

/// POST /payment-requests/:id/reject
pub async fn reject_payment_request(
    State(state): State<MembershipAppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RejectPaymentRequestCommand {
        principal,
        request_id: PaymentRequestId::from_uuid(id),
    };

    state.reject_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
