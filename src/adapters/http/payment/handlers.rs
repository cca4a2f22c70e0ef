//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;

use crate::application::handlers::payment::{
    GetPaymentSummaryHandler, PaymentSummaryQuery, RecordPaymentCommand, RecordPaymentHandler,
};
use crate::domain::foundation::{Money, Principal, Timestamp, TimeZoneOffset, UserId};
use crate::domain::payment::PaymentMethod;
use crate::ports::{Clock, EventPublisher, MemberLock, MembershipRepository, PaymentRepository};

use super::super::error::ApiError;
use super::dto::{PaymentResponse, PaymentSummaryResponse, RecordPaymentRequest, SummaryParams};

/// Shared dependencies for payment endpoints, cloned per request.
#[derive(Clone)]
pub struct PaymentAppState {
    pub payments: Arc<dyn PaymentRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub locks: Arc<dyn MemberLock>,
    pub publisher: Arc<dyn EventPublisher>,
    pub clock: Arc<dyn Clock>,
    pub receipt_prefix: String,
    pub tz: TimeZoneOffset,
}

impl PaymentAppState {
    fn record_handler(&self) -> RecordPaymentHandler {
        RecordPaymentHandler::new(
            self.payments.clone(),
            self.memberships.clone(),
            self.locks.clone(),
            self.publisher.clone(),
            self.clock.clone(),
            self.receipt_prefix.clone(),
            self.tz,
        )
    }

    fn summary_handler(&self) -> GetPaymentSummaryHandler {
        GetPaymentSummaryHandler::new(self.payments.clone())
    }
}

/// POST /payments
pub async fn record_payment(
    State(state): State<PaymentAppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::new(request.user_id)
        .map_err(crate::domain::foundation::DomainError::from)
        .map_err(ApiError::from)?;

    let cmd = RecordPaymentCommand {
        principal,
        user_id,
        amount: Money::from_paise(request.amount_paise),
        method: PaymentMethod::from(request.method),
        notes: request.notes,
    };

    let payment = state.record_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

/// GET /payments/summary?from=..&to=..
pub async fn payment_summary(
    State(state): State<PaymentAppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<SummaryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = PaymentSummaryQuery {
        principal,
        from: Timestamp::from_datetime(params.from),
        to: Timestamp::from_datetime(params.to),
    };

    let view = state.summary_handler().handle(query).await?;
    Ok(Json(PaymentSummaryResponse::from(view)))
}
