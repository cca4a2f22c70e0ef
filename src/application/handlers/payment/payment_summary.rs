//! GetPaymentSummaryHandler - revenue summary over a date range.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Money, Principal, Timestamp};
use crate::domain::membership::MembershipError;
use crate::domain::payment::{totals_by_method, MethodTotal};
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct PaymentSummaryQuery {
    pub principal: Principal,
    pub from: Timestamp,
    pub to: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentSummaryView {
    pub total_collected: Money,
    pub payment_count: u64,
    pub by_method: Vec<MethodTotal>,
}

/// Per-method totals and overall count for `paid_at` in `[from, to)`.
pub struct GetPaymentSummaryHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl GetPaymentSummaryHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(
        &self,
        query: PaymentSummaryQuery,
    ) -> Result<PaymentSummaryView, MembershipError> {
        query.principal.require_admin()?;

        let payments = self.payments.find_in_range(query.from, query.to).await?;
        let by_method = totals_by_method(&payments);
        let total_collected = payments
            .iter()
            .fold(Money::from_paise(0), |acc, p| acc + p.amount);

        Ok(PaymentSummaryView {
            total_collected,
            payment_count: payments.len() as u64,
            by_method,
        })
    }
}
