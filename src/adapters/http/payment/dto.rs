//! JSON request/response types for payment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::PaymentSummaryView;
use crate::domain::payment::Payment;

/// Request to record an out-of-band payment against a member.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub user_id: String,
    pub amount_paise: i64,
    pub method: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub membership_id: Option<String>,
    pub user_id: String,
    pub amount_paise: i64,
    pub paid_at: String,
    pub method: String,
    pub notes: Option<String>,
    pub receipt_no: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            membership_id: payment.membership_id.map(|id| id.to_string()),
            user_id: payment.user_id.to_string(),
            amount_paise: payment.amount.as_paise(),
            paid_at: payment.paid_at.as_datetime().to_rfc3339(),
            method: payment.method.to_string(),
            notes: payment.notes,
            receipt_no: payment.receipt_no.as_str().to_string(),
        }
    }
}

/// Date-range query for the revenue summary, half-open `[from, to)`.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryParams {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodTotalResponse {
    pub method: String,
    pub total_paise: i64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentSummaryResponse {
    pub total_collected_paise: i64,
    pub payment_count: u64,
    pub by_method: Vec<MethodTotalResponse>,
}

impl From<PaymentSummaryView> for PaymentSummaryResponse {
    fn from(view: PaymentSummaryView) -> Self {
        Self {
            total_collected_paise: view.total_collected.as_paise(),
            payment_count: view.payment_count,
            by_method: view
                .by_method
                .into_iter()
                .map(|t| MethodTotalResponse {
                    method: t.method.to_string(),
                    total_paise: t.total.as_paise(),
                    count: t.count,
                })
                .collect(),
        }
    }
}
