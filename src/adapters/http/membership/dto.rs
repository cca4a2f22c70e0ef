//! JSON request/response types for membership endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::membership::MembershipView;
use crate::domain::membership::MembershipStatus;

/// Request to create a membership for a member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembershipRequest {
    pub user_id: String,
    pub plan_id: Uuid,

    /// Flat discount in paise, defaults to none.
    #[serde(default)]
    pub discount_paise: i64,

    /// Payment collected at signup in paise; zero means unpaid.
    #[serde(default)]
    pub initial_payment_paise: i64,

    #[serde(default = "default_method")]
    pub payment_method: String,

    /// Backdated payment timestamp for imports.
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,

    /// Verbatim period override for imports; both or neither.
    #[serde(default)]
    pub custom_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_end: Option<DateTime<Utc>>,
}

fn default_method() -> String {
    "cash".to_string()
}

/// Request to approve a pending payment request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovePaymentRequestRequest {
    #[serde(default)]
    pub discount_paise: i64,

    /// Amount actually collected; defaults to the requested amount when
    /// omitted (negative sentinel never reaches the handler).
    pub amount_paid_paise: i64,

    #[serde(default = "default_method")]
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipViewResponse {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub start_date: String,
    pub end_date: String,
    pub status: MembershipStatus,
    pub original_price_paise: i64,
    pub discount_paise: i64,
    pub final_price_paise: i64,
    pub amount_paid_paise: i64,
    pub amount_due_paise: i64,
}

impl From<MembershipView> for MembershipViewResponse {
    fn from(view: MembershipView) -> Self {
        Self {
            id: view.id.to_string(),
            user_id: view.user_id.to_string(),
            plan_id: view.plan_id.to_string(),
            plan_name: view.plan_name,
            start_date: view.start_date.as_datetime().to_rfc3339(),
            end_date: view.end_date.as_datetime().to_rfc3339(),
            status: view.status,
            original_price_paise: view.original_price.as_paise(),
            discount_paise: view.discount_amount.as_paise(),
            final_price_paise: view.final_price.as_paise(),
            amount_paid_paise: view.amount_paid.as_paise(),
            amount_due_paise: view.amount_due.as_paise(),
        }
    }
}

/// Wrapper for the active-membership query; null when none.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveMembershipResponse {
    pub membership: Option<MembershipViewResponse>,
}
