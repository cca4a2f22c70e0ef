//! Payment ledger entry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    MembershipId, Money, PaymentId, Timestamp, UserId, ValidationError,
};

use super::ReceiptNumber;

/// How a payment was made.
///
/// Free-text at the boundary; the common methods get variants and anything
/// else is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Cash,
    Online,
    Upi,
    Card,
    Other(String),
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "online" => PaymentMethod::Online,
            "upi" => PaymentMethod::Upi,
            "card" => PaymentMethod::Card,
            _ => PaymentMethod::Other(s),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> String {
        method.to_string()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Online => write!(f, "online"),
            PaymentMethod::Upi => write!(f, "upi"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One append-only entry in the payment ledger.
///
/// Payments are immutable once created; corrections are new entries. A
/// payment without a membership reference is a miscellaneous payment (made
/// while no membership was active) and is excluded from reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for this payment.
    pub id: PaymentId,

    /// Membership this payment settles, if one was active.
    pub membership_id: Option<MembershipId>,

    /// Member who paid.
    pub user_id: UserId,

    /// Amount paid; strictly positive.
    pub amount: Money,

    /// When the payment was taken.
    pub paid_at: Timestamp,

    /// How the payment was made.
    pub method: PaymentMethod,

    /// Free-text note from the recorder.
    pub notes: Option<String>,

    /// Receipt number issued for invoicing.
    pub receipt_no: ReceiptNumber,

    /// Admin who recorded the payment; None for gateway-originated.
    pub recorded_by: Option<UserId>,
}

impl Payment {
    /// Creates a ledger entry, rejecting non-positive amounts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PaymentId,
        membership_id: Option<MembershipId>,
        user_id: UserId,
        amount: Money,
        paid_at: Timestamp,
        method: PaymentMethod,
        notes: Option<String>,
        receipt_no: ReceiptNumber,
        recorded_by: Option<UserId>,
    ) -> Result<Self, ValidationError> {
        if !amount.is_positive() {
            return Err(ValidationError::invalid_format(
                "amount",
                "payment amount must be positive",
            ));
        }
        Ok(Self {
            id,
            membership_id,
            user_id,
            amount,
            paid_at,
            method,
            notes,
            receipt_no,
            recorded_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> ReceiptNumber {
        ReceiptNumber::generate("GYM", chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
    }

    #[test]
    fn creates_linked_payment() {
        let payment = Payment::new(
            PaymentId::new(),
            Some(MembershipId::new()),
            UserId::new("user-1").unwrap(),
            Money::from_rupees(500),
            Timestamp::now(),
            PaymentMethod::Cash,
            Some("Initial membership payment".to_string()),
            receipt(),
            Some(UserId::new("admin-1").unwrap()),
        )
        .unwrap();
        assert!(payment.membership_id.is_some());
    }

    #[test]
    fn rejects_zero_amount() {
        let result = Payment::new(
            PaymentId::new(),
            None,
            UserId::new("user-1").unwrap(),
            Money::ZERO,
            Timestamp::now(),
            PaymentMethod::Upi,
            None,
            receipt(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unlinked_payment_is_allowed() {
        let payment = Payment::new(
            PaymentId::new(),
            None,
            UserId::new("user-1").unwrap(),
            Money::from_rupees(50),
            Timestamp::now(),
            PaymentMethod::Cash,
            Some("Day pass".to_string()),
            receipt(),
            Some(UserId::new("admin-1").unwrap()),
        )
        .unwrap();
        assert!(payment.membership_id.is_none());
    }

    #[test]
    fn method_parses_known_strings_case_insensitively() {
        assert_eq!(PaymentMethod::from("UPI".to_string()), PaymentMethod::Upi);
        assert_eq!(PaymentMethod::from("Cash".to_string()), PaymentMethod::Cash);
    }

    #[test]
    fn method_preserves_unknown_strings() {
        let method = PaymentMethod::from("bank-transfer".to_string());
        assert_eq!(method, PaymentMethod::Other("bank-transfer".to_string()));
        assert_eq!(method.to_string(), "bank-transfer");
    }

    #[test]
    fn method_serializes_as_string() {
        let json = serde_json::to_string(&PaymentMethod::Online).unwrap();
        assert_eq!(json, "\"online\"");
        let parsed: PaymentMethod = serde_json::from_str("\"upi\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Upi);
    }
}
