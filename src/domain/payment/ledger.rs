//! Payment reconciliation over the immutable ledger.
//!
//! Amounts owed are never stored; they are recomputed from the payment
//! rows every time a balance is read. An overpaid membership shows a
//! negative `amount_due`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::payment::{Payment, PaymentMethod};
use crate::domain::foundation::Money;

/// Reconciled balance for a single membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub amount_paid: Money,
    /// `final_price - amount_paid`. Negative when overpaid.
    pub amount_due: Money,
}

impl PaymentSummary {
    pub fn is_settled(&self) -> bool {
        self.amount_due.as_paise() <= 0
    }
}

/// Total collected per payment method, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub total: Money,
    pub count: u64,
}

/// Computes the balance of a membership from its ledger entries.
pub fn reconcile(final_price: Money, payments: &[Payment]) -> PaymentSummary {
    let amount_paid = payments
        .iter()
        .fold(Money::from_paise(0), |acc, p| acc + p.amount);
    PaymentSummary {
        amount_paid,
        amount_due: final_price - amount_paid,
    }
}

/// Groups ledger entries by method, ordered by method name.
pub fn totals_by_method(payments: &[Payment]) -> Vec<MethodTotal> {
    let mut buckets: BTreeMap<String, (PaymentMethod, Money, u64)> = BTreeMap::new();
    for payment in payments {
        let key = payment.method.to_string();
        let entry = buckets
            .entry(key)
            .or_insert((payment.method.clone(), Money::from_paise(0), 0));
        entry.1 += payment.amount;
        entry.2 += 1;
    }
    buckets
        .into_values()
        .map(|(method, total, count)| MethodTotal {
            method,
            total,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MembershipId, PaymentId, Timestamp, UserId};
    use crate::domain::payment::ReceiptNumber;

    fn payment(amount_paise: i64, method: PaymentMethod) -> Payment {
        Payment::new(
            PaymentId::new(),
            Some(MembershipId::new()),
            UserId::new("u-1").unwrap(),
            Money::from_paise(amount_paise),
            Timestamp::now(),
            method,
            None,
            ReceiptNumber::from_string("GYM-20260115-deadbeef"),
            None,
        )
        .unwrap()
    }

    #[test]
    fn no_payments_means_full_price_due() {
        let summary = reconcile(Money::from_rupees(900), &[]);
        assert_eq!(summary.amount_paid, Money::from_paise(0));
        assert_eq!(summary.amount_due, Money::from_rupees(900));
        assert!(!summary.is_settled());
    }

    #[test]
    fn partial_payment_leaves_remainder_due() {
        let payments = vec![payment(50_000, PaymentMethod::Cash)];
        let summary = reconcile(Money::from_rupees(900), &payments);
        assert_eq!(summary.amount_paid, Money::from_rupees(500));
        assert_eq!(summary.amount_due, Money::from_rupees(400));
    }

    #[test]
    fn overpayment_yields_negative_due() {
        let payments = vec![
            payment(90_000, PaymentMethod::Upi),
            payment(10_000, PaymentMethod::Cash),
        ];
        let summary = reconcile(Money::from_rupees(900), &payments);
        assert_eq!(summary.amount_due, Money::from_rupees(-100));
        assert!(summary.is_settled());
    }

    #[test]
    fn exact_payment_settles() {
        let payments = vec![payment(90_000, PaymentMethod::Card)];
        let summary = reconcile(Money::from_rupees(900), &payments);
        assert_eq!(summary.amount_due, Money::from_paise(0));
        assert!(summary.is_settled());
    }

    #[test]
    fn method_totals_group_and_count() {
        let payments = vec![
            payment(10_000, PaymentMethod::Cash),
            payment(20_000, PaymentMethod::Cash),
            payment(30_000, PaymentMethod::Upi),
        ];
        let totals = totals_by_method(&payments);
        assert_eq!(totals.len(), 2);
        let cash = totals.iter().find(|t| t.method == PaymentMethod::Cash).unwrap();
        assert_eq!(cash.total, Money::from_rupees(300));
        assert_eq!(cash.count, 2);
        let upi = totals.iter().find(|t| t.method == PaymentMethod::Upi).unwrap();
        assert_eq!(upi.total, Money::from_rupees(300));
        assert_eq!(upi.count, 1);
    }
}
