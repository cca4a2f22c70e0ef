//! In-memory payment ledger.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MembershipId, Timestamp, UserId};
use crate::domain::payment::Payment;
use crate::ports::PaymentRepository;

#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, payment: Payment) {
        self.payments
            .write()
            .expect("InMemoryPaymentRepository lock poisoned")
            .push(payment);
    }

    pub fn all(&self) -> Vec<Payment> {
        self.payments
            .read()
            .expect("InMemoryPaymentRepository lock poisoned")
            .clone()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn append(&self, payment: &Payment) -> Result<(), DomainError> {
        self.payments
            .write()
            .expect("InMemoryPaymentRepository lock poisoned")
            .push(payment.clone());
        Ok(())
    }

    async fn find_by_membership(
        &self,
        membership_id: &MembershipId,
    ) -> Result<Vec<Payment>, DomainError> {
        let mut rows: Vec<Payment> = self
            .all()
            .into_iter()
            .filter(|p| p.membership_id.as_ref() == Some(membership_id))
            .collect();
        rows.sort_by(|a, b| a.paid_at.cmp(&b.paid_at));
        Ok(rows)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        let mut rows: Vec<Payment> = self
            .all()
            .into_iter()
            .filter(|p| &p.user_id == user_id)
            .collect();
        rows.sort_by(|a, b| a.paid_at.cmp(&b.paid_at));
        Ok(rows)
    }

    async fn find_in_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Payment>, DomainError> {
        let mut rows: Vec<Payment> = self
            .all()
            .into_iter()
            .filter(|p| p.paid_at >= from && p.paid_at < to)
            .collect();
        rows.sort_by(|a, b| a.paid_at.cmp(&b.paid_at));
        Ok(rows)
    }
}
