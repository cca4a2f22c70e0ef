//! In-memory payment request repository.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentRequestId, UserId};
use crate::domain::payment::PaymentRequest;
use crate::ports::PaymentRequestRepository;

#[derive(Default)]
pub struct InMemoryPaymentRequestRepository {
    requests: RwLock<HashMap<PaymentRequestId, PaymentRequest>>,
}

impl InMemoryPaymentRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, request: PaymentRequest) {
        self.requests
            .write()
            .expect("InMemoryPaymentRequestRepository lock poisoned")
            .insert(request.id, request);
    }
}

#[async_trait]
impl PaymentRequestRepository for InMemoryPaymentRequestRepository {
    async fn save(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        self.requests
            .write()
            .expect("InMemoryPaymentRequestRepository lock poisoned")
            .insert(request.id, request.clone());
        Ok(())
    }

    async fn update(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        let mut rows = self
            .requests
            .write()
            .expect("InMemoryPaymentRequestRepository lock poisoned");
        if !rows.contains_key(&request.id) {
            return Err(DomainError::new(
                ErrorCode::PaymentRequestNotFound,
                format!("payment request not found: {}", request.id),
            ));
        }
        rows.insert(request.id, request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &PaymentRequestId,
    ) -> Result<Option<PaymentRequest>, DomainError> {
        Ok(self
            .requests
            .read()
            .expect("InMemoryPaymentRequestRepository lock poisoned")
            .get(id)
            .cloned())
    }

    async fn list_pending(&self) -> Result<Vec<PaymentRequest>, DomainError> {
        let mut rows: Vec<PaymentRequest> = self
            .requests
            .read()
            .expect("InMemoryPaymentRequestRepository lock poisoned")
            .values()
            .filter(|r| r.status.is_pending())
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<PaymentRequest>, DomainError> {
        let mut rows: Vec<PaymentRequest> = self
            .requests
            .read()
            .expect("InMemoryPaymentRequestRepository lock poisoned")
            .values()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
