//! Payment request repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PaymentRequestId, UserId};
use crate::domain::payment::PaymentRequest;

#[async_trait]
pub trait PaymentRequestRepository: Send + Sync {
    async fn save(&self, request: &PaymentRequest) -> Result<(), DomainError>;

    /// Update an existing request (approval or rejection).
    ///
    /// # Errors
    ///
    /// - `PaymentRequestNotFound` if the row does not exist
    async fn update(&self, request: &PaymentRequest) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        id: &PaymentRequestId,
    ) -> Result<Option<PaymentRequest>, DomainError>;

    /// Pending requests, oldest first, for the admin queue.
    async fn list_pending(&self) -> Result<Vec<PaymentRequest>, DomainError>;

    /// All requests by one member, newest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<PaymentRequest>, DomainError>;
}
