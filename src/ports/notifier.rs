//! Notifier port.
//!
//! Outbound member notifications. Delivery is best-effort: the dispatch
//! worker logs failures and moves on, it never retries and never fails
//! the operation that raised the event.

use async_trait::async_trait;

use crate::domain::foundation::UserId;

/// A rendered notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: UserId,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("recipient has no deliverable address: {0}")]
    NoAddress(UserId),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), NotifierError>;
}
