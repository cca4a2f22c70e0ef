//! EventPublisher port - publishing domain events.
//!
//! The domain publishes events without knowing the underlying transport
//! (in-memory capture in tests, the notification queue in production).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Delivery is at-least-once; consumers may see duplicates and must
/// tolerate them.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event envelope.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several envelopes in order. Sequential best-effort where
    /// the adapter has no atomic batch.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
