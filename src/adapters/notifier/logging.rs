//! Logging notifier.
//!
//! Writes notifications to the structured log instead of a delivery
//! channel. The default until an SMS or email gateway is wired in, and
//! handy in development.

use async_trait::async_trait;
use tracing::info;

use crate::ports::{Notification, Notifier, NotifierError};

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifierError> {
        info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            body = %notification.body,
            "notification"
        );
        Ok(())
    }
}
