//! Notification queue and dispatch worker.
//!
//! Handlers publish envelopes into a bounded tokio channel and return
//! immediately; the worker drains the channel, renders member-facing
//! notifications and hands them to the [`Notifier`]. Delivery is
//! best-effort end to end: a full queue or a failed send is logged and
//! the triggering operation is never failed or retried.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, EventEnvelope, TimeZoneOffset, UserId};
use crate::domain::member::MemberEvent;
use crate::domain::membership::MembershipEvent;
use crate::domain::payment::PaymentEvent;
use crate::ports::{EventPublisher, Notification, Notifier};

/// Publishing side of the notification queue.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<EventEnvelope>,
}

impl NotificationQueue {
    /// Creates the queue. The receiver goes to a [`NotificationWorker`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<EventEnvelope>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventPublisher for NotificationQueue {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        // Dropped events are logged, never surfaced to the caller.
        if let Err(err) = self.tx.try_send(event) {
            let envelope = match &err {
                mpsc::error::TrySendError::Full(e) => e,
                mpsc::error::TrySendError::Closed(e) => e,
            };
            warn!(
                event_type = %envelope.event_type,
                aggregate_id = %envelope.aggregate_id,
                "notification queue unavailable, event dropped"
            );
        }
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

/// Drains the queue and delivers notifications.
pub struct NotificationWorker {
    rx: mpsc::Receiver<EventEnvelope>,
    notifier: Arc<dyn Notifier>,
    tz: TimeZoneOffset,
}

impl NotificationWorker {
    pub fn new(
        rx: mpsc::Receiver<EventEnvelope>,
        notifier: Arc<dyn Notifier>,
        tz: TimeZoneOffset,
    ) -> Self {
        Self { rx, notifier, tz }
    }

    /// Runs until the queue's senders are all dropped.
    pub async fn run(mut self) {
        info!("notification worker started");
        while let Some(envelope) = self.rx.recv().await {
            let event_type = envelope.event_type.clone();
            match render_notification(&envelope, self.tz) {
                Some(notification) => {
                    if let Err(err) = self.notifier.send(notification).await {
                        warn!(%event_type, error = %err, "notification delivery failed");
                    }
                }
                None => {
                    debug!(%event_type, "no notification for event type");
                }
            }
        }
        info!("notification worker stopped");
    }
}

/// Renders the member-facing notification for an envelope, if the event
/// type has one.
pub fn render_notification(
    envelope: &EventEnvelope,
    tz: TimeZoneOffset,
) -> Option<Notification> {
    if envelope.event_type.starts_with("membership.") {
        let event: MembershipEvent = serde_json::from_value(envelope.payload.clone()).ok()?;
        return Some(render_membership(&event, tz));
    }
    if envelope.event_type.starts_with("payment.") {
        let event: PaymentEvent = serde_json::from_value(envelope.payload.clone()).ok()?;
        return Some(render_payment(&event));
    }
    if envelope.event_type.starts_with("member.") {
        let event: MemberEvent = serde_json::from_value(envelope.payload.clone()).ok()?;
        return Some(render_member(&event));
    }
    None
}

fn render_member(event: &MemberEvent) -> Notification {
    match event {
        MemberEvent::BirthdayToday { user_id, name, .. } => notification(
            user_id,
            "Happy birthday!",
            format!("Happy birthday, {name}! Come celebrate with a workout on us."),
        ),
    }
}

fn render_membership(event: &MembershipEvent, tz: TimeZoneOffset) -> Notification {
    match event {
        MembershipEvent::Activated {
            user_id,
            plan_name,
            start_date,
            end_date,
            ..
        } => notification(
            user_id,
            "Your membership is active",
            format!(
                "Your {} membership runs from {} to {}.",
                plan_name,
                tz.local_date(start_date),
                tz.local_date(end_date)
            ),
        ),
        MembershipEvent::Cancelled { user_id, .. } => notification(
            user_id,
            "Your membership was cancelled",
            "Your membership has been cancelled. Contact the front desk if this is unexpected."
                .to_string(),
        ),
        MembershipEvent::Revoked { user_id, .. } => notification(
            user_id,
            "Your membership was revoked",
            "Your membership has been revoked. Contact the front desk for details.".to_string(),
        ),
        MembershipEvent::RenewalDue {
            user_id,
            end_date,
            days_left,
            ..
        } => notification(
            user_id,
            "Membership renewal due",
            format!(
                "Your membership ends on {} ({} day(s) left). Renew to keep training.",
                tz.local_date(end_date),
                days_left
            ),
        ),
    }
}

fn render_payment(event: &PaymentEvent) -> Notification {
    match event {
        PaymentEvent::Received {
            user_id,
            amount,
            receipt_no,
            ..
        } => notification(
            user_id,
            "Payment received",
            format!("We received your payment of {amount}. Receipt: {receipt_no}."),
        ),
    }
}

fn notification(recipient: &UserId, subject: &str, body: String) -> Notification {
    Notification {
        recipient: recipient.clone(),
        subject: subject.to_string(),
        body,
    }
}
