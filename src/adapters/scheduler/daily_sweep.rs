//! Daily sweep: renewal reminders and birthday greetings.
//!
//! Runs at most once per local calendar day. The last-run date is
//! persisted through `SweepStateStore`, so a process restart on the same
//! day does not re-fire, and a missed day fires on the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use tracing::{info, warn};

use crate::domain::foundation::{
    DomainError, EventEnvelope, EventId, SerializableDomainEvent, TimeZoneOffset,
};
use crate::domain::member::MemberEvent;
use crate::domain::membership::MembershipEvent;
use crate::ports::{
    Clock, EventPublisher, MemberDirectory, MembershipRepository, SweepStateStore,
};

/// What a sweep tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Already ran for today's local date.
    Skipped,
    /// Ran; counts of reminders and greetings published.
    Ran {
        renewal_reminders: usize,
        birthday_greetings: usize,
    },
}

pub struct DailySweep {
    memberships: Arc<dyn MembershipRepository>,
    directory: Arc<dyn MemberDirectory>,
    publisher: Arc<dyn EventPublisher>,
    state: Arc<dyn SweepStateStore>,
    clock: Arc<dyn Clock>,
    tz: TimeZoneOffset,
    renewal_reminder_days: u32,
}

impl DailySweep {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        directory: Arc<dyn MemberDirectory>,
        publisher: Arc<dyn EventPublisher>,
        state: Arc<dyn SweepStateStore>,
        clock: Arc<dyn Clock>,
        tz: TimeZoneOffset,
        renewal_reminder_days: u32,
    ) -> Self {
        Self {
            memberships,
            directory,
            publisher,
            state,
            clock,
            tz,
            renewal_reminder_days,
        }
    }

    /// Polls once per `interval`; the once-per-day guard is in
    /// `run_once`, so the interval only bounds detection latency.
    pub async fn run(self, interval: Duration) {
        info!("daily sweep started");
        loop {
            if let Err(err) = self.run_once().await {
                warn!(error = %err, "daily sweep tick failed");
            }
            tokio::time::sleep(interval).await;
        }
    }

    pub async fn run_once(&self) -> Result<SweepOutcome, DomainError> {
        let now = self.clock.now();
        let today = self.tz.local_date(&now);

        if self.state.last_run().await? == Some(today) {
            return Ok(SweepOutcome::Skipped);
        }

        let mut renewal_reminders = 0;
        let window_end = now.add_days(self.renewal_reminder_days as i64);
        for membership in self.memberships.find_ending_within(now, window_end).await? {
            let days_left = self.tz.days_between(&now, &membership.end_date).max(0) as u32;
            let envelope = MembershipEvent::RenewalDue {
                event_id: EventId::new(),
                membership_id: membership.id,
                user_id: membership.user_id.clone(),
                end_date: membership.end_date,
                days_left,
                occurred_at: now,
            }
            .to_envelope();
            self.publish_best_effort(envelope).await;
            renewal_reminders += 1;
        }

        let mut birthday_greetings = 0;
        for profile in self.directory.list_members().await? {
            let Some(dob) = profile.date_of_birth else {
                continue;
            };
            if dob.month() == today.month() && dob.day() == today.day() {
                let envelope = MemberEvent::BirthdayToday {
                    event_id: EventId::new(),
                    user_id: profile.user_id.clone(),
                    name: profile.name.clone(),
                    occurred_at: now,
                }
                .to_envelope();
                self.publish_best_effort(envelope).await;
                birthday_greetings += 1;
            }
        }

        self.state.record_run(today).await?;
        info!(renewal_reminders, birthday_greetings, %today, "daily sweep ran");
        Ok(SweepOutcome::Ran {
            renewal_reminders,
            birthday_greetings,
        })
    }

    async fn publish_best_effort(&self, envelope: EventEnvelope) {
        if let Err(err) = self.publisher.publish(envelope).await {
            warn!(error = %err, "event publish failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryMemberDirectory, InMemoryMembershipRepository, InMemorySweepState,
    };
    use crate::domain::foundation::{MembershipId, Money, PlanId, Role, Timestamp, UserId};
    use crate::domain::member::MemberProfile;
    use crate::domain::membership::{Membership, MembershipPeriod, PriceQuote};
    use chrono::NaiveDate;

    struct Fixture {
        memberships: Arc<InMemoryMembershipRepository>,
        directory: Arc<InMemoryMemberDirectory>,
        bus: Arc<InMemoryEventBus>,
        clock: Arc<FixedClock>,
        sweep: DailySweep,
    }

    fn fixture() -> Fixture {
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let directory = Arc::new(InMemoryMemberDirectory::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(FixedClock::at(Timestamp::now()));
        let sweep = DailySweep::new(
            memberships.clone(),
            directory.clone(),
            bus.clone(),
            Arc::new(InMemorySweepState::new()),
            clock.clone(),
            TimeZoneOffset::ist(),
            7,
        );
        Fixture {
            memberships,
            directory,
            bus,
            clock,
            sweep,
        }
    }

    fn seed_membership(fx: &Fixture, ends_in_days: i64) {
        let now = fx.clock.now();
        fx.memberships.seed(Membership::create(
            MembershipId::new(),
            UserId::new("member-1").unwrap(),
            PlanId::new(),
            MembershipPeriod::new(now.minus_days(30), now.add_days(ends_in_days)).unwrap(),
            PriceQuote::new(Money::from_rupees(1000), Money::from_paise(0)).unwrap(),
            now.minus_days(30),
        ));
    }

    fn seed_member(fx: &Fixture, id: &str, dob: Option<NaiveDate>) {
        fx.directory.seed(
            MemberProfile::new(
                UserId::new(id).unwrap(),
                format!("Member {id}"),
                format!("F3-{id}"),
                format!("{id}@example.com"),
                "+919800000000",
                Role::Member,
                dob,
            )
            .unwrap(),
        );
    }

    #[tokio::test]
    async fn reminds_memberships_ending_inside_window() {
        let fx = fixture();
        seed_membership(&fx, 3);

        let outcome = fx.sweep.run_once().await.unwrap();
        assert_eq!(
            outcome,
            SweepOutcome::Ran {
                renewal_reminders: 1,
                birthday_greetings: 0
            }
        );
        assert_eq!(fx.bus.events_of_type("membership.renewal_due.v1").len(), 1);
    }

    #[tokio::test]
    async fn membership_outside_window_is_ignored() {
        let fx = fixture();
        seed_membership(&fx, 30);

        fx.sweep.run_once().await.unwrap();
        assert!(!fx.bus.has_event("membership.renewal_due.v1"));
    }

    #[tokio::test]
    async fn second_tick_same_day_skips() {
        let fx = fixture();
        seed_membership(&fx, 3);

        fx.sweep.run_once().await.unwrap();
        let outcome = fx.sweep.run_once().await.unwrap();
        assert_eq!(outcome, SweepOutcome::Skipped);
        assert_eq!(fx.bus.events_of_type("membership.renewal_due.v1").len(), 1);
    }

    #[tokio::test]
    async fn next_day_runs_again() {
        let fx = fixture();
        seed_membership(&fx, 3);

        fx.sweep.run_once().await.unwrap();
        fx.clock.advance_days(1);
        let outcome = fx.sweep.run_once().await.unwrap();
        assert!(matches!(outcome, SweepOutcome::Ran { .. }));
    }

    #[tokio::test]
    async fn publish_failure_does_not_fail_the_tick() {
        struct FailingPublisher;

        #[async_trait::async_trait]
        impl EventPublisher for FailingPublisher {
            async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
                Err(DomainError::new(
                    crate::domain::foundation::ErrorCode::InternalError,
                    "bus down",
                ))
            }

            async fn publish_all(&self, _events: Vec<EventEnvelope>) -> Result<(), DomainError> {
                Err(DomainError::new(
                    crate::domain::foundation::ErrorCode::InternalError,
                    "bus down",
                ))
            }
        }

        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let clock = Arc::new(FixedClock::at(Timestamp::now()));
        let sweep = DailySweep::new(
            memberships.clone(),
            Arc::new(InMemoryMemberDirectory::new()),
            Arc::new(FailingPublisher),
            Arc::new(InMemorySweepState::new()),
            clock.clone(),
            TimeZoneOffset::ist(),
            7,
        );
        let now = clock.now();
        memberships.seed(Membership::create(
            MembershipId::new(),
            UserId::new("member-1").unwrap(),
            PlanId::new(),
            MembershipPeriod::new(now.minus_days(30), now.add_days(3)).unwrap(),
            PriceQuote::new(Money::from_rupees(1000), Money::from_paise(0)).unwrap(),
            now.minus_days(30),
        ));

        let outcome = sweep.run_once().await.unwrap();
        assert_eq!(
            outcome,
            SweepOutcome::Ran {
                renewal_reminders: 1,
                birthday_greetings: 0
            }
        );
    }

    #[tokio::test]
    async fn birthday_greeting_matches_month_and_day() {
        let fx = fixture();
        let today = TimeZoneOffset::ist().local_date(&fx.clock.now());
        let dob = NaiveDate::from_ymd_opt(1990, today.month(), today.day()).unwrap();
        seed_member(&fx, "bday", Some(dob));
        seed_member(&fx, "other", None);

        let outcome = fx.sweep.run_once().await.unwrap();
        assert_eq!(
            outcome,
            SweepOutcome::Ran {
                renewal_reminders: 0,
                birthday_greetings: 1
            }
        );
        assert!(fx.bus.has_event("member.birthday.v1"));
    }
}
