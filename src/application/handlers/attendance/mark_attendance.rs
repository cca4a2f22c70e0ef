//! MarkAttendanceHandler - front-desk daily check-in.

use std::sync::Arc;

use tracing::warn;

use crate::domain::attendance::{
    phone_variants, sort_name_matches, AttendanceError, AttendanceEvent, CheckIn,
};
use crate::domain::foundation::{
    AttendanceId, EventId, Principal, SerializableDomainEvent, TimeZoneOffset, UserId,
};
use crate::domain::member::MemberProfile;
use crate::ports::{AttendanceRepository, Clock, EventPublisher, MemberDirectory};

/// Staff enter whatever the member remembers; `search_term` is matched
/// down the lookup ladder.
#[derive(Debug, Clone)]
pub struct MarkAttendanceCommand {
    pub principal: Principal,
    pub search_term: String,
}

/// Resolves the member and records one check-in per local calendar day.
///
/// Lookup ladder, first rung wins: exact user id, exact member code,
/// case-insensitive member code, case-insensitive email, phone variants
/// with and without the country prefix, exact case-insensitive name,
/// partial case-insensitive name with deterministic (name, id) ordering.
pub struct MarkAttendanceHandler {
    directory: Arc<dyn MemberDirectory>,
    attendance: Arc<dyn AttendanceRepository>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    tz: TimeZoneOffset,
    country_code: String,
}

impl MarkAttendanceHandler {
    pub fn new(
        directory: Arc<dyn MemberDirectory>,
        attendance: Arc<dyn AttendanceRepository>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        tz: TimeZoneOffset,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            attendance,
            publisher,
            clock,
            tz,
            country_code: country_code.into(),
        }
    }

    pub async fn handle(&self, cmd: MarkAttendanceCommand) -> Result<CheckIn, AttendanceError> {
        cmd.principal.require_admin()?;

        let term = cmd.search_term.trim();
        let profile = self
            .resolve(term)
            .await?
            .ok_or_else(|| AttendanceError::MemberNotFound(term.to_string()))?;

        let now = self.clock.now();
        let (day_start, day_end) = self.tz.day_bounds(&now);
        let today = self
            .attendance
            .find_for_user_between(&profile.user_id, day_start, day_end)
            .await?;
        if !today.is_empty() {
            return Err(AttendanceError::AlreadyMarked {
                user_id: profile.user_id,
                date: self.tz.local_date(&now),
            });
        }

        let checkin = CheckIn::new(AttendanceId::new(), profile.user_id.clone(), now);
        self.attendance.append(&checkin).await?;

        let envelope = AttendanceEvent::Recorded {
            event_id: EventId::new(),
            attendance_id: checkin.id,
            user_id: checkin.user_id.clone(),
            checked_in_at: now,
            occurred_at: now,
        }
        .to_envelope();
        if let Err(err) = self.publisher.publish(envelope).await {
            warn!(error = %err, "event publish failed");
        }

        Ok(checkin)
    }

    async fn resolve(&self, term: &str) -> Result<Option<MemberProfile>, AttendanceError> {
        if term.is_empty() {
            return Ok(None);
        }

        if let Ok(user_id) = UserId::new(term) {
            if let Some(profile) = self.directory.find_by_user_id(&user_id).await? {
                return Ok(Some(profile));
            }
        }
        if let Some(profile) = self.directory.find_by_member_code(term).await? {
            return Ok(Some(profile));
        }
        if let Some(profile) = self.directory.find_by_member_code_ci(term).await? {
            return Ok(Some(profile));
        }
        if let Some(profile) = self.directory.find_by_email_ci(term).await? {
            return Ok(Some(profile));
        }
        for variant in phone_variants(term, &self.country_code) {
            if let Some(profile) = self.directory.find_by_phone(&variant).await? {
                return Ok(Some(profile));
            }
        }
        if let Some(profile) = self.directory.find_by_name_ci(term).await? {
            return Ok(Some(profile));
        }
        let mut matches = self.directory.search_by_name_ci(term).await?;
        sort_name_matches(&mut matches);
        Ok(matches.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryAttendanceRepository, InMemoryMemberDirectory};
    use crate::domain::foundation::{Role, Timestamp};

    struct Fixture {
        directory: Arc<InMemoryMemberDirectory>,
        attendance: Arc<InMemoryAttendanceRepository>,
        bus: Arc<InMemoryEventBus>,
        clock: Arc<FixedClock>,
        handler: MarkAttendanceHandler,
    }

    fn fixture() -> Fixture {
        let directory = Arc::new(InMemoryMemberDirectory::new());
        let attendance = Arc::new(InMemoryAttendanceRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(FixedClock::at(Timestamp::now()));
        let handler = MarkAttendanceHandler::new(
            directory.clone(),
            attendance.clone(),
            bus.clone(),
            clock.clone(),
            TimeZoneOffset::ist(),
            "+91",
        );
        Fixture {
            directory,
            attendance,
            bus,
            clock,
            handler,
        }
    }

    fn seed(fx: &Fixture, id: &str, name: &str, code: &str, email: &str, phone: &str) {
        fx.directory.seed(
            MemberProfile::new(
                UserId::new(id).unwrap(),
                name,
                code,
                email,
                phone,
                Role::Member,
                None,
            )
            .unwrap(),
        );
    }

    fn command(term: &str) -> MarkAttendanceCommand {
        MarkAttendanceCommand {
            principal: Principal::new(UserId::new("admin-1").unwrap(), Role::Admin),
            search_term: term.to_string(),
        }
    }

    async fn marked_for(fx: &Fixture, term: &str) -> UserId {
        fx.handler.handle(command(term)).await.unwrap().user_id
    }

    #[tokio::test]
    async fn exact_user_id_wins_first() {
        let fx = fixture();
        seed(
            &fx,
            "u-1",
            "Asha Rao",
            "F3-0004",
            "Asha@Example.com",
            "+919812345678",
        );

        assert_eq!(marked_for(&fx, "u-1").await.as_str(), "u-1");
        assert_eq!(fx.attendance.all().len(), 1);
    }

    #[tokio::test]
    async fn member_code_is_case_insensitive() {
        let fx = fixture();
        seed(&fx, "u-1", "Asha Rao", "F3-0004", "asha@example.com", "+919812345678");
        assert_eq!(marked_for(&fx, "f3-0004").await.as_str(), "u-1");
    }

    #[tokio::test]
    async fn email_lookup_ignores_case() {
        let fx = fixture();
        seed(&fx, "u-1", "Asha Rao", "F3-0004", "asha@example.com", "+919812345678");
        assert_eq!(marked_for(&fx, "ASHA@EXAMPLE.COM").await.as_str(), "u-1");
    }

    #[tokio::test]
    async fn phone_matches_without_country_prefix() {
        let fx = fixture();
        seed(&fx, "u-1", "Asha Rao", "F3-0004", "asha@example.com", "+919812345678");
        assert_eq!(marked_for(&fx, "9812345678").await.as_str(), "u-1");
    }

    #[tokio::test]
    async fn partial_name_ties_break_deterministically() {
        let fx = fixture();
        seed(&fx, "u-2", "Arun Mehta", "F3-0002", "b@example.com", "+919800000002");
        seed(&fx, "u-1", "Arun Kumar", "F3-0001", "a@example.com", "+919800000001");

        // Both contain "arun"; lowercased-name order picks Arun Kumar.
        assert_eq!(marked_for(&fx, "arun").await.as_str(), "u-1");
    }

    #[tokio::test]
    async fn no_match_is_not_found() {
        let fx = fixture();
        let err = fx.handler.handle(command("nobody")).await.unwrap_err();
        assert!(matches!(err, AttendanceError::MemberNotFound(_)));
    }

    #[tokio::test]
    async fn second_same_day_checkin_conflicts() {
        let fx = fixture();
        seed(&fx, "u-1", "Asha Rao", "F3-0004", "asha@example.com", "+919812345678");

        fx.handler.handle(command("u-1")).await.unwrap();
        let err = fx.handler.handle(command("u-1")).await.unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyMarked { .. }));
        assert_eq!(fx.attendance.all().len(), 1);
        assert_eq!(fx.bus.events_of_type("attendance.recorded.v1").len(), 1);
    }

    #[tokio::test]
    async fn next_local_day_allows_checkin_again() {
        let fx = fixture();
        seed(&fx, "u-1", "Asha Rao", "F3-0004", "asha@example.com", "+919812345678");

        fx.handler.handle(command("u-1")).await.unwrap();
        fx.clock.advance_days(1);
        fx.handler.handle(command("u-1")).await.unwrap();
        assert_eq!(fx.attendance.all().len(), 2);
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let fx = fixture();
        let mut cmd = command("u-1");
        cmd.principal = Principal::new(UserId::new("u-1").unwrap(), Role::Member);
        let err = fx.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, AttendanceError::Forbidden(_)));
    }
}
