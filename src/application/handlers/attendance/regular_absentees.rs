//! RegularAbsenteesHandler - members who have stopped showing up.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::attendance::{classify_absence, Absence, AttendanceError};
use crate::domain::foundation::{Principal, TimeZoneOffset, UserId};
use crate::ports::{AttendanceRepository, Clock, MemberDirectory, MembershipRepository};

#[derive(Debug, Clone)]
pub struct RegularAbsenteesQuery {
    pub principal: Principal,
    pub threshold_days: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbsenteeView {
    pub user_id: UserId,
    pub name: String,
    pub member_code: String,
    pub absence: Absence,
}

/// For every member holding an active membership: never checked in, or
/// last check-in more than `threshold_days` local days ago.
pub struct RegularAbsenteesHandler {
    directory: Arc<dyn MemberDirectory>,
    memberships: Arc<dyn MembershipRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    clock: Arc<dyn Clock>,
    tz: TimeZoneOffset,
}

impl RegularAbsenteesHandler {
    pub fn new(
        directory: Arc<dyn MemberDirectory>,
        memberships: Arc<dyn MembershipRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        clock: Arc<dyn Clock>,
        tz: TimeZoneOffset,
    ) -> Self {
        Self {
            directory,
            memberships,
            attendance,
            clock,
            tz,
        }
    }

    pub async fn handle(
        &self,
        query: RegularAbsenteesQuery,
    ) -> Result<Vec<AbsenteeView>, AttendanceError> {
        query.principal.require_admin()?;

        let now = self.clock.now();
        let mut absentees = Vec::new();

        // One lookup per active member; fine at gym scale.
        for profile in self.directory.list_members().await? {
            let has_active = !self
                .memberships
                .find_active_by_user(&profile.user_id)
                .await?
                .is_empty();
            if !has_active {
                continue;
            }

            let last = self
                .attendance
                .last_for_user(&profile.user_id)
                .await?
                .map(|c| c.checked_in_at);
            let absence = classify_absence(last, now, self.tz);
            if absence.exceeds(query.threshold_days) {
                absentees.push(AbsenteeView {
                    user_id: profile.user_id,
                    name: profile.name,
                    member_code: profile.member_code,
                    absence,
                });
            }
        }

        Ok(absentees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::{
        InMemoryAttendanceRepository, InMemoryMemberDirectory, InMemoryMembershipRepository,
    };
    use crate::domain::attendance::CheckIn;
    use crate::domain::foundation::{
        AttendanceId, MembershipId, Money, PlanId, Role, Timestamp,
    };
    use crate::domain::member::MemberProfile;
    use crate::domain::membership::{Membership, MembershipPeriod, PriceQuote};

    struct Fixture {
        directory: Arc<InMemoryMemberDirectory>,
        memberships: Arc<InMemoryMembershipRepository>,
        attendance: Arc<InMemoryAttendanceRepository>,
        clock: Arc<FixedClock>,
        handler: RegularAbsenteesHandler,
    }

    fn fixture() -> Fixture {
        let directory = Arc::new(InMemoryMemberDirectory::new());
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let attendance = Arc::new(InMemoryAttendanceRepository::new());
        let clock = Arc::new(FixedClock::at(Timestamp::now()));
        let handler = RegularAbsenteesHandler::new(
            directory.clone(),
            memberships.clone(),
            attendance.clone(),
            clock.clone(),
            TimeZoneOffset::ist(),
        );
        Fixture {
            directory,
            memberships,
            attendance,
            clock,
            handler,
        }
    }

    fn seed_member(fx: &Fixture, id: &str, with_active_membership: bool) -> UserId {
        let user_id = UserId::new(id).unwrap();
        fx.directory.seed(
            MemberProfile::new(
                user_id.clone(),
                format!("Member {id}"),
                format!("F3-{id}"),
                format!("{id}@example.com"),
                "+919800000000",
                Role::Member,
                None,
            )
            .unwrap(),
        );
        if with_active_membership {
            let now = fx.clock.now();
            fx.memberships.seed(Membership::create(
                MembershipId::new(),
                user_id.clone(),
                PlanId::new(),
                MembershipPeriod::from_duration(now.minus_days(15), 90),
                PriceQuote::new(Money::from_rupees(1000), Money::from_paise(0)).unwrap(),
                now,
            ));
        }
        user_id
    }

    fn checkin(fx: &Fixture, user_id: &UserId, days_ago: i64) {
        fx.attendance.seed(CheckIn::new(
            AttendanceId::new(),
            user_id.clone(),
            fx.clock.now().minus_days(days_ago),
        ));
    }

    fn query(threshold_days: u32) -> RegularAbsenteesQuery {
        RegularAbsenteesQuery {
            principal: Principal::new(UserId::new("admin-1").unwrap(), Role::Admin),
            threshold_days,
        }
    }

    #[tokio::test]
    async fn classifies_day_counts_and_never_attended() {
        let fx = fixture();
        let away = seed_member(&fx, "away", true);
        checkin(&fx, &away, 10);
        let never = seed_member(&fx, "never", true);
        let regular = seed_member(&fx, "regular", true);
        checkin(&fx, &regular, 1);

        let report = fx.handler.handle(query(7)).await.unwrap();
        assert_eq!(report.len(), 2);

        let away_row = report.iter().find(|r| r.user_id == away).unwrap();
        assert_eq!(away_row.absence, Absence::AbsentFor { days: 10 });
        let never_row = report.iter().find(|r| r.user_id == never).unwrap();
        assert_eq!(never_row.absence, Absence::NeverAttended);
    }

    #[tokio::test]
    async fn members_without_active_membership_are_skipped() {
        let fx = fixture();
        seed_member(&fx, "lapsed", false);

        let report = fx.handler.handle(query(7)).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn exactly_threshold_days_is_not_yet_absent() {
        let fx = fixture();
        let edge = seed_member(&fx, "edge", true);
        checkin(&fx, &edge, 7);
        let over = seed_member(&fx, "over", true);
        checkin(&fx, &over, 8);

        let report = fx.handler.handle(query(7)).await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].user_id, over);
        assert_eq!(report[0].absence, Absence::AbsentFor { days: 8 });
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let fx = fixture();
        let err = fx
            .handler
            .handle(RegularAbsenteesQuery {
                principal: Principal::new(UserId::new("u-1").unwrap(), Role::Member),
                threshold_days: 7,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Forbidden(_)));
    }
}
