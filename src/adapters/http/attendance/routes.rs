//! Axum router for attendance endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{mark_attendance, regular_absentees, AttendanceAppState};

/// Attendance routes, mounted at `/attendance`.
///
/// - `POST /` - mark a check-in by any member identifier (admin)
/// - `GET /absentees` - members absent past the threshold (admin)
pub fn attendance_routes() -> Router<AttendanceAppState> {
    Router::new()
        .route("/", post(mark_attendance))
        .route("/absentees", get(regular_absentees))
}

pub fn attendance_router() -> Router<AttendanceAppState> {
    Router::new().nest("/attendance", attendance_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Extension;
    use tower::ServiceExt;

    use crate::adapters::clock::FixedClock;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryAttendanceRepository, InMemoryMemberDirectory, InMemoryMembershipRepository,
    };
    use crate::domain::foundation::{Principal, Role, Timestamp, TimeZoneOffset, UserId};
    use crate::domain::member::MemberProfile;

    fn seeded_state() -> AttendanceAppState {
        let directory = Arc::new(InMemoryMemberDirectory::new());
        directory.seed(
            MemberProfile::new(
                UserId::new("u-1").unwrap(),
                "Arun",
                "M001",
                "arun@example.com",
                "+919876543210",
                Role::Member,
                None,
            )
            .unwrap(),
        );

        AttendanceAppState {
            directory,
            memberships: Arc::new(InMemoryMembershipRepository::new()),
            attendance: Arc::new(InMemoryAttendanceRepository::new()),
            publisher: Arc::new(InMemoryEventBus::new()),
            clock: Arc::new(FixedClock::at(Timestamp::now())),
            tz: TimeZoneOffset::ist(),
            country_code: "+91".to_string(),
            absentee_threshold_days: 7,
        }
    }

    fn admin() -> Principal {
        Principal::new(UserId::new("admin-1").unwrap(), Role::Admin)
    }

    async fn mark(app: Router, term: &str) -> StatusCode {
        let body = serde_json::json!({ "search_term": term });
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/attendance")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn mark_by_member_code_returns_created() {
        let state = seeded_state();
        let app = attendance_router()
            .layer(Extension(admin()))
            .with_state(state);

        assert_eq!(mark(app, "M001").await, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn second_mark_same_day_conflicts() {
        let state = seeded_state();
        let app = attendance_router()
            .layer(Extension(admin()))
            .with_state(state);

        assert_eq!(mark(app.clone(), "M001").await, StatusCode::CREATED);
        assert_eq!(mark(app, "arun").await, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_term_is_not_found() {
        let state = seeded_state();
        let app = attendance_router()
            .layer(Extension(admin()))
            .with_state(state);

        assert_eq!(mark(app, "nobody").await, StatusCode::NOT_FOUND);
    }
}
