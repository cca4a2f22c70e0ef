//! HTTP handlers for attendance endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;

use crate::application::handlers::attendance::{
    MarkAttendanceCommand, MarkAttendanceHandler, RegularAbsenteesHandler, RegularAbsenteesQuery,
};
use crate::domain::foundation::{Principal, TimeZoneOffset};
use crate::ports::{
    AttendanceRepository, Clock, EventPublisher, MemberDirectory, MembershipRepository,
};

use super::super::error::ApiError;
use super::dto::{AbsenteeParams, AbsenteeResponse, CheckInResponse, MarkAttendanceRequest};

/// Shared dependencies for attendance endpoints, cloned per request.
#[derive(Clone)]
pub struct AttendanceAppState {
    pub directory: Arc<dyn MemberDirectory>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub publisher: Arc<dyn EventPublisher>,
    pub clock: Arc<dyn Clock>,
    pub tz: TimeZoneOffset,
    pub country_code: String,
    pub absentee_threshold_days: u32,
}

impl AttendanceAppState {
    fn mark_handler(&self) -> MarkAttendanceHandler {
        MarkAttendanceHandler::new(
            self.directory.clone(),
            self.attendance.clone(),
            self.publisher.clone(),
            self.clock.clone(),
            self.tz,
            self.country_code.clone(),
        )
    }

    fn absentees_handler(&self) -> RegularAbsenteesHandler {
        RegularAbsenteesHandler::new(
            self.directory.clone(),
            self.memberships.clone(),
            self.attendance.clone(),
            self.clock.clone(),
            self.tz,
        )
    }
}

/// POST /attendance
pub async fn mark_attendance(
    State(state): State<AttendanceAppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = MarkAttendanceCommand {
        principal,
        search_term: request.search_term,
    };

    let checkin = state.mark_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(CheckInResponse::from(checkin))))
}

/// GET /attendance/absentees?days=N
pub async fn regular_absentees(
    State(state): State<AttendanceAppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<AbsenteeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = RegularAbsenteesQuery {
        principal,
        threshold_days: params.days.unwrap_or(state.absentee_threshold_days),
    };

    let absentees = state.absentees_handler().handle(query).await?;
    let response: Vec<AbsenteeResponse> =
        absentees.into_iter().map(AbsenteeResponse::from).collect();
    Ok(Json(response))
}
