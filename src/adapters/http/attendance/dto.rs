//! JSON request/response types for attendance endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::attendance::AbsenteeView;
use crate::domain::attendance::{Absence, CheckIn};

/// Request to mark attendance by any member identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    /// Free-form term: user id, member code, email, phone or name.
    pub search_term: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub id: String,
    pub user_id: String,
    pub checked_in_at: String,
}

impl From<CheckIn> for CheckInResponse {
    fn from(checkin: CheckIn) -> Self {
        Self {
            id: checkin.id.to_string(),
            user_id: checkin.user_id.to_string(),
            checked_in_at: checkin.checked_in_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Query for the absentee report; falls back to the configured default.
#[derive(Debug, Clone, Deserialize)]
pub struct AbsenteeParams {
    #[serde(default)]
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbsenteeResponse {
    pub user_id: String,
    pub name: String,
    pub member_code: String,
    pub absence: Absence,
}

impl From<AbsenteeView> for AbsenteeResponse {
    fn from(view: AbsenteeView) -> Self {
        Self {
            user_id: view.user_id.to_string(),
            name: view.name,
            member_code: view.member_code,
            absence: view.absence,
        }
    }
}
