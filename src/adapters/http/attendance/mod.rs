//! Attendance endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AttendanceAppState;
pub use routes::attendance_router;
