//! Attendance handlers.

mod mark_attendance;
mod regular_absentees;

pub use mark_attendance::{MarkAttendanceCommand, MarkAttendanceHandler};
pub use regular_absentees::{
    AbsenteeView, RegularAbsenteesHandler, RegularAbsenteesQuery,
};
