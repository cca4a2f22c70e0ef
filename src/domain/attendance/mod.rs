//! Attendance domain module.
//!
//! Daily check-ins and the absence arithmetic behind the regular-absentee
//! report, plus the identifier-matching helpers used when front-desk staff
//! mark attendance by whatever the member happens to remember.

mod absence;
mod checkin;
mod errors;
mod events;
mod lookup;

pub use absence::{classify_absence, Absence};
pub use checkin::CheckIn;
pub use errors::AttendanceError;
pub use events::AttendanceEvent;
pub use lookup::{normalize_name, phone_variants, sort_name_matches};
