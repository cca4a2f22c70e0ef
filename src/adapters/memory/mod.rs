//! In-memory adapters.
//!
//! Deterministic, lock-based implementations of the persistence and
//! infrastructure ports, used by handler tests and local development.
//! Methods panic on poisoned locks; do not use in production.

mod attendance_repository;
mod lock_manager;
mod member_directory;
mod membership_repository;
mod payment_repository;
mod payment_request_repository;
mod plan_repository;
mod sweep_state;

pub use attendance_repository::InMemoryAttendanceRepository;
pub use lock_manager::InMemoryMemberLock;
pub use member_directory::InMemoryMemberDirectory;
pub use membership_repository::InMemoryMembershipRepository;
pub use payment_repository::InMemoryPaymentRepository;
pub use payment_request_repository::InMemoryPaymentRequestRepository;
pub use plan_repository::InMemoryPlanRepository;
pub use sweep_state::InMemorySweepState;
