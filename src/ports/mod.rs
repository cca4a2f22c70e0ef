//! Ports - interfaces between the domain and the outside world.
//!
//! Following hexagonal architecture, handlers depend on these traits and
//! adapters implement them.
//!
//! ## Persistence ports
//!
//! - `PlanRepository` - plan catalogue
//! - `MembershipRepository` - membership aggregates
//! - `PaymentRepository` - append-only payment ledger
//! - `PaymentRequestRepository` - pending-request workflow
//! - `AttendanceRepository` - check-in log
//! - `MemberDirectory` - member profiles and identifier lookup
//!
//! ## Infrastructure ports
//!
//! - `Clock` - current time, injectable for tests
//! - `EventPublisher` - domain event fan-out
//! - `Notifier` - outbound member notifications
//! - `MemberLock` - per-member mutual exclusion for coverage writes
//! - `SweepStateStore` - daily sweep bookkeeping

mod attendance_repository;
mod clock;
mod event_publisher;
mod member_directory;
mod member_lock;
mod membership_repository;
mod notifier;
mod payment_repository;
mod payment_request_repository;
mod plan_repository;
mod sweep_state;

pub use attendance_repository::AttendanceRepository;
pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use member_directory::MemberDirectory;
pub use member_lock::{MemberLock, MemberLockGuard};
pub use membership_repository::MembershipRepository;
pub use notifier::{Notification, Notifier, NotifierError};
pub use payment_repository::PaymentRepository;
pub use payment_request_repository::PaymentRequestRepository;
pub use plan_repository::PlanRepository;
pub use sweep_state::SweepStateStore;
