//! Membership lifecycle endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::MembershipAppState;
pub use routes::membership_router;
