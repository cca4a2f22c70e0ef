//! Adapters - implementations of port interfaces.
//!
//! - `clock` - system and fixed clocks
//! - `memory` - in-memory repositories for tests and local runs
//! - `postgres` - sqlx-backed repositories
//! - `events` - in-memory capture bus and the notification queue
//! - `notifier` - outbound notification channels
//! - `scheduler` - daily sweep loop
//! - `http` - axum routes and DTOs

pub mod clock;
pub mod events;
pub mod http;
pub mod memory;
pub mod notifier;
pub mod postgres;
pub mod scheduler;
