//! Event bus adapters.
//!
//! - `in_memory` - synchronous capture bus for tests
//! - `queue` - bounded notification queue and its dispatch worker

mod in_memory;
mod queue;

pub use in_memory::InMemoryEventBus;
pub use queue::{render_notification, NotificationQueue, NotificationWorker};
