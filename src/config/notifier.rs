//! Notification delivery settings.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Whether notifications are delivered at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Sender name shown on outgoing notifications.
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Capacity of the in-process notification queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            from_name: default_from_name(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_from_name() -> String {
    "GymDesk".to_string()
}

fn default_queue_capacity() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_enabled() {
        let config = NotifierConfig::default();
        assert!(config.enabled);
        assert_eq!(config.queue_capacity, 256);
    }
}
