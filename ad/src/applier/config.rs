//! Applier configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Applier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplierConfig {
    /// Round-trip budget per request in milliseconds. Bounds the enqueue
    /// wait and the wait for the result independently.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Capacity of the bounded request queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Grace period in milliseconds for each shutdown handshake
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,

    /// Member id baked into the high bits of every request id.
    /// Random when unset.
    #[serde(default)]
    pub member_id: Option<u64>,
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_queue_capacity() -> usize {
    1000
}

fn default_shutdown_grace_ms() -> u64 {
    5000
}

impl Default for ApplierConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 5000,
            queue_capacity: 1000,
            shutdown_grace_ms: 5000,
            member_id: None,
        }
    }
}

impl ApplierConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Get the shutdown grace period as a Duration
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApplierConfig::default();
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.queue_capacity, 1000);
        assert_eq!(config.shutdown_grace_ms, 5000);
        assert!(config.member_id.is_none());
    }

    #[test]
    fn test_duration_accessors() {
        let config = ApplierConfig {
            request_timeout_ms: 1500,
            shutdown_grace_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_millis(1500));
        assert_eq!(config.shutdown_grace(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ApplierConfig = serde_yaml::from_str("queue_capacity: 8\n").unwrap();
        assert_eq!(config.queue_capacity, 8);
        assert_eq!(config.request_timeout_ms, 5000);
        assert!(config.member_id.is_none());
    }
}
