// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notify::{ChannelId, MessageTemplate};

/// Default delay between two polling cycles, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

/// Settings of the polling loop.
///
/// # Examples
///
/// ```
/// use octowatch::monitor::MonitorConfig;
/// use octowatch::notify::ChannelId;
/// use std::time::Duration;
///
/// let config = MonitorConfig::new(ChannelId::new(763_350_428_296_413_215))
///     .with_poll_interval(Duration::from_secs(30))
///     .with_message_template("<@&807485697841299457> printer {printer} is done");
///
/// assert_eq!(config.poll_interval(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Delay between the end of one cycle and the start of the next.
    pub poll_interval_ms: u64,
    /// Channel job completion notifications are sent to.
    pub channel_id: ChannelId,
    /// Message sent with every notification.
    pub message_template: MessageTemplate,
    /// Whether the printers of one cycle are queried concurrently.
    pub concurrent_checks: bool,
}

impl MonitorConfig {
    /// Creates a configuration that notifies `channel_id`.
    #[must_use]
    pub fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            ..Self::default()
        }
    }

    /// Sets the delay between cycles.
    ///
    /// Sub-millisecond precision is dropped.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the message template.
    #[must_use]
    pub fn with_message_template(mut self, template: impl Into<String>) -> Self {
        self.message_template = MessageTemplate::new(template);
        self
    }

    /// Enables or disables concurrent checks within a cycle.
    #[must_use]
    pub fn with_concurrent_checks(mut self, enabled: bool) -> Self {
        self.concurrent_checks = enabled;
        self
    }

    /// Returns the delay between cycles.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInterval`] if the poll interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            channel_id: ChannelId::default(),
            message_template: MessageTemplate::default(),
            concurrent_checks: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert_eq!(config.message_template, MessageTemplate::default());
        assert!(!config.concurrent_checks);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{"channel_id": 763350428296413215}"#).unwrap();
        assert_eq!(config.channel_id, ChannelId::new(763_350_428_296_413_215));
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn deserializes_all_fields() {
        let config: MonitorConfig = serde_json::from_str(
            r#"{
                "poll_interval_ms": 2500,
                "channel_id": 1,
                "message_template": "{printer} done",
                "concurrent_checks": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(2500));
        assert_eq!(config.message_template.render("mk4"), "mk4 done");
        assert!(config.concurrent_checks);
    }

    #[test]
    fn zero_interval_is_invalid() {
        let config = MonitorConfig::default().with_poll_interval(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidInterval)));
    }
}
