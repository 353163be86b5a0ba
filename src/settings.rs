// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loading monitor settings from a JSON document.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::monitor::MonitorConfig;
use crate::printer::{PrinterConfig, PrinterRegistry};

/// Everything needed to set up a monitor.
///
/// # Examples
///
/// ```
/// use octowatch::Settings;
///
/// let settings = Settings::from_json_str(r#"{
///     "monitor": {"channel_id": 763350428296413215, "poll_interval_ms": 15000},
///     "printers": [
///         {"id": "mk4", "endpoint": "http://mk4.local", "api_key": "KEY",
///          "display_name": "Prusa MK4"}
///     ]
/// }"#)?;
///
/// let registry = settings.registry()?;
/// assert_eq!(registry.len(), 1);
/// # Ok::<(), octowatch::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Loop settings.
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Printers to poll, in polling order.
    #[serde(default)]
    pub printers: Vec<PrinterConfig>,
}

impl Settings {
    /// Parses and validates settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document is malformed or fails
    /// validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates the loop settings and every printer.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monitor.validate()?;
        if self.printers.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        self.registry().map(|_| ())
    }

    /// Builds the printer registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a printer is invalid or an identifier repeats.
    pub fn registry(&self) -> Result<PrinterRegistry, ConfigError> {
        PrinterRegistry::from_printers(self.printers.iter().cloned())
    }
}
