// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printer configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::PrinterId;

/// Path of the OctoPrint job endpoint, relative to the printer endpoint.
pub const JOB_PATH: &str = "/api/job";

/// Connection details for one printer controller.
///
/// # Examples
///
/// ```
/// use octowatch::printer::PrinterConfig;
///
/// let config = PrinterConfig::new("mk4", "http://octopi.local", "API-KEY")
///     .with_display_name("Prusa MK4");
///
/// assert_eq!(config.display_name(), "Prusa MK4");
/// assert_eq!(config.job_url(), "http://octopi.local/api/job?apikey=API-KEY");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    id: PrinterId,
    endpoint: String,
    api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl PrinterConfig {
    /// Creates a configuration for the printer served at `endpoint`.
    #[must_use]
    pub fn new(
        id: impl Into<PrinterId>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            display_name: None,
        }
    }

    /// Sets the name used in notifications.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns the printer identifier.
    #[must_use]
    pub fn id(&self) -> &PrinterId {
        &self.id
    }

    /// Returns the controller base URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the access key sent with each request.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the display name, falling back to the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Builds the job status URL polled every cycle.
    #[must_use]
    pub fn job_url(&self) -> String {
        format!(
            "{}{JOB_PATH}?apikey={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Checks that the identifier is set and the endpoint is an http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyId`] or [`ConfigError::InvalidEndpoint`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_blank() {
            return Err(ConfigError::EmptyId);
        }

        let has_scheme =
            self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://");
        let has_host = self
            .endpoint
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.trim_matches('/').is_empty());

        if !has_scheme || !has_host {
            return Err(ConfigError::InvalidEndpoint {
                printer: self.id.to_string(),
                endpoint: self.endpoint.clone(),
            });
        }

        Ok(())
    }
}

// The API key is kept out of debug output so configs can be logged.
impl fmt::Debug for PrinterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterConfig")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}
