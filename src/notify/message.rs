// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification message template.

use serde::{Deserialize, Serialize};

/// Placeholder replaced with the printer's display name.
pub const PRINTER_PLACEHOLDER: &str = "{printer}";

/// Text template for job completion messages.
///
/// Every occurrence of `{printer}` is replaced with the printer's display
/// name. Anything else, such as role mentions, is sent unchanged.
///
/// # Examples
///
/// ```
/// use octowatch::notify::MessageTemplate;
///
/// let template = MessageTemplate::new("<@&42> printer {printer} is done");
/// assert_eq!(template.render("Prusa MK4"), "<@&42> printer Prusa MK4 is done");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTemplate(String);

impl MessageTemplate {
    /// Template used when none is configured.
    pub const DEFAULT: &'static str = "printer {printer} has completed its job";

    /// Creates a template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the message for a printer.
    #[must_use]
    pub fn render(&self, printer_name: &str) -> String {
        self.0.replace(PRINTER_PLACEHOLDER, printer_name)
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}
