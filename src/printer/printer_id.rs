// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printer identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a configured printer.
///
/// Identifiers are chosen when the registry is configured (for example
/// `"prusa-mk4"`) and never change while the process runs. They key the
/// state table and appear in every log line about the printer.
///
/// # Examples
///
/// ```
/// use octowatch::printer::PrinterId;
///
/// let id = PrinterId::new("prusa-mk4");
/// assert_eq!(id.as_str(), "prusa-mk4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrinterId(String);

impl PrinterId {
    /// Creates an identifier from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PrinterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrinterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PrinterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for PrinterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_by_text() {
        assert_eq!(PrinterId::new("ender"), PrinterId::from("ender"));
        assert_ne!(PrinterId::new("ender"), PrinterId::new("Ender"));
    }

    #[test]
    fn display_format() {
        let id = PrinterId::new("voron-2.4");
        assert_eq!(id.to_string(), "voron-2.4");
    }

    #[test]
    fn blank_detection() {
        assert!(PrinterId::new("  ").is_blank());
        assert!(!PrinterId::new("mk3").is_blank());
    }

    #[test]
    fn deserializes_from_plain_string() {
        let id: PrinterId = serde_json::from_str("\"mk3s\"").unwrap();
        assert_eq!(id.as_str(), "mk3s");
    }

    #[test]
    fn hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(PrinterId::new("a"));
        assert!(set.contains(&PrinterId::new("a")));
    }
}
