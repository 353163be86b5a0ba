// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printer job state.

use std::fmt;

/// Label OctoPrint reports for an idle printer.
pub const OPERATIONAL: &str = "Operational";

/// Label OctoPrint reports while a job is running.
pub const PRINTING: &str = "Printing";

/// The most recently observed state of a printer.
///
/// Real device labels are kept verbatim in [`PrinterState::Reported`]. The
/// other variants are sentinels produced locally when the real state could
/// not be obtained. Because sentinels are distinct variants, a device that
/// literally reports `"offline"` is never mistaken for an unreachable one.
///
/// # Examples
///
/// ```
/// use octowatch::state::PrinterState;
///
/// let state = PrinterState::reported("Printing");
/// assert!(state.is_printing());
/// assert!(!state.is_sentinel());
///
/// assert_eq!(PrinterState::Offline.as_str(), "offline");
/// assert!(PrinterState::Offline.is_sentinel());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PrinterState {
    /// Nothing has been observed yet.
    #[default]
    Unknown,

    /// The controller answered without a body.
    NoResponse,

    /// The controller host could not be resolved or refused the connection.
    Offline,

    /// Any other failure, including malformed responses.
    Error,

    /// A state label reported by the controller.
    Reported(String),
}

impl PrinterState {
    /// Creates a state from a device-reported label.
    #[must_use]
    pub fn reported(label: impl Into<String>) -> Self {
        Self::Reported(label.into())
    }

    /// The idle state, `Operational`.
    #[must_use]
    pub fn operational() -> Self {
        Self::reported(OPERATIONAL)
    }

    /// The busy state, `Printing`.
    #[must_use]
    pub fn printing() -> Self {
        Self::reported(PRINTING)
    }

    /// Returns the textual label of this state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "unknown",
            Self::NoResponse => "no-response",
            Self::Offline => "offline",
            Self::Error => "error",
            Self::Reported(label) => label,
        }
    }

    /// Returns `true` if the device reported that a job is running.
    #[must_use]
    pub fn is_printing(&self) -> bool {
        matches!(self, Self::Reported(label) if label == PRINTING)
    }

    /// Returns `true` if the device reported that it is idle.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Reported(label) if label == OPERATIONAL)
    }

    /// Returns `true` for locally synthesized states.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Reported(_))
    }
}

impl fmt::Display for PrinterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
