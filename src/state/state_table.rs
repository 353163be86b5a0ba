// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last observed state per printer.

use std::collections::HashMap;

use crate::printer::PrinterId;

use super::PrinterState;

/// Mapping from printer to the state observed on the latest check.
///
/// Entries are created on first observation and never removed. Printers
/// that were never observed read as [`PrinterState::Unknown`].
///
/// # Examples
///
/// ```
/// use octowatch::printer::PrinterId;
/// use octowatch::state::{PrinterState, StateTable};
///
/// let table = StateTable::new();
/// assert_eq!(table.state(&PrinterId::new("mk4")), PrinterState::Unknown);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTable {
    states: HashMap<PrinterId, PrinterState>,
}

impl StateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last observed state, or `Unknown` if there is none.
    #[must_use]
    pub fn state(&self, printer: &PrinterId) -> PrinterState {
        self.states.get(printer).cloned().unwrap_or_default()
    }

    /// Returns the stored entry for a printer, if it was ever observed.
    #[must_use]
    pub fn get(&self, printer: &PrinterId) -> Option<&PrinterState> {
        self.states.get(printer)
    }

    /// Stores `state` and returns what was stored before (`Unknown` if none).
    pub(crate) fn replace(&mut self, printer: PrinterId, state: PrinterState) -> PrinterState {
        self.states.insert(printer, state).unwrap_or_default()
    }

    /// Iterates over all observed printers, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&PrinterId, &PrinterState)> {
        self.states.iter()
    }

    /// Returns the number of observed printers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no printer has been observed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_printer_is_unknown() {
        let table = StateTable::new();
        assert!(table.get(&PrinterId::new("a")).is_none());
        assert_eq!(table.state(&PrinterId::new("a")), PrinterState::Unknown);
    }

    #[test]
    fn replace_returns_previous() {
        let mut table = StateTable::new();
        let id = PrinterId::new("a");

        assert_eq!(
            table.replace(id.clone(), PrinterState::printing()),
            PrinterState::Unknown
        );
        assert_eq!(
            table.replace(id.clone(), PrinterState::Offline),
            PrinterState::printing()
        );
        assert_eq!(table.state(&id), PrinterState::Offline);
    }

    #[test]
    fn one_entry_per_printer() {
        let mut table = StateTable::new();
        for _ in 0..3 {
            table.replace(PrinterId::new("a"), PrinterState::operational());
        }
        table.replace(PrinterId::new("b"), PrinterState::Error);
        assert_eq!(table.len(), 2);
    }
}
