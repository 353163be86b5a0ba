// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Job completion detection.

use parking_lot::Mutex;

use crate::printer::PrinterId;
use crate::state::{PrinterState, StateTable};

/// A detected `Printing → Operational` edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The printer that finished its job.
    pub printer: PrinterId,
    /// State observed on the previous check.
    pub from: PrinterState,
    /// State observed on this check.
    pub to: PrinterState,
}

/// Decides, observation by observation, when a printer finished a job.
///
/// A job counts as finished only when the previous observation was
/// `Printing` and the current one is `Operational`. The first observation of
/// a printer never fires, and neither does recovery from a sentinel such as
/// `offline`.
///
/// # Examples
///
/// ```
/// use octowatch::monitor::TransitionDetector;
/// use octowatch::printer::PrinterId;
/// use octowatch::state::PrinterState;
///
/// let detector = TransitionDetector::new();
/// let mk4 = PrinterId::new("mk4");
///
/// assert!(detector.observe(&mk4, PrinterState::printing()).is_none());
/// assert!(detector.observe(&mk4, PrinterState::operational()).is_some());
/// assert!(detector.observe(&mk4, PrinterState::operational()).is_none());
/// ```
#[derive(Debug, Default)]
pub struct TransitionDetector {
    table: Mutex<StateTable>,
}

impl TransitionDetector {
    /// Creates a detector with an empty state table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `new_state` for `printer` and returns the transition, if one
    /// fired.
    ///
    /// The state is stored whether or not the transition fires. The lookup
    /// and the store happen under the same lock, so concurrent observations
    /// of one printer never interleave.
    pub fn observe(&self, printer: &PrinterId, new_state: PrinterState) -> Option<Transition> {
        let last_state = self.table.lock().replace(printer.clone(), new_state.clone());

        (last_state.is_printing() && new_state.is_operational()).then(|| Transition {
            printer: printer.clone(),
            from: last_state,
            to: new_state,
        })
    }

    /// Returns the last observed state of a printer.
    #[must_use]
    pub fn state(&self, printer: &PrinterId) -> PrinterState {
        self.table.lock().state(printer)
    }

    /// Returns a copy of the state table.
    #[must_use]
    pub fn snapshot(&self) -> StateTable {
        self.table.lock().clone()
    }

    /// Returns the number of printers observed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    /// Returns `true` if nothing has been observed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn fires(detector: &TransitionDetector, printer: &PrinterId, state: PrinterState) -> bool {
        detector.observe(printer, state).is_some()
    }

    #[test]
    fn first_observation_never_fires() {
        for state in [
            PrinterState::operational(),
            PrinterState::printing(),
            PrinterState::Offline,
            PrinterState::Error,
            PrinterState::NoResponse,
            PrinterState::reported("Paused"),
        ] {
            let detector = TransitionDetector::new();
            assert!(!fires(&detector, &PrinterId::new("a"), state));
        }
    }

    #[test]
    fn printing_to_operational_fires_once() {
        let detector = TransitionDetector::new();
        let id = PrinterId::new("a");

        assert!(!fires(&detector, &id, PrinterState::printing()));
        let transition = detector
            .observe(&id, PrinterState::operational())
            .expect("edge should fire");
        assert_eq!(transition.printer, id);
        assert_eq!(transition.from, PrinterState::printing());
        assert_eq!(transition.to, PrinterState::operational());

        assert!(!fires(&detector, &id, PrinterState::operational()));
    }

    #[test]
    fn sentinel_between_printing_and_operational_suppresses_edge() {
        let detector = TransitionDetector::new();
        let id = PrinterId::new("a");

        assert!(!fires(&detector, &id, PrinterState::printing()));
        assert!(!fires(&detector, &id, PrinterState::Offline));
        assert!(!fires(&detector, &id, PrinterState::operational()));
    }

    #[test]
    fn repeated_printing_fires_at_operational() {
        let detector = TransitionDetector::new();
        let id = PrinterId::new("a");

        assert!(!fires(&detector, &id, PrinterState::printing()));
        assert!(!fires(&detector, &id, PrinterState::printing()));
        assert!(fires(&detector, &id, PrinterState::operational()));
    }

    #[test]
    fn other_states_do_not_fire() {
        let detector = TransitionDetector::new();
        let id = PrinterId::new("a");

        assert!(!fires(&detector, &id, PrinterState::reported("Paused")));
        assert!(!fires(&detector, &id, PrinterState::operational()));
        assert!(!fires(&detector, &id, PrinterState::printing()));
        assert!(!fires(&detector, &id, PrinterState::reported("Cancelling")));
        assert!(!fires(&detector, &id, PrinterState::operational()));
    }

    #[test]
    fn printers_are_tracked_independently() {
        let detector = TransitionDetector::new();
        let a = PrinterId::new("a");
        let b = PrinterId::new("b");

        assert!(!fires(&detector, &a, PrinterState::printing()));
        assert!(!fires(&detector, &b, PrinterState::operational()));
        assert!(fires(&detector, &a, PrinterState::operational()));
        assert!(!fires(&detector, &b, PrinterState::operational()));
    }

    #[test]
    fn state_is_written_even_without_firing() {
        let detector = TransitionDetector::new();
        let id = PrinterId::new("a");

        detector.observe(&id, PrinterState::Error);
        assert_eq!(detector.state(&id), PrinterState::Error);
        assert_eq!(detector.len(), 1);
    }

    #[test]
    fn concurrent_observations_fire_at_most_once() {
        let detector = Arc::new(TransitionDetector::new());
        let id = PrinterId::new("a");
        detector.observe(&id, PrinterState::printing());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let detector = Arc::clone(&detector);
                let id = id.clone();
                std::thread::spawn(move || detector.observe(&id, PrinterState::operational()))
            })
            .collect();

        let fired = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .count();
        assert_eq!(fired, 1);
    }
}
