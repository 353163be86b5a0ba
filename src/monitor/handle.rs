// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle to a running monitor.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::printer::PrinterId;
use crate::state::{PrinterState, StateTable};

use super::printer_monitor::PrinterMonitor;

/// Controls a monitor started with [`PrinterMonitor::spawn`].
///
/// Dropping the handle stops the monitor.
#[derive(Debug)]
pub struct MonitorHandle {
    monitor: Arc<PrinterMonitor>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl MonitorHandle {
    pub(crate) fn new(
        monitor: Arc<PrinterMonitor>,
        cancel: CancellationToken,
        task: JoinHandle<()>,
    ) -> Self {
        let guard = cancel.clone().drop_guard();
        Self {
            monitor,
            cancel,
            task,
            _guard: guard,
        }
    }

    /// Signals the loop to stop.
    ///
    /// A loop waiting between cycles exits right away; a cycle in progress
    /// is finished first. No new cycle starts afterwards.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once [`stop`](Self::stop) has been called.
    #[must_use]
    pub fn is_stopping(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns `true` while the loop task has not exited.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Returns the monitor driven by this handle.
    #[must_use]
    pub fn monitor(&self) -> &PrinterMonitor {
        &self.monitor
    }

    /// Returns a copy of the current state table.
    #[must_use]
    pub fn states(&self) -> StateTable {
        self.monitor.detector().snapshot()
    }

    /// Returns the last observed state of a printer.
    #[must_use]
    pub fn state(&self, printer: &PrinterId) -> PrinterState {
        self.monitor.detector().state(printer)
    }

    /// Stops the loop and waits for its task to exit.
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Printer state monitor terminated abnormally");
        }
    }
}
