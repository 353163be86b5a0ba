// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printer state monitoring.
//!
//! The [`PrinterMonitor`] polls every printer of a registry once per cycle,
//! feeds each observed state to a [`TransitionDetector`], and sends a
//! notification whenever a printer goes from `Printing` to `Operational`.
//! Between cycles it waits for the configured interval; the wait is
//! interrupted as soon as the monitor is stopped.
//!
//! Failures are isolated per printer. An unreachable or misbehaving printer
//! is recorded with a sentinel state and the cycle moves on to the next one.
//!
//! # Examples
//!
//! Driving cycles by hand, without a background task:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use octowatch::monitor::{MonitorConfig, PrinterMonitor};
//! use octowatch::notify::{ChannelId, DiscordWebhookSink};
//! use octowatch::printer::{PrinterConfig, PrinterRegistry};
//! use octowatch::protocol::HttpClient;
//!
//! # async fn example() -> octowatch::Result<()> {
//! let registry = PrinterRegistry::from_printers([
//!     PrinterConfig::new("ender", "http://ender.local", "KEY"),
//! ])?;
//! let monitor = PrinterMonitor::new(
//!     registry,
//!     Arc::new(HttpClient::new()?),
//!     Arc::new(DiscordWebhookSink::new()),
//!     MonitorConfig::new(ChannelId::new(1)),
//! )?;
//!
//! let report = monitor.poll_cycle().await;
//! for (printer, state) in &report.observations {
//!     println!("{printer}: {state}");
//! }
//! # Ok(())
//! # }
//! ```

mod handle;
mod monitor_config;
mod printer_monitor;
mod transition;

pub use handle::MonitorHandle;
pub use monitor_config::{DEFAULT_POLL_INTERVAL_MS, MonitorConfig};
pub use printer_monitor::{CycleReport, PrinterMonitor};
pub use transition::{Transition, TransitionDetector};
