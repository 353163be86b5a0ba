// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `octowatch` - job completion notifications for OctoPrint printers.
//!
//! This library polls a fleet of OctoPrint controllers over HTTP, remembers
//! the job state each one reported on the previous cycle, and sends a single
//! notification when a printer goes from `Printing` to `Operational`.
//!
//! # Components
//!
//! - [`printer`]: printer identities and the registry that is polled
//! - [`protocol`]: the HTTP transport ([`HttpGet`] and a reqwest client)
//! - [`state`]: printer states and their extraction from job reports
//! - [`monitor`]: transition detection and the polling loop
//! - [`notify`]: notification sinks, messages and embeds
//!
//! # Failure Handling
//!
//! A printer that cannot be reached is recorded as `offline`, one that
//! answers without a body as `no-response`, and anything else that goes
//! wrong as `error`. None of these count as `Printing`, so a printer that
//! drops off the network mid-job and comes back idle does not trigger a
//! notification.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use octowatch::notify::DiscordWebhookSink;
//! use octowatch::protocol::HttpClient;
//! use octowatch::{PrinterMonitor, Settings};
//!
//! #[tokio::main]
//! async fn main() -> octowatch::Result<()> {
//!     let settings = Settings::from_json_str(r#"{
//!         "monitor": {"channel_id": 763350428296413215},
//!         "printers": [{"id": "mk4", "endpoint": "http://mk4.local", "api_key": "KEY"}]
//!     }"#)?;
//!
//!     let sink = DiscordWebhookSink::new().with_webhook(
//!         settings.monitor.channel_id,
//!         "https://discord.com/api/webhooks/1/abc",
//!     );
//!
//!     let handle = PrinterMonitor::new(
//!         settings.registry()?,
//!         Arc::new(HttpClient::new()?),
//!         Arc::new(sink),
//!         settings.monitor,
//!     )?
//!     .spawn();
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod monitor;
pub mod notify;
pub mod printer;
pub mod protocol;
mod settings;
pub mod state;

pub use error::{ConfigError, Error, NotifyError, ParseError, ProtocolError, Result};
pub use monitor::{
    CycleReport, MonitorConfig, MonitorHandle, PrinterMonitor, Transition, TransitionDetector,
};
pub use notify::{ChannelId, Embed, EmbedBuilder, NotificationSink};
pub use printer::{PrinterConfig, PrinterId, PrinterRegistry};
pub use protocol::HttpGet;
pub use settings::Settings;
pub use state::{PrinterState, StateTable};
