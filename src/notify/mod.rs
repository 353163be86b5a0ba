// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Job completion notifications.
//!
//! A notification is a formatted text message plus a rich [`Embed`],
//! delivered to one fixed destination channel through a
//! [`NotificationSink`]. Delivery is fire-and-forget: the monitor logs
//! failures and never retries.
//!
//! With the `http` feature enabled, [`DiscordWebhookSink`] delivers through
//! Discord channel webhooks.

#[cfg(feature = "http")]
mod discord;
mod embed;
mod message;

#[cfg(feature = "http")]
pub use discord::DiscordWebhookSink;
pub use embed::{COMPLETED_COLOR, DefaultEmbedBuilder, Embed, EmbedBuilder, EmbedField, EmbedFooter};
pub use message::{MessageTemplate, PRINTER_PLACEHOLDER};

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Identifier of a notification destination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Creates a channel identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChannelId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A destination for job completion notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers `message` with `embed` to `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::ChannelNotFound`] if the channel cannot be
    /// resolved, or another [`NotifyError`] if delivery fails.
    async fn send(&self, channel: ChannelId, message: &str, embed: &Embed)
    -> Result<(), NotifyError>;
}
