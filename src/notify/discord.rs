// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discord webhook notification sink.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::error::NotifyError;

use super::{ChannelId, Embed, NotificationSink};

/// Delivers notifications to Discord through channel webhooks.
///
/// Each [`ChannelId`] the monitor may post to is mapped to the webhook URL
/// of that channel. Posting to an unmapped channel, or to a webhook that
/// Discord no longer knows, fails with [`NotifyError::ChannelNotFound`].
///
/// # Examples
///
/// ```
/// use octowatch::notify::{ChannelId, DiscordWebhookSink};
///
/// let sink = DiscordWebhookSink::new()
///     .with_webhook(ChannelId::new(42), "https://discord.com/api/webhooks/1/abc")
///     .with_username("Print Monitor");
///
/// assert!(sink.has_channel(ChannelId::new(42)));
/// ```
#[derive(Debug, Clone)]
pub struct DiscordWebhookSink {
    client: Client,
    webhooks: HashMap<ChannelId, String>,
    username: Option<String>,
}

impl DiscordWebhookSink {
    /// Creates a sink with no channels.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates a sink that reuses an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            webhooks: HashMap::new(),
            username: None,
        }
    }

    /// Maps a channel to its webhook URL.
    #[must_use]
    pub fn with_webhook(mut self, channel: ChannelId, webhook_url: impl Into<String>) -> Self {
        self.webhooks.insert(channel, webhook_url.into());
        self
    }

    /// Overrides the webhook's username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Returns `true` if a webhook is configured for the channel.
    #[must_use]
    pub fn has_channel(&self, channel: ChannelId) -> bool {
        self.webhooks.contains_key(&channel)
    }

    /// Builds the webhook payload.
    fn build_payload(&self, message: &str, embed: &Embed) -> serde_json::Value {
        let mut payload = json!({
            "content": message,
            "embeds": [embed],
        });

        if let Some(username) = &self.username {
            payload["username"] = json!(username);
        }

        payload
    }
}

impl Default for DiscordWebhookSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhookSink {
    async fn send(
        &self,
        channel: ChannelId,
        message: &str,
        embed: &Embed,
    ) -> Result<(), NotifyError> {
        let webhook_url = self
            .webhooks
            .get(&channel)
            .ok_or(NotifyError::ChannelNotFound(channel))?;

        let payload = self.build_payload(message, embed);

        let response = self
            .client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%channel, "Discord notification sent");
            return Ok(());
        }

        // Discord answers 404 for deleted webhooks.
        if status == StatusCode::NOT_FOUND {
            return Err(NotifyError::ChannelNotFound(channel));
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            message: body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_contains_message_and_embed() {
        let sink = DiscordWebhookSink::new();
        let payload = sink.build_payload("done", &Embed::new("MK4 finished printing"));

        assert_eq!(payload["content"], "done");
        assert_eq!(payload["embeds"][0]["title"], "MK4 finished printing");
        assert!(payload.get("username").is_none());
    }

    #[test]
    fn payload_with_username() {
        let sink = DiscordWebhookSink::new().with_username("GeekBot");
        let payload = sink.build_payload("done", &Embed::new("t"));
        assert_eq!(payload["username"], "GeekBot");
    }

    #[tokio::test]
    async fn unmapped_channel_is_not_found() {
        let sink = DiscordWebhookSink::new();
        let err = sink
            .send(ChannelId::new(7), "done", &Embed::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::ChannelNotFound(c) if c == ChannelId::new(7)));
    }
}
