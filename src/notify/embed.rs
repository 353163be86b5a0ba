// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rich embed payloads attached to notifications.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::printer::PrinterConfig;

/// Embed colour used for completed jobs (green).
pub const COMPLETED_COLOR: u32 = 0x002E_CC71;

/// A rich embed in the Discord embed layout.
///
/// # Examples
///
/// ```
/// use octowatch::notify::Embed;
///
/// let embed = Embed::new("Prusa MK4 finished printing")
///     .with_color(0x2ECC71)
///     .with_field("Printer", "mk4", true);
///
/// let json = serde_json::to_value(&embed).unwrap();
/// assert_eq!(json["fields"][0]["value"], "mk4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<EmbedField>,
}

/// Footer line of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    /// Footer text.
    pub text: String,
}

/// A name/value pair shown in an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    /// Field label.
    pub name: String,
    /// Field content.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

impl Embed {
    /// Creates an embed with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: None,
            color: None,
            timestamp: None,
            footer: None,
            fields: Vec::new(),
        }
    }

    /// Sets the description text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the link opened when the title is clicked.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the sidebar colour.
    #[must_use]
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the timestamp shown next to the footer.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp.to_rfc3339());
        self
    }

    /// Sets the footer text.
    #[must_use]
    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the link.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the colour.
    #[must_use]
    pub fn color(&self) -> Option<u32> {
        self.color
    }

    /// Returns the fields.
    #[must_use]
    pub fn fields(&self) -> &[EmbedField] {
        &self.fields
    }
}

/// Builds the embed attached to a job completion notification.
pub trait EmbedBuilder: Send + Sync {
    /// Builds the embed for `printer`, which finished a job at `completed_at`.
    fn build(&self, printer: &PrinterConfig, completed_at: DateTime<Utc>) -> Embed;
}

/// The embed used when the host does not supply its own builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEmbedBuilder;

impl EmbedBuilder for DefaultEmbedBuilder {
    fn build(&self, printer: &PrinterConfig, completed_at: DateTime<Utc>) -> Embed {
        Embed::new(format!("{} finished printing", printer.display_name()))
            .with_description("The printer is operational and ready for the next job.")
            .with_url(printer.endpoint())
            .with_color(COMPLETED_COLOR)
            .with_timestamp(completed_at)
            .with_field("Printer", printer.id().as_str(), true)
            .with_footer("octowatch")
    }
}
