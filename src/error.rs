// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `octowatch` library.
//!
//! Failures are split by the layer they come from: talking to a printer
//! controller, parsing its job report, delivering a notification, and
//! loading configuration. None of the per-printer failures ever escape the
//! polling loop; they are classified into sentinel states instead (see
//! [`crate::state::classify`]).

use thiserror::Error;

use crate::notify::ChannelId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to a printer controller.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a job report.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while delivering a notification.
    #[error("notification error: {0}")]
    Notify(#[from] NotifyError),

    /// The monitor or printer configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed for a reason not covered by another variant.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The host could not be resolved or refused the connection.
    #[error("host unreachable: {0}")]
    Unreachable(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The controller answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl ProtocolError {
    /// Returns `true` if the printer host could not be reached at all.
    ///
    /// Only DNS resolution failures and refused connections count; a timeout
    /// or an error status means something answered, or might have.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Errors related to parsing a printer's job report.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// A field is present but has the wrong shape.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The destination channel does not exist or is not accessible.
    #[error("notification channel {0} could not be resolved")]
    ChannelNotFound(ChannelId),

    /// The destination refused the message.
    #[error("notification rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status returned by the destination.
        status: u16,
        /// Body or reason returned by the destination.
        message: String,
    },

    /// The message could not be transmitted.
    #[error("notification transport failed: {0}")]
    Transport(String),
}

/// Errors related to configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for the expected shape.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// A printer was configured with an empty identifier.
    #[error("printer identifier must not be empty")]
    EmptyId,

    /// Two printers share the same identifier.
    #[error("duplicate printer identifier: {0}")]
    DuplicatePrinter(String),

    /// A printer endpoint is not an http(s) URL.
    #[error("invalid endpoint for printer {printer}: {endpoint}")]
    InvalidEndpoint {
        /// The printer the endpoint belongs to.
        printer: String,
        /// The rejected endpoint.
        endpoint: String,
    },

    /// The poll interval is zero.
    #[error("poll interval must be greater than zero")]
    InvalidInterval,

    /// No printers are configured.
    #[error("no printers configured")]
    EmptyRegistry,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
