// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! reqwest-based HTTP transport.

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ProtocolError;
use crate::protocol::{HttpGet, redact_query};

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the HTTP transport.
///
/// # Examples
///
/// ```
/// use octowatch::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("octowatch-test");
///
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    timeout: Duration,
    user_agent: String,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: format!("octowatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            client,
            timeout: self.timeout,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP transport backed by a shared [`reqwest::Client`].
///
/// # Examples
///
/// ```no_run
/// use octowatch::protocol::{HttpClient, HttpGet};
///
/// # async fn example() -> octowatch::Result<()> {
/// let client = HttpClient::new()?;
/// let body = client.get("http://octopi.local/api/job?apikey=KEY").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        HttpConfig::new().into_client()
    }

    /// Maps a reqwest failure onto the transport error taxonomy.
    ///
    /// Timeouts are checked first: a connect attempt that times out did not
    /// get refused, so it is not reported as unreachable. Other connect
    /// failures, such as TLS handshake errors, stay [`ProtocolError::Http`].
    /// The URL is stripped from the error since it carries the API key.
    fn classify(&self, url: &str, err: reqwest::Error) -> ProtocolError {
        let err = err.without_url();

        if err.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if err.is_connect() && is_refused_or_unresolved(&err) {
            ProtocolError::Unreachable(error_chain(&err))
        } else if err.is_builder() {
            ProtocolError::InvalidAddress(redact_query(url).to_string())
        } else {
            ProtocolError::Http(err)
        }
    }
}

/// Returns `true` if the error chain holds a refused connection or a failed
/// name lookup.
fn is_refused_or_unresolved(err: &reqwest::Error) -> bool {
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<io::Error>()
            && io.kind() == io::ErrorKind::ConnectionRefused
        {
            return true;
        }
        // hyper-util reports resolver failures as a connect error whose
        // message is "dns error".
        if cause.to_string().starts_with("dns error") {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Joins an error and its causes into one line.
fn error_chain(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[async_trait]
impl HttpGet for HttpClient {
    async fn get(&self, url: &str) -> Result<Option<String>, ProtocolError> {
        tracing::debug!(url = %redact_query(url), "Sending HTTP request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(url, e))?;

        tracing::debug!(body = %body, "Received HTTP response");

        if body.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}
