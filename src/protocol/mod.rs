// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport used to query printer controllers.
//!
//! The monitor only needs one operation from the network: a GET that yields
//! the response body, nothing, or a classified [`ProtocolError`]. The
//! [`HttpGet`] trait captures that, so hosts can supply their own transport
//! and tests can script responses.
//!
//! With the `http` feature enabled, [`HttpClient`] provides a reqwest-based
//! implementation.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use async_trait::async_trait;

use crate::error::ProtocolError;

/// A transport able to perform HTTP GET requests.
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// Returns `Ok(None)` when the request succeeded but carried no body.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`]; hosts that cannot be resolved or refuse
    /// the connection must be reported as [`ProtocolError::Unreachable`].
    async fn get(&self, url: &str) -> Result<Option<String>, ProtocolError>;
}

/// Strips the query string from a URL so it can be logged without the API key.
pub(crate) fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
