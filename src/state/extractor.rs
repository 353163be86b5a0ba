// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction of a printer state from a job status response.
//!
//! Every outcome of a GET against `/api/job` ends up as exactly one
//! [`PrinterState`]. Failures go through [`classify`], which has a closed set
//! of outcomes ([`CheckFailure`]), and each outcome maps to one sentinel.

use serde_json::Value;

use crate::error::{ParseError, ProtocolError};

use super::PrinterState;

/// Name of the job report field holding the printer state.
pub const STATE_FIELD: &str = "state";

/// Why a printer's real state could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckFailure {
    /// The host could not be resolved or refused the connection.
    NetworkUnreachable,
    /// The request succeeded but returned no body.
    EmptyResponse,
    /// Anything else: bad JSON, missing or misshaped `state`, timeouts,
    /// error statuses.
    MalformedResponse,
}

impl CheckFailure {
    /// Returns the sentinel state recorded for this failure.
    #[must_use]
    pub fn sentinel(self) -> PrinterState {
        match self {
            Self::NetworkUnreachable => PrinterState::Offline,
            Self::EmptyResponse => PrinterState::NoResponse,
            Self::MalformedResponse => PrinterState::Error,
        }
    }
}

/// Reads the `state` field from a job report body.
///
/// The label is returned exactly as the device sent it.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is not a JSON object or its `state`
/// field is absent or not a string.
///
/// # Examples
///
/// ```
/// use octowatch::state::parse_job_state;
///
/// let body = r#"{"job": {"file": {"name": "benchy.gcode"}}, "state": "Printing"}"#;
/// assert_eq!(parse_job_state(body).unwrap(), "Printing");
///
/// assert!(parse_job_state("{}").is_err());
/// ```
pub fn parse_job_state(body: &str) -> Result<String, ParseError> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Object(report) = value else {
        return Err(ParseError::UnexpectedFormat(format!(
            "expected a JSON object, found {}",
            kind_of(&value)
        )));
    };

    match report.get(STATE_FIELD) {
        Some(Value::String(state)) => Ok(state.clone()),
        Some(other) => Err(ParseError::InvalidValue {
            field: STATE_FIELD.to_string(),
            message: format!("expected a string, found {}", kind_of(other)),
        }),
        None => Err(ParseError::MissingField(STATE_FIELD.to_string())),
    }
}

/// Classifies the outcome of a job status request.
///
/// Returns the device-reported label on success. Causes of malformed
/// responses are logged here, since the sentinel alone does not carry them.
///
/// # Errors
///
/// Returns the [`CheckFailure`] describing why no label was obtained.
pub fn classify(outcome: &Result<Option<String>, ProtocolError>) -> Result<String, CheckFailure> {
    match outcome {
        Err(e) if e.is_unreachable() => Err(CheckFailure::NetworkUnreachable),
        Err(e) => {
            tracing::warn!(error = %e, "Job status request failed");
            Err(CheckFailure::MalformedResponse)
        }
        Ok(None) => Err(CheckFailure::EmptyResponse),
        Ok(Some(body)) if body.trim().is_empty() => Err(CheckFailure::EmptyResponse),
        Ok(Some(body)) => parse_job_state(body).map_err(|e| {
            tracing::warn!(error = %e, "Malformed job status response");
            CheckFailure::MalformedResponse
        }),
    }
}

/// Turns the outcome of a job status request into a printer state.
///
/// # Examples
///
/// ```
/// use octowatch::error::ProtocolError;
/// use octowatch::state::{PrinterState, extract_state};
///
/// let ok = Ok(Some(r#"{"state": "Operational"}"#.to_string()));
/// assert_eq!(extract_state(&ok), PrinterState::operational());
///
/// let refused = Err(ProtocolError::Unreachable("connection refused".into()));
/// assert_eq!(extract_state(&refused), PrinterState::Offline);
///
/// assert_eq!(extract_state(&Ok(None)), PrinterState::NoResponse);
/// ```
#[must_use]
pub fn extract_state(outcome: &Result<Option<String>, ProtocolError>) -> PrinterState {
    match classify(outcome) {
        Ok(label) => PrinterState::Reported(label),
        Err(failure) => failure.sentinel(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
