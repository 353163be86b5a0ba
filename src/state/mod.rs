// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printer state types.
//!
//! [`PrinterState`] is what a single check yields, [`extract_state`] derives
//! it from a job status response, and [`StateTable`] keeps the latest state
//! of every printer between polling cycles.
//!
//! # Examples
//!
//! ```
//! use octowatch::state::{PrinterState, extract_state};
//!
//! let outcome = Ok(Some(r#"{"state": "Printing"}"#.to_string()));
//! assert!(extract_state(&outcome).is_printing());
//! ```

mod extractor;
mod printer_state;
mod state_table;

pub use extractor::{CheckFailure, STATE_FIELD, classify, extract_state, parse_job_state};
pub use printer_state::{OPERATIONAL, PRINTING, PrinterState};
pub use state_table::StateTable;
