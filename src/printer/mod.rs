// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printer identities and the registry the monitor polls.
//!
//! A [`PrinterConfig`] carries everything needed to reach one OctoPrint
//! controller: its endpoint URL and API key. The [`PrinterRegistry`] is the
//! fixed, ordered list of printers checked every polling cycle.

mod printer_config;
mod printer_id;
mod registry;

pub use printer_config::{JOB_PATH, PrinterConfig};
pub use printer_id::PrinterId;
pub use registry::PrinterRegistry;
