// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered printer registry.

use crate::error::ConfigError;

use super::{PrinterConfig, PrinterId};

/// The fixed set of printers the monitor polls.
///
/// Printers are checked in insertion order every cycle. Identifiers are
/// unique and every entry has been validated.
///
/// # Examples
///
/// ```
/// use octowatch::printer::{PrinterConfig, PrinterRegistry};
///
/// let registry = PrinterRegistry::from_printers([
///     PrinterConfig::new("mk4", "http://mk4.local", "KEY1"),
///     PrinterConfig::new("ender", "http://ender.local", "KEY2"),
/// ])?;
///
/// assert_eq!(registry.len(), 2);
/// # Ok::<(), octowatch::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrinterRegistry {
    printers: Vec<PrinterConfig>,
}

impl PrinterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of printers.
    ///
    /// # Errors
    ///
    /// Returns an error if a printer fails validation or an identifier is
    /// used twice.
    pub fn from_printers(
        printers: impl IntoIterator<Item = PrinterConfig>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for printer in printers {
            registry.add(printer)?;
        }
        Ok(registry)
    }

    /// Adds a printer at the end of the polling order.
    ///
    /// # Errors
    ///
    /// Returns an error if the printer fails validation or its identifier is
    /// already registered.
    pub fn add(&mut self, printer: PrinterConfig) -> Result<(), ConfigError> {
        printer.validate()?;

        if self.contains(printer.id()) {
            return Err(ConfigError::DuplicatePrinter(printer.id().to_string()));
        }

        self.printers.push(printer);
        Ok(())
    }

    /// Returns the printer with the given identifier.
    #[must_use]
    pub fn get(&self, id: &PrinterId) -> Option<&PrinterConfig> {
        self.printers.iter().find(|p| p.id() == id)
    }

    /// Returns `true` if a printer with this identifier is registered.
    #[must_use]
    pub fn contains(&self, id: &PrinterId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over printers in polling order.
    pub fn iter(&self) -> std::slice::Iter<'_, PrinterConfig> {
        self.printers.iter()
    }

    /// Returns the identifiers in polling order.
    #[must_use]
    pub fn ids(&self) -> Vec<PrinterId> {
        self.printers.iter().map(|p| p.id().clone()).collect()
    }

    /// Returns the number of printers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.printers.len()
    }

    /// Returns `true` if no printers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }
}

impl<'a> IntoIterator for &'a PrinterRegistry {
    type Item = &'a PrinterConfig;
    type IntoIter = std::slice::Iter<'a, PrinterConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
