// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The polling loop.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{ConfigError, NotifyError};
use crate::notify::{DefaultEmbedBuilder, EmbedBuilder, NotificationSink};
use crate::printer::{PrinterConfig, PrinterId, PrinterRegistry};
use crate::protocol::{HttpGet, redact_query};
use crate::state::{PrinterState, extract_state};

use super::handle::MonitorHandle;
use super::monitor_config::MonitorConfig;
use super::transition::{Transition, TransitionDetector};

/// What one polling cycle observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// State observed for each printer, in registry order.
    pub observations: Vec<(PrinterId, PrinterState)>,
    /// Job completions detected during the cycle.
    pub transitions: Vec<Transition>,
}

impl CycleReport {
    /// Returns the state observed for a printer during this cycle.
    #[must_use]
    pub fn state_of(&self, printer: &PrinterId) -> Option<&PrinterState> {
        self.observations
            .iter()
            .find(|(id, _)| id == printer)
            .map(|(_, state)| state)
    }

    /// Returns `true` if the printer completed a job during this cycle.
    #[must_use]
    pub fn completed(&self, printer: &PrinterId) -> bool {
        self.transitions.iter().any(|t| &t.printer == printer)
    }
}

/// Polls every registered printer and notifies on job completion.
///
/// The monitor owns the [`TransitionDetector`] and therefore the state table;
/// it lives as long as the monitor does. Use [`poll_cycle`](Self::poll_cycle)
/// to drive single cycles, or [`spawn`](Self::spawn) to run the loop on a
/// background task.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use octowatch::monitor::{MonitorConfig, PrinterMonitor};
/// use octowatch::notify::{ChannelId, DiscordWebhookSink};
/// use octowatch::printer::{PrinterConfig, PrinterRegistry};
/// use octowatch::protocol::HttpClient;
///
/// # async fn example() -> octowatch::Result<()> {
/// let channel = ChannelId::new(763_350_428_296_413_215);
/// let registry = PrinterRegistry::from_printers([
///     PrinterConfig::new("mk4", "http://mk4.local", "KEY").with_display_name("Prusa MK4"),
/// ])?;
/// let sink = DiscordWebhookSink::new()
///     .with_webhook(channel, "https://discord.com/api/webhooks/1/abc");
///
/// let handle = PrinterMonitor::new(
///     registry,
///     Arc::new(HttpClient::new()?),
///     Arc::new(sink),
///     MonitorConfig::new(channel),
/// )?
/// .spawn();
///
/// // Later, during host shutdown:
/// handle.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct PrinterMonitor {
    registry: PrinterRegistry,
    http: Arc<dyn HttpGet>,
    sink: Arc<dyn NotificationSink>,
    embeds: Arc<dyn EmbedBuilder>,
    config: MonitorConfig,
    detector: TransitionDetector,
}

impl PrinterMonitor {
    /// Creates a monitor. Nothing is polled until a cycle is driven.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInterval`] if the poll interval is zero.
    pub fn new(
        registry: PrinterRegistry,
        http: Arc<dyn HttpGet>,
        sink: Arc<dyn NotificationSink>,
        config: MonitorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            registry,
            http,
            sink,
            embeds: Arc::new(DefaultEmbedBuilder),
            config,
            detector: TransitionDetector::new(),
        })
    }

    /// Replaces the builder of notification embeds.
    #[must_use]
    pub fn with_embed_builder(mut self, embeds: Arc<dyn EmbedBuilder>) -> Self {
        self.embeds = embeds;
        self
    }

    /// Returns the monitor configuration.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Returns the polled printers.
    #[must_use]
    pub fn registry(&self) -> &PrinterRegistry {
        &self.registry
    }

    /// Returns the transition detector holding the state table.
    #[must_use]
    pub fn detector(&self) -> &TransitionDetector {
        &self.detector
    }

    /// Queries one printer and returns its state without recording it.
    ///
    /// The request runs on its own task, so even a panicking transport only
    /// costs this printer an `error` state.
    pub async fn check_printer(&self, printer: &PrinterConfig) -> PrinterState {
        let task = tokio::spawn(Self::fetch_state(Arc::clone(&self.http), printer.clone()));
        Self::join_check(printer.id(), task).await
    }

    /// Runs one polling cycle: checks every printer, records the observed
    /// states and dispatches a notification for each completed job.
    pub async fn poll_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        if self.config.concurrent_checks {
            let tasks: Vec<_> = self
                .registry
                .iter()
                .map(|printer| {
                    tokio::spawn(Self::fetch_state(Arc::clone(&self.http), printer.clone()))
                })
                .collect();

            for (printer, task) in self.registry.iter().zip(tasks) {
                let state = Self::join_check(printer.id(), task).await;
                self.record(printer, state, &mut report);
            }
        } else {
            for printer in &self.registry {
                let state = self.check_printer(printer).await;
                self.record(printer, state, &mut report);
            }
        }

        report
    }

    /// Runs polling cycles until `cancel` fires.
    ///
    /// A cancellation during the pause between cycles takes effect
    /// immediately; one during a cycle takes effect once the cycle is done.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            printers = self.registry.len(),
            interval_ms = self.config.poll_interval_ms,
            "Printer state monitor started"
        );

        while !cancel.is_cancelled() {
            let report = self.poll_cycle().await;
            tracing::debug!(
                checked = report.observations.len(),
                completed = report.transitions.len(),
                "Polling cycle finished"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.config.poll_interval()) => {}
            }
        }

        tracing::info!("Printer state monitor stopped");
    }

    /// Runs the loop on a background task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use = "dropping the handle stops the monitor"]
    pub fn spawn(self) -> MonitorHandle {
        let monitor = Arc::new(self);
        let cancel = CancellationToken::new();

        let task = tokio::spawn({
            let monitor = Arc::clone(&monitor);
            let cancel = cancel.clone();
            async move { monitor.run(cancel).await }
        });

        MonitorHandle::new(monitor, cancel, task)
    }

    async fn fetch_state(http: Arc<dyn HttpGet>, printer: PrinterConfig) -> PrinterState {
        let url = printer.job_url();
        let outcome = http.get(&url).await;
        let state = extract_state(&outcome);

        tracing::debug!(
            printer = %printer.id(),
            url = %redact_query(&url),
            state = %state,
            "Checked printer"
        );

        state
    }

    async fn join_check(printer: &PrinterId, task: JoinHandle<PrinterState>) -> PrinterState {
        match task.await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(printer = %printer, error = %e, "Printer check aborted");
                PrinterState::Error
            }
        }
    }

    fn record(&self, printer: &PrinterConfig, state: PrinterState, report: &mut CycleReport) {
        if let Some(transition) = self.detector.observe(printer.id(), state.clone()) {
            tracing::info!(printer = %printer.id(), "Printer completed its job");
            self.notify(printer);
            report.transitions.push(transition);
        }

        report.observations.push((printer.id().clone(), state));
    }

    /// Sends the completion notification on a detached task.
    fn notify(&self, printer: &PrinterConfig) {
        let message = self.config.message_template.render(printer.display_name());
        let embed = self.embeds.build(printer, Utc::now());
        let channel = self.config.channel_id;
        let sink = Arc::clone(&self.sink);
        let printer_id = printer.id().clone();

        tokio::spawn(async move {
            match sink.send(channel, &message, &embed).await {
                Ok(()) => {
                    tracing::debug!(printer = %printer_id, %channel, "Completion notification sent");
                }
                Err(NotifyError::ChannelNotFound(_)) => {
                    tracing::error!(
                        printer = %printer_id,
                        %channel,
                        "Failed to get channel for printer output"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        printer = %printer_id,
                        %channel,
                        error = %e,
                        "Failed to send completion notification"
                    );
                }
            }
        });
    }
}

impl fmt::Debug for PrinterMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterMonitor")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}
