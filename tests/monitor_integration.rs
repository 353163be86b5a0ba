// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the polling loop using in-memory fakes.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use octowatch::notify::{ChannelId, Embed, NotificationSink};
use octowatch::protocol::HttpGet;
use octowatch::{
    MonitorConfig, NotifyError, PrinterConfig, PrinterId, PrinterMonitor, PrinterRegistry,
    PrinterState, ProtocolError,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy)]
enum Reply {
    State(&'static str),
    Empty,
    Refused,
    Status(u16),
}

impl Reply {
    fn into_outcome(self) -> Result<Option<String>, ProtocolError> {
        match self {
            Self::State(s) => Ok(Some(format!(r#"{{"state": "{s}"}}"#))),
            Self::Empty => Ok(None),
            Self::Refused => Err(ProtocolError::Unreachable("connection refused".into())),
            Self::Status(code) => Err(ProtocolError::Status(code)),
        }
    }
}

/// Replays a script of replies per URL. The last reply repeats forever.
#[derive(Default)]
struct ScriptedPrinters {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: AtomicUsize,
}

impl ScriptedPrinters {
    fn script(&self, printer: &PrinterConfig, replies: &[Reply]) {
        self.scripts
            .lock()
            .insert(printer.job_url(), replies.iter().copied().collect());
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpGet for ScriptedPrinters {
    async fn get(&self, url: &str) -> Result<Option<String>, ProtocolError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut scripts = self.scripts.lock();
        let Some(queue) = scripts.get_mut(url) else {
            return Reply::Refused.into_outcome();
        };
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().copied()
        };
        reply.unwrap_or(Reply::Refused).into_outcome()
    }
}

struct RecordingSink(mpsc::UnboundedSender<(ChannelId, String)>);

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(
        &self,
        channel: ChannelId,
        message: &str,
        _embed: &Embed,
    ) -> Result<(), NotifyError> {
        let _ = self.0.send((channel, message.to_string()));
        Ok(())
    }
}

struct MissingChannelSink;

#[async_trait]
impl NotificationSink for MissingChannelSink {
    async fn send(&self, channel: ChannelId, _: &str, _: &Embed) -> Result<(), NotifyError> {
        Err(NotifyError::ChannelNotFound(channel))
    }
}

const CHANNEL: ChannelId = ChannelId::new(42);

fn printer(id: &str) -> PrinterConfig {
    PrinterConfig::new(id, format!("http://{id}.local"), "key")
}

fn setup(
    printers: &[PrinterConfig],
    config: MonitorConfig,
) -> (
    PrinterMonitor,
    Arc<ScriptedPrinters>,
    mpsc::UnboundedReceiver<(ChannelId, String)>,
) {
    let http = Arc::new(ScriptedPrinters::default());
    let (tx, rx) = mpsc::unbounded_channel();
    let registry = PrinterRegistry::from_printers(printers.iter().cloned()).unwrap();
    let monitor = PrinterMonitor::new(
        registry,
        Arc::clone(&http) as Arc<dyn HttpGet>,
        Arc::new(RecordingSink(tx)),
        config,
    )
    .unwrap();
    (monitor, http, rx)
}

async fn next_notification(
    rx: &mut mpsc::UnboundedReceiver<(ChannelId, String)>,
) -> (ChannelId, String) {
    tokio::time::timeout(Duration::from_secs(60), rx.recv())
        .await
        .expect("notification not delivered")
        .expect("sink dropped")
}

// ============================================================================
// Transitions
// ============================================================================

#[tokio::test]
async fn only_the_finished_printer_is_notified() {
    let a = printer("A");
    let b = printer("B");
    let (monitor, http, mut rx) = setup(&[a.clone(), b.clone()], MonitorConfig::new(CHANNEL));

    http.script(&a, &[Reply::State("Printing"), Reply::State("Operational")]);
    http.script(&b, &[Reply::Refused, Reply::State("Printing")]);

    let first = monitor.poll_cycle().await;
    assert!(first.transitions.is_empty());
    assert_eq!(first.state_of(b.id()), Some(&PrinterState::Offline));

    let second = monitor.poll_cycle().await;
    assert_eq!(second.transitions.len(), 1);
    assert_eq!(second.transitions[0].printer, PrinterId::new("A"));

    let (channel, message) = next_notification(&mut rx).await;
    assert_eq!(channel, CHANNEL);
    assert_eq!(message, "printer A has completed its job");

    let table = monitor.detector().snapshot();
    assert_eq!(table.state(a.id()), PrinterState::operational());
    assert_eq!(table.state(b.id()), PrinterState::printing());

    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn unreachable_printer_does_not_block_others() {
    let a = printer("a");
    let b = printer("b");
    let c = printer("c");
    let (monitor, http, _rx) = setup(&[a.clone(), b.clone(), c.clone()], MonitorConfig::default());

    http.script(&a, &[Reply::Status(500)]);
    http.script(&c, &[Reply::State("Printing")]);

    let report = monitor.poll_cycle().await;

    assert_eq!(report.state_of(a.id()), Some(&PrinterState::Error));
    assert_eq!(report.state_of(b.id()), Some(&PrinterState::Offline));
    assert_eq!(report.state_of(c.id()), Some(&PrinterState::printing()));
}

#[tokio::test]
async fn dropout_between_printing_and_idle_is_not_a_completion() {
    let a = printer("a");
    let (monitor, http, mut rx) = setup(&[a.clone()], MonitorConfig::default());

    http.script(
        &a,
        &[
            Reply::State("Printing"),
            Reply::Refused,
            Reply::State("Operational"),
        ],
    );

    for _ in 0..3 {
        assert!(monitor.poll_cycle().await.transitions.is_empty());
    }
    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn empty_reply_between_printing_and_idle_is_not_a_completion() {
    let a = printer("a");
    let (monitor, http, _rx) = setup(&[a.clone()], MonitorConfig::default());

    http.script(
        &a,
        &[
            Reply::State("Printing"),
            Reply::Empty,
            Reply::State("Operational"),
        ],
    );

    monitor.poll_cycle().await;
    let report = monitor.poll_cycle().await;
    assert_eq!(report.state_of(a.id()), Some(&PrinterState::NoResponse));
    assert!(monitor.poll_cycle().await.transitions.is_empty());
}

#[tokio::test]
async fn long_job_fires_exactly_once() {
    let a = printer("a");
    let (monitor, http, mut rx) = setup(&[a.clone()], MonitorConfig::new(CHANNEL));

    http.script(
        &a,
        &[
            Reply::State("Printing"),
            Reply::State("Printing"),
            Reply::State("Printing"),
            Reply::State("Operational"),
        ],
    );

    let mut completions = 0;
    for _ in 0..6 {
        completions += monitor.poll_cycle().await.transitions.len();
    }

    assert_eq!(completions, 1);
    next_notification(&mut rx).await;
    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn consecutive_jobs_fire_each_time() {
    let a = printer("a");
    let (monitor, http, _rx) = setup(&[a.clone()], MonitorConfig::default());

    http.script(
        &a,
        &[
            Reply::State("Printing"),
            Reply::State("Operational"),
            Reply::State("Printing"),
            Reply::State("Operational"),
        ],
    );

    let mut completions = 0;
    for _ in 0..4 {
        completions += monitor.poll_cycle().await.transitions.len();
    }
    assert_eq!(completions, 2);
}

#[tokio::test]
async fn missing_channel_does_not_stop_polling() {
    let a = printer("a");
    let http = Arc::new(ScriptedPrinters::default());
    http.script(&a, &[Reply::State("Printing"), Reply::State("Operational")]);

    let monitor = PrinterMonitor::new(
        PrinterRegistry::from_printers([a.clone()]).unwrap(),
        Arc::clone(&http) as Arc<dyn HttpGet>,
        Arc::new(MissingChannelSink),
        MonitorConfig::new(CHANNEL),
    )
    .unwrap();

    monitor.poll_cycle().await;
    assert!(monitor.poll_cycle().await.completed(a.id()));
    assert_eq!(
        monitor.poll_cycle().await.state_of(a.id()),
        Some(&PrinterState::operational())
    );
}

#[tokio::test]
async fn concurrent_checks_detect_the_same_transitions() {
    let a = printer("A");
    let b = printer("B");
    let config = MonitorConfig::new(CHANNEL).with_concurrent_checks(true);
    let (monitor, http, mut rx) = setup(&[a.clone(), b.clone()], config);

    http.script(&a, &[Reply::State("Printing"), Reply::State("Operational")]);
    http.script(&b, &[Reply::State("Printing")]);

    monitor.poll_cycle().await;
    let report = monitor.poll_cycle().await;

    assert!(report.completed(a.id()));
    assert!(!report.completed(b.id()));
    let (_, message) = next_notification(&mut rx).await;
    assert_eq!(message, "printer A has completed its job");
}

// ============================================================================
// Background loop
// ============================================================================

#[tokio::test(start_paused = true)]
async fn loop_polls_at_configured_interval() {
    let a = printer("a");
    let config = MonitorConfig::new(CHANNEL).with_poll_interval(Duration::from_secs(10));
    let (monitor, http, _rx) = setup(&[a.clone()], config);
    http.script(&a, &[Reply::State("Operational")]);

    let handle = monitor.spawn();

    // Cycles at 0s, 10s and 20s.
    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(http.requests(), 3);
    assert_eq!(handle.state(a.id()), PrinterState::operational());

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn loop_sends_notification_after_completion() {
    let a = printer("a");
    let config = MonitorConfig::new(CHANNEL).with_poll_interval(Duration::from_secs(10));
    let (monitor, http, mut rx) = setup(&[a.clone()], config);
    http.script(&a, &[Reply::State("Printing"), Reply::State("Operational")]);

    let handle = monitor.spawn();
    let (channel, message) = next_notification(&mut rx).await;

    assert_eq!(channel, CHANNEL);
    assert_eq!(message, "printer a has completed its job");
    handle.shutdown().await;
}

#[tokio::test]
async fn stop_interrupts_the_pause_between_cycles() {
    let a = printer("a");
    let config = MonitorConfig::new(CHANNEL).with_poll_interval(Duration::from_secs(3600));
    let (monitor, http, _rx) = setup(&[a.clone()], config);
    http.script(&a, &[Reply::State("Printing")]);

    let handle = monitor.spawn();
    while http.requests() == 0 {
        tokio::task::yield_now().await;
    }

    handle.stop();
    assert!(handle.is_stopping());
    tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
        .await
        .expect("monitor did not stop promptly");
    assert_eq!(http.requests(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_loop() {
    let a = printer("a");
    let config = MonitorConfig::new(CHANNEL).with_poll_interval(Duration::from_secs(10));
    let (monitor, http, _rx) = setup(&[a.clone()], config);
    http.script(&a, &[Reply::State("Operational")]);

    let handle = monitor.spawn();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(http.requests(), 1);

    drop(handle);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(http.requests(), 1);
}

#[tokio::test]
async fn handle_exposes_states_while_running() {
    let a = printer("a");
    let b = printer("b");
    let config = MonitorConfig::new(CHANNEL).with_poll_interval(Duration::from_secs(3600));
    let (monitor, http, _rx) = setup(&[a.clone(), b.clone()], config);
    http.script(&a, &[Reply::State("Printing")]);

    let handle = monitor.spawn();
    while handle.states().len() < 2 {
        tokio::task::yield_now().await;
    }

    assert!(handle.is_running());
    assert_eq!(handle.state(a.id()), PrinterState::printing());
    assert_eq!(handle.state(b.id()), PrinterState::Offline);
    assert_eq!(handle.monitor().registry().len(), 2);
    handle.shutdown().await;
}
