// SPDX-License-Identifier: MPL-2.0

//! Printer monitor example.
//!
//! Loads printers from a JSON settings file, polls them until Ctrl-C and
//! posts job completions to a Discord webhook.
//!
//! # Usage
//!
//! ```bash
//! DISCORD_WEBHOOK=https://discord.com/api/webhooks/<id>/<token> \
//!     cargo run --example monitor -- <settings.json>
//! ```
//!
//! Without `DISCORD_WEBHOOK` the monitor still polls, and completions are
//! logged as delivery failures.
//!
//! # Settings file
//!
//! ```json
//! {
//!   "monitor": {
//!     "poll_interval_ms": 10000,
//!     "channel_id": 763350428296413215,
//!     "message_template": "<@&763350428296413215> printer {printer} has completed its job"
//!   },
//!   "printers": [
//!     {"id": "mk4", "endpoint": "http://192.168.1.40", "api_key": "ABCDEF", "display_name": "Prusa MK4"}
//!   ]
//! }
//! ```

use std::env;
use std::sync::Arc;

use octowatch::notify::DiscordWebhookSink;
use octowatch::protocol::HttpClient;
use octowatch::{PrinterMonitor, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("octowatch=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        let program = args.first().map_or("monitor", String::as_str);
        eprintln!("Usage: {program} <settings.json>");
        std::process::exit(1);
    };

    let settings = Settings::from_json_str(&std::fs::read_to_string(path)?)?;
    let channel = settings.monitor.channel_id;

    let mut sink = DiscordWebhookSink::new();
    match env::var("DISCORD_WEBHOOK") {
        Ok(url) => sink = sink.with_webhook(channel, url),
        Err(_) => eprintln!("DISCORD_WEBHOOK not set, notifications will fail"),
    }

    println!("Monitoring {} printer(s)", settings.printers.len());
    for printer in &settings.printers {
        println!("  {} -> {}", printer.display_name(), printer.endpoint());
    }

    let handle = PrinterMonitor::new(
        settings.registry()?,
        Arc::new(HttpClient::new()?),
        Arc::new(sink),
        settings.monitor,
    )?
    .spawn();

    tokio::signal::ctrl_c().await?;
    println!("\nStopping...");

    for (printer, state) in handle.states().iter() {
        println!("  {printer}: {state}");
    }
    handle.shutdown().await;

    Ok(())
}
