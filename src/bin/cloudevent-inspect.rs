// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudEvent Inspector
//!
//! Decodes a CloudEvent document (a single object or a batch array), logs a
//! summary of each event and prints the canonical re-encoding to stdout.
//!
//! Run with: cargo run --bin cloudevent-inspect -- events.json
//!
//! Reads stdin when no path is given. See [`InspectConfig::from_env`] for the
//! environment variables it honours.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use azcore_messaging::{encode_batch, CloudEvent, InspectConfig};
use tracing::{debug, info};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut config = InspectConfig::from_env().context("invalid configuration")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.input = Some(path.into());
    }

    debug!(?config, "Loaded inspector configuration");

    let input = read_input(&config)?;
    let events = config
        .mode
        .decode(&input)
        .context("failed to decode CloudEvent input")?;

    for event in &events {
        log_event(event);
    }

    let output = if config.pretty {
        serde_json::to_vec_pretty(&events).context("failed to encode CloudEvents")?
    } else {
        encode_batch(&events).context("failed to encode CloudEvents")?
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.write_all(b"\n")?;

    info!(count = events.len(), "Inspection complete");
    Ok(())
}

fn read_input(config: &InspectConfig) -> Result<Vec<u8>> {
    match &config.input {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn log_event(event: &CloudEvent) {
    let payload = match event.data() {
        Some(data) if data.is_binary() => "binary",
        Some(_) => "json",
        None => "none",
    };

    info!(
        id = %event.id(),
        source = %event.source(),
        event_type = %event.event_type(),
        subject = event.subject().unwrap_or(""),
        payload,
        payload_len = event.data().map(|d| d.as_bytes().len()).unwrap_or(0),
        extensions = event.extensions().len(),
        "CloudEvent"
    );
}
