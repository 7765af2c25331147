// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone-Safety checker
//!
//! Reads one JSON safety check request per line on stdin and writes one JSON
//! response per line on stdout. Logs go to stderr.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zone_safety::{
    config::Config,
    handler,
    services::{SafetyEvaluator, TrackingLog, ZoneStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        zones_path = %config.zones_path.display(),
        danger_radius_m = config.danger_radius_m,
        "Starting Zone-Safety checker"
    );

    // Load danger zones once; they are read-only from here on
    let store = ZoneStore::load_from_file(&config.zones_path, config.danger_radius_m)
        .context("Failed to load danger zones")?;
    tracing::info!(
        count = store.len(),
        skipped = store.skipped().len(),
        "Danger zones loaded"
    );
    let evaluator = SafetyEvaluator::new(Arc::new(store));

    let tracking = match &config.tracking_log_path {
        Some(path) => TrackingLog::open(path)
            .with_context(|| format!("Failed to open tracking log {}", path.display()))?,
        None => TrackingLog::disabled(),
    };

    let state = Arc::new(AppState {
        evaluator,
        tracking,
    });

    let stdin = BufReader::new(tokio::io::stdin());
    handler::serve_lines(state, stdin, tokio::io::stdout()).await?;

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("zone_safety=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
