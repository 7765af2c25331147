// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check event recording.
//!
//! Every check is emitted as a structured log event. When a log file is
//! configured, the event is also appended to it as one JSON line.

use crate::models::prediction::PredictionResult;
use crate::models::request::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded safety check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub event: String,
    pub tourist_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub result: PredictionResult,
    pub ts: DateTime<Utc>,
}

impl TrackingEvent {
    pub fn check_safety(
        tourist_id: Option<String>,
        coordinate: Coordinate,
        result: PredictionResult,
    ) -> Self {
        Self {
            event: "check_safety".to_string(),
            tourist_id,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            result,
            ts: Utc::now(),
        }
    }
}

/// Records tracking events. Safe to share across threads.
///
/// [`TrackingLog::record`] writes the file synchronously; async callers run it
/// on the blocking pool, as [`crate::handler::serve_lines`] does.
#[derive(Debug, Default)]
pub struct TrackingLog {
    file: Option<(PathBuf, Mutex<File>)>,
}

impl TrackingLog {
    /// Log events through tracing only.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    /// Append events to `path`, creating it and its parent directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some((path.to_path_buf(), Mutex::new(file))),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|(path, _)| path.as_path())
    }

    /// Record an event. Failures are logged and never propagated.
    pub fn record(&self, event: &TrackingEvent) {
        tracing::info!(
            event = %event.event,
            tourist_id = event.tourist_id.as_deref().unwrap_or(""),
            latitude = event.latitude,
            longitude = event.longitude,
            status = %event.result.status,
            safety_score = event.result.safety_score,
            reason = %event.result.reason,
            "Safety check"
        );

        if let Some((path, file)) = &self.file {
            if let Err(e) = append_line(file, event) {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to write tracking event"
                );
            }
        }
    }
}

fn append_line(file: &Mutex<File>, event: &TrackingEvent) -> io::Result<()> {
    let mut line = serde_json::to_vec(event)?;
    line.push(b'\n');
    let mut file = file
        .lock()
        .map_err(|_| io::Error::other("tracking log lock poisoned"))?;
    file.write_all(&line)
}
