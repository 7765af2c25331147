// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Safety check request handling.
//!
//! Takes one JSON request, validates it, runs the evaluator and records the
//! outcome. [`serve_lines`] drives this over newline-delimited streams.

use crate::error::{AppError, ErrorResponse, Result};
use crate::models::{CheckSafetyRequest, PredictionResult};
use crate::services::tracking::TrackingEvent;
use crate::AppState;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Validate and evaluate a single request body.
pub fn handle_request(state: &AppState, body: &str) -> Result<PredictionResult> {
    let request = CheckSafetyRequest::from_json(body)?;
    let coordinate = request.coordinate;

    let result = state
        .evaluator
        .predict(coordinate.latitude, coordinate.longitude);

    state.tracking.record(&TrackingEvent::check_safety(
        request.tourist_id,
        coordinate,
        result.clone(),
    ));

    Ok(result)
}

/// Handle a request and render the JSON response line (result or error body).
pub fn handle_line(state: &AppState, body: &str) -> String {
    match handle_request(state, body) {
        Ok(result) => serde_json::to_string(&result)
            .unwrap_or_else(|e| render_error(&AppError::Internal(e.into()))),
        Err(err) => render_error(&err),
    }
}

fn render_error(err: &AppError) -> String {
    if err.is_client_error() {
        tracing::debug!(error = %err, "Rejected request");
    }
    let body = err.to_response();
    serde_json::to_string(&body).unwrap_or_else(|_| fallback_body(&body))
}

fn fallback_body(body: &ErrorResponse) -> String {
    format!(r#"{{"error":"{}"}}"#, body.error)
}

/// Answer every non-blank line of `reader` with one JSON line on `writer`.
///
/// A line that is not UTF-8 is answered with `invalid_json`. Only I/O errors
/// on the streams end the loop. Requests run on the blocking pool because
/// tracking may write to a file.
pub async fn serve_lines<R, W>(
    state: Arc<AppState>,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let mut response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                let state = Arc::clone(&state);
                let line = line.to_string();
                tokio::task::spawn_blocking(move || handle_line(&state, &line))
                    .await
                    .unwrap_or_else(|e| render_error(&AppError::Internal(e.into())))
            }
            Err(_) => render_error(&AppError::InvalidJson),
        };

        response.push('\n');
        writer.write_all(response.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
