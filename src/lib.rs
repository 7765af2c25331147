// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Zone-Safety: proximity-based safety assessment for coordinates.
//!
//! This crate loads a set of danger zones from GeoJSON and grades how safe
//! a latitude/longitude is based on containment in, or distance to, the
//! nearest zone.

pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod services;

use services::{SafetyEvaluator, TrackingLog};

/// Shared application state.
///
/// Read-only after construction; share it behind an `Arc`.
pub struct AppState {
    pub evaluator: SafetyEvaluator,
    pub tracking: TrackingLog,
}
