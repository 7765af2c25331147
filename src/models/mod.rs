// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod prediction;
pub mod request;
pub mod zone;

pub use prediction::{PredictionResult, SafetyStatus};
pub use request::{CheckSafetyRequest, Coordinate};
pub use zone::{Zone, ZoneGeometry, ZoneProperties};
