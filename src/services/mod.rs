// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod safety;
pub mod tracking;
pub mod zones;

pub use safety::SafetyEvaluator;
pub use tracking::{TrackingEvent, TrackingLog};
pub use zones::{SkippedFeature, ZoneError, ZoneStore};
