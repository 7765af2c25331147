// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Safety assessment returned for a single coordinate.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Score at or above which a location is `safe`.
pub const SAFE_THRESHOLD: f64 = 60.0;
/// Score at or above which a location is `caution` (below `SAFE_THRESHOLD`).
pub const CAUTION_THRESHOLD: f64 = 30.0;

/// Discrete safety classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SafetyStatus {
    Safe,
    Caution,
    Danger,
}

impl SafetyStatus {
    /// Classify a (rounded) safety score.
    pub fn from_score(score: f64) -> Self {
        if score >= SAFE_THRESHOLD {
            SafetyStatus::Safe
        } else if score >= CAUTION_THRESHOLD {
            SafetyStatus::Caution
        } else {
            SafetyStatus::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "safe",
            SafetyStatus::Caution => "caution",
            SafetyStatus::Danger => "danger",
        }
    }
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a safety prediction.
///
/// `distance_to_nearest_zone_m` is infinite when no zones are loaded;
/// JSON serialization renders that as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PredictionResult {
    /// 0-100, higher is safer
    pub safety_score: f64,
    pub status: SafetyStatus,
    #[serde(deserialize_with = "deserialize_distance")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub distance_to_nearest_zone_m: f64,
    /// `inside_zone:<id>`, `near_zone:<id>` or `no_zones_loaded`
    pub reason: String,
}

/// Reads back the `null` written for an infinite distance.
fn deserialize_distance<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}
