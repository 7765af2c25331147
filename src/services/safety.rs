// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone-proximity safety scoring.
//!
//! A point inside any zone is in danger. Otherwise the great-circle distance
//! to the nearest zone surface is mapped onto a 0-100 score:
//!
//! - within the danger radius the score is a flat [`DANGER_RADIUS_SCORE`]
//! - beyond it, `100 - 50 / (1 + d / 200)`, which approaches 50 just outside
//!   the radius and 100 far away
//!
//! The evaluator only reads its [`ZoneStore`], so one instance can serve
//! concurrent callers without locking.

use crate::models::prediction::{PredictionResult, SafetyStatus};
use crate::models::zone::Zone;
use crate::services::zones::ZoneStore;
use geo::Point;
use std::sync::Arc;

/// Mean Earth radius used for haversine distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
/// Score for a point inside a zone.
pub const INSIDE_ZONE_SCORE: f64 = 5.0;
/// Score for a point outside every zone but within the danger radius.
pub const DANGER_RADIUS_SCORE: f64 = 15.0;
/// Score when there is no zone to measure against.
pub const NO_ZONES_SCORE: f64 = 100.0;
/// Distance scale of the score curve beyond the danger radius.
pub const DISTANCE_SCALE_M: f64 = 200.0;

/// Evaluates coordinates against a loaded zone set.
#[derive(Debug, Clone)]
pub struct SafetyEvaluator {
    store: Arc<ZoneStore>,
}

impl SafetyEvaluator {
    pub fn new(store: Arc<ZoneStore>) -> Self {
        Self { store }
    }

    /// Assess the safety of a coordinate.
    ///
    /// Never fails for finite input. Range checking is left to the caller.
    pub fn predict(&self, lat: f64, lon: f64) -> PredictionResult {
        let point = Point::new(lon, lat);

        // First containing zone in document order wins.
        if let Some(zone) = self
            .store
            .zones()
            .iter()
            .find(|z| z.geometry.contains_point(&point))
        {
            return PredictionResult {
                safety_score: INSIDE_ZONE_SCORE,
                status: SafetyStatus::Danger,
                distance_to_nearest_zone_m: 0.0,
                reason: format!("inside_zone:{}", zone.display_id().unwrap_or_default()),
            };
        }

        if self.store.is_empty() {
            return unmeasured("no_zones_loaded");
        }

        // Zones are loaded but none has a determinate nearest point.
        let Some((zone, min_dist)) = self.nearest_zone(&point) else {
            return unmeasured("no_measurable_zone");
        };

        let safety_score = round2(score_for_distance(min_dist, self.store.danger_radius_m()));
        let status = SafetyStatus::from_score(safety_score);

        tracing::debug!(
            lat,
            lon,
            distance_m = min_dist,
            safety_score,
            status = %status,
            "Scored location"
        );

        PredictionResult {
            safety_score,
            status,
            distance_to_nearest_zone_m: round2(min_dist),
            reason: format!("near_zone:{}", zone.display_id().unwrap_or_default()),
        }
    }

    /// Nearest zone and its haversine distance in meters.
    ///
    /// Ties keep the earlier zone.
    fn nearest_zone(&self, point: &Point<f64>) -> Option<(&Zone, f64)> {
        let mut nearest: Option<(&Zone, f64)> = None;

        for zone in self.store.zones() {
            let Some(surface) = zone.geometry.closest_point(point) else {
                continue;
            };
            let d = haversine_m(point.y(), point.x(), surface.y(), surface.x());
            match nearest {
                Some((_, best)) if d >= best => {}
                _ => nearest = Some((zone, d)),
            }
        }

        nearest
    }
}

/// Great-circle distance in meters between two lat/lon points.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Unrounded score for a point `distance_m` from the nearest zone.
pub fn score_for_distance(distance_m: f64, danger_radius_m: f64) -> f64 {
    if distance_m <= danger_radius_m {
        return DANGER_RADIUS_SCORE;
    }
    let score = 100.0 - 50.0 * (1.0 / (1.0 + distance_m / DISTANCE_SCALE_M));
    score.clamp(0.0, 100.0)
}

fn unmeasured(reason: &str) -> PredictionResult {
    PredictionResult {
        safety_score: NO_ZONES_SCORE,
        status: SafetyStatus::Safe,
        distance_to_nearest_zone_m: f64::INFINITY,
        reason: reason.to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
