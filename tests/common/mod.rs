// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use zone_safety::services::safety::EARTH_RADIUS_M;
use zone_safety::services::{SafetyEvaluator, TrackingLog, ZoneStore};
use zone_safety::AppState;

/// Bundled zone document used by the binary.
#[allow(dead_code)]
pub const DATA_PATH: &str = "data/danger_zones.geojson";

/// Degrees of longitude spanning `meters` along the equator.
#[allow(dead_code)]
pub fn equator_degrees(meters: f64) -> f64 {
    (meters / EARTH_RADIUS_M).to_degrees()
}

/// GeoJSON feature for an axis-aligned rectangle.
#[allow(dead_code)]
pub fn rect_feature(
    properties: &str,
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
) -> String {
    format!(
        r#"{{"type": "Feature", "properties": {properties}, "geometry": {{"type": "Polygon", "coordinates": [[[{min_lon},{min_lat}],[{max_lon},{min_lat}],[{max_lon},{max_lat}],[{min_lon},{max_lat}],[{min_lon},{min_lat}]]]}}}}"#
    )
}

/// GeoJSON feature for a single point.
#[allow(dead_code)]
pub fn point_feature(properties: &str, lon: f64, lat: f64) -> String {
    format!(
        r#"{{"type": "Feature", "properties": {properties}, "geometry": {{"type": "Point", "coordinates": [{lon},{lat}]}}}}"#
    )
}

#[allow(dead_code)]
pub fn collection(features: &[String]) -> String {
    format!(
        r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
        features.join(",")
    )
}

/// Build an evaluator over an in-memory document.
#[allow(dead_code)]
pub fn evaluator(features: &[String], danger_radius_m: f64) -> SafetyEvaluator {
    let store = ZoneStore::load_from_json(&collection(features), danger_radius_m)
        .expect("test document should load");
    SafetyEvaluator::new(Arc::new(store))
}

/// Evaluator over the bundled zone document.
#[allow(dead_code)]
pub fn data_evaluator() -> SafetyEvaluator {
    let store = ZoneStore::load_from_file(DATA_PATH, 100.0)
        .expect("Failed to load danger zones - is data/ committed?");
    SafetyEvaluator::new(Arc::new(store))
}

/// App state over the bundled zones, with an optional tracking log.
#[allow(dead_code)]
pub fn create_test_state(tracking: TrackingLog) -> Arc<AppState> {
    Arc::new(AppState {
        evaluator: data_evaluator(),
        tracking,
    })
}
