// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone document loading smoke tests.
//!
//! If these fail, the bundled zone document or the loader is broken and the
//! checker will refuse to start.

use std::io::Write;
use zone_safety::models::SafetyStatus;
use zone_safety::services::{ZoneError, ZoneStore};

mod common;
use common::{collection, data_evaluator, point_feature, rect_feature, DATA_PATH};

#[test]
fn test_bundled_zones_load() {
    let store = ZoneStore::load_from_file(DATA_PATH, 100.0)
        .expect("Failed to load danger zones - is data/ committed?");

    // Four features, one of them without geometry
    assert_eq!(store.len(), 3, "Expected exactly 3 zones, got {}", store.len());
    assert!(store.skipped().is_empty());
    assert_eq!(store.danger_radius_m(), 100.0);

    let ids: Vec<_> = store.zones().iter().map(|z| z.display_id()).collect();
    assert_eq!(
        ids,
        vec![Some("ZN-001"), Some("ZN-002"), Some("Fancy Bazaar Crossing")]
    );

    let kinds: Vec<_> = store.zones().iter().map(|z| z.geometry.kind()).collect();
    assert_eq!(kinds, vec!["Polygon", "MultiPolygon", "Point"]);
}

#[test]
fn test_bundled_zone_properties_kept() {
    let store = ZoneStore::load_from_file(DATA_PATH, 100.0).unwrap();
    let first = &store.zones()[0];
    assert_eq!(first.properties.name.as_deref(), Some("Rangia Forest Edge"));
    assert_eq!(
        first.properties.extra.get("risk").and_then(|v| v.as_str()),
        Some("wildlife")
    );
}

#[test]
fn test_bundled_zones_known_locations() {
    let eval = data_evaluator();

    let inside = eval.predict(26.78, 91.70);
    assert_eq!(inside.reason, "inside_zone:ZN-001");
    assert_eq!(inside.status, SafetyStatus::Danger);

    let crossing = eval.predict(26.1445, 91.7362);
    assert_eq!(crossing.reason, "inside_zone:Fancy Bazaar Crossing");

    let flood_bank = eval.predict(26.188, 91.765);
    assert_eq!(flood_bank.reason, "inside_zone:ZN-002");

    // New Delhi, far west of every zone
    let delhi = eval.predict(28.6139, 77.2090);
    assert_eq!(delhi.reason, "near_zone:ZN-001");
    assert_eq!(delhi.status, SafetyStatus::Safe);
    assert!(delhi.distance_to_nearest_zone_m > 1_000_000.0);
}

#[test]
fn test_missing_file_is_not_found() {
    let err = ZoneStore::load_from_file("data/no_such_zones.geojson", 100.0).unwrap_err();
    assert!(matches!(err, ZoneError::NotFound(_)));
    assert!(err.to_string().contains("no_such_zones.geojson"));
}

#[test]
fn test_load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let doc = collection(&[
        r#"{"type": "Feature", "properties": {"id": "skip-me"}, "geometry": null}"#.to_string(),
        rect_feature(r#"{"id": "Z1"}"#, 0.0, 0.0, 0.001, 0.001),
        point_feature(r#"{"id": 17}"#, 1.0, 1.0),
    ]);
    file.write_all(doc.as_bytes()).unwrap();

    let store = ZoneStore::load_from_file(file.path(), 50.0).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.danger_radius_m(), 50.0);
    assert_eq!(store.zones()[0].display_id(), Some("Z1"));
    assert_eq!(store.zones()[1].display_id(), Some("17"));
}

#[test]
fn test_unparseable_file_is_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not geojson").unwrap();

    let err = ZoneStore::load_from_file(file.path(), 100.0).unwrap_err();
    assert!(matches!(err, ZoneError::Parse(_)));
}

#[test]
fn test_one_bad_feature_does_not_abort_load() {
    let doc = collection(&[
        rect_feature(r#"{"id": "before"}"#, 0.0, 0.0, 1.0, 1.0),
        r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[["a","b"]]]}}"#
            .to_string(),
        rect_feature(r#"{"id": "after"}"#, 2.0, 2.0, 3.0, 3.0),
    ]);
    let store = ZoneStore::load_from_json(&doc, 100.0).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.skipped().len(), 1);
    assert_eq!(store.skipped()[0].index, 1);
}
