// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Danger zone loading.
//!
//! Zones are parsed once from a GeoJSON feature collection and are
//! read-only afterwards. A feature that fails to parse is dropped and
//! recorded as a [`SkippedFeature`]; it never aborts the load.

use crate::models::zone::{Zone, ZoneGeometry, ZoneProperties};
use geo::{MultiPolygon, Point, Polygon, Validation};
use geojson::{PolygonType, Position};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Buffer distance around a zone still treated as maximally unsafe.
pub const DEFAULT_DANGER_RADIUS_M: f64 = 100.0;

/// Immutable, ordered set of danger zones.
#[derive(Debug, Clone)]
pub struct ZoneStore {
    zones: Vec<Zone>,
    danger_radius_m: f64,
    skipped: Vec<SkippedFeature>,
}

/// A feature dropped during loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFeature {
    /// Position of the feature in the source document
    pub index: usize,
    pub reason: String,
}

impl Default for ZoneStore {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            danger_radius_m: DEFAULT_DANGER_RADIUS_M,
            skipped: Vec::new(),
        }
    }
}

impl ZoneStore {
    /// Load zones from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        danger_radius_m: f64,
    ) -> Result<Self, ZoneError> {
        let path = path.as_ref();
        let json_data = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ZoneError::NotFound(path.to_path_buf()),
            _ => ZoneError::Io(e.to_string()),
        })?;
        Self::load_from_json(&json_data, danger_radius_m)
    }

    /// Load zones from a GeoJSON string.
    ///
    /// A document without a `features` array yields an empty store.
    pub fn load_from_json(json_data: &str, danger_radius_m: f64) -> Result<Self, ZoneError> {
        check_radius(danger_radius_m)?;

        let document: Value =
            serde_json::from_str(json_data).map_err(|e| ZoneError::Parse(e.to_string()))?;

        let features: &[Value] = match document.get("features") {
            Some(Value::Array(features)) => features.as_slice(),
            Some(other) => {
                tracing::warn!(found = %json_kind(other), "`features` is not an array, ignoring");
                &[]
            }
            None => &[],
        };

        let mut zones = Vec::with_capacity(features.len());
        let mut skipped = Vec::new();

        for (index, feature) in features.iter().enumerate() {
            match Self::parse_feature(feature) {
                Ok(Some(zone)) => zones.push(zone),
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(index, reason = %reason, "Skipping malformed zone");
                    skipped.push(SkippedFeature {
                        index,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            count = zones.len(),
            skipped = skipped.len(),
            danger_radius_m,
            "Loaded danger zones"
        );

        Ok(Self {
            zones,
            danger_radius_m,
            skipped,
        })
    }

    /// Build a store from already constructed zones, kept in the given order.
    ///
    /// Geometries are taken as-is.
    pub fn from_zones(zones: Vec<Zone>, danger_radius_m: f64) -> Result<Self, ZoneError> {
        check_radius(danger_radius_m)?;
        Ok(Self {
            zones,
            danger_radius_m,
            skipped: Vec::new(),
        })
    }

    /// Parse one feature. `Ok(None)` means the feature has no geometry.
    fn parse_feature(feature: &Value) -> Result<Option<Zone>, MalformedZone> {
        let Value::Object(feature) = feature else {
            return Err(MalformedZone::NotAnObject);
        };

        let geometry = match feature.get("geometry") {
            None | Some(Value::Null) => return Ok(None),
            Some(geometry) => geometry.clone(),
        };

        let geometry = geojson::Geometry::from_json_value(geometry)
            .map_err(|e| MalformedZone::Geometry(e.to_string()))?;
        let geometry = Self::convert_geometry(geometry.value)?;

        let properties = match feature.get("properties") {
            Some(Value::Object(map)) => ZoneProperties::from_json(map.clone()),
            _ => ZoneProperties::default(),
        };

        Ok(Some(Zone {
            geometry,
            properties,
        }))
    }

    /// Convert GeoJSON geometry to our internal format.
    fn convert_geometry(value: geojson::Value) -> Result<ZoneGeometry, MalformedZone> {
        let geometry = match value {
            geojson::Value::Point(position) => {
                check_position(&position)?;
                let point: Point<f64> = geojson::Value::Point(position)
                    .try_into()
                    .map_err(conversion_error)?;
                ZoneGeometry::Point(point)
            }
            geojson::Value::Polygon(rings) => {
                check_polygon(&rings)?;
                let polygon: Polygon<f64> = geojson::Value::Polygon(rings)
                    .try_into()
                    .map_err(conversion_error)?;
                ZoneGeometry::Polygon(polygon)
            }
            geojson::Value::MultiPolygon(polygons) => {
                if polygons.is_empty() {
                    return Err(MalformedZone::Empty);
                }
                for rings in &polygons {
                    check_polygon(rings)?;
                }
                let multi: MultiPolygon<f64> = geojson::Value::MultiPolygon(polygons)
                    .try_into()
                    .map_err(conversion_error)?;
                ZoneGeometry::MultiPolygon(multi)
            }
            other => return Err(MalformedZone::UnsupportedGeometry(type_name(&other))),
        };

        let valid = match &geometry {
            ZoneGeometry::Polygon(p) => p.is_valid(),
            ZoneGeometry::MultiPolygon(mp) => mp.is_valid(),
            ZoneGeometry::Point(p) => p.is_valid(),
        };
        if !valid {
            return Err(MalformedZone::Invalid(geometry.kind()));
        }

        Ok(geometry)
    }

    /// Zones in source document order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn danger_radius_m(&self) -> f64 {
        self.danger_radius_m
    }

    /// Features dropped during loading.
    pub fn skipped(&self) -> &[SkippedFeature] {
        &self.skipped
    }
}

fn check_radius(danger_radius_m: f64) -> Result<(), ZoneError> {
    if !danger_radius_m.is_finite() || danger_radius_m <= 0.0 {
        return Err(ZoneError::InvalidRadius(danger_radius_m));
    }
    Ok(())
}

fn check_position(position: &Position) -> Result<(), MalformedZone> {
    if position.len() < 2 || !position.iter().all(|c| c.is_finite()) {
        return Err(MalformedZone::BadPosition);
    }
    Ok(())
}

fn check_polygon(rings: &PolygonType) -> Result<(), MalformedZone> {
    if rings.is_empty() {
        return Err(MalformedZone::Empty);
    }
    for ring in rings {
        // A closed ring needs at least three distinct corners plus the closing position.
        if ring.len() < 4 {
            return Err(MalformedZone::Empty);
        }
        for position in ring {
            check_position(position)?;
        }
    }
    Ok(())
}

fn type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn conversion_error(e: geojson::Error) -> MalformedZone {
    MalformedZone::Geometry(e.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors from zone loading. Any of these prevents the store from being built.
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    #[error("Zone document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read zone document: {0}")]
    Io(String),

    #[error("Failed to parse zone document: {0}")]
    Parse(String),

    #[error("Danger radius must be a positive number of meters, got {0}")]
    InvalidRadius(f64),
}

/// Why a single feature was dropped.
#[derive(Debug, thiserror::Error)]
enum MalformedZone {
    #[error("feature is not a JSON object")]
    NotAnObject,

    #[error("malformed geometry: {0}")]
    Geometry(String),

    #[error("unsupported geometry type {0} (expected Polygon, MultiPolygon or Point)")]
    UnsupportedGeometry(&'static str),

    #[error("position needs finite longitude and latitude")]
    BadPosition,

    #[error("empty polygon or ring with fewer than 4 positions")]
    Empty,

    #[error("invalid {0} geometry")]
    Invalid(&'static str),
}
