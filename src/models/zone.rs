// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Danger zone model and geometry handling.

use geo::{Closest, ClosestPoint, Intersects, MultiPolygon, Point, Polygon};
use serde_json::{Map, Value};

/// A danger zone with its geometry and identifying properties.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Zone geometry in longitude/latitude order
    pub geometry: ZoneGeometry,
    /// Identifying properties from the source feature
    pub properties: ZoneProperties,
}

impl Zone {
    /// Identifier used in result reasons: `id`, falling back to `name`.
    pub fn display_id(&self) -> Option<&str> {
        self.properties.display_id()
    }
}

/// Zone geometry - a polygon, multi-polygon or single point.
#[derive(Debug, Clone)]
pub enum ZoneGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
    Point(Point<f64>),
}

impl ZoneGeometry {
    /// Check if a point lies within or on the boundary of this geometry.
    pub fn contains_point(&self, point: &Point<f64>) -> bool {
        match self {
            ZoneGeometry::Polygon(p) => p.intersects(point),
            ZoneGeometry::MultiPolygon(mp) => mp.intersects(point),
            ZoneGeometry::Point(zp) => zp.intersects(point),
        }
    }

    /// Nearest point of this geometry to `point`.
    ///
    /// Returns `None` when the geometry is degenerate and no single nearest
    /// point exists.
    pub fn closest_point(&self, point: &Point<f64>) -> Option<Point<f64>> {
        let closest = match self {
            ZoneGeometry::Polygon(p) => p.closest_point(point),
            ZoneGeometry::MultiPolygon(mp) => mp.closest_point(point),
            ZoneGeometry::Point(zp) => zp.closest_point(point),
        };

        match closest {
            Closest::Intersection(p) | Closest::SinglePoint(p) => Some(p),
            Closest::Indeterminate => None,
        }
    }

    /// GeoJSON type name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ZoneGeometry::Polygon(_) => "Polygon",
            ZoneGeometry::MultiPolygon(_) => "MultiPolygon",
            ZoneGeometry::Point(_) => "Point",
        }
    }
}

/// Feature properties. Only `id` and `name` are interpreted; everything
/// else is carried along in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneProperties {
    pub id: Option<String>,
    pub name: Option<String>,
    pub extra: Map<String, Value>,
}

impl ZoneProperties {
    /// Build from a GeoJSON properties object.
    ///
    /// `id` and `name` may be strings or numbers. Empty strings, zero,
    /// `false` and `null` are treated as absent.
    pub fn from_json(mut properties: Map<String, Value>) -> Self {
        let id = properties.remove("id").and_then(identifier);
        let name = properties.remove("name").and_then(identifier);
        Self {
            id,
            name,
            extra: properties,
        }
    }

    pub fn display_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.name.as_deref())
    }
}

fn identifier(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
