// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Safety check request parsing and coordinate validation.

use crate::error::AppError;
use serde::Deserialize;
use serde_json::Value;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Validate that both components are finite and within WGS84 ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AppError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(AppError::CoordinatesOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Raw check request as sent by clients.
///
/// Coordinates may arrive as JSON numbers or numeric strings, under either
/// the long (`latitude`) or short (`lat`) key.
#[derive(Debug, Deserialize)]
struct RawCheckRequest {
    #[serde(default)]
    latitude: Option<Value>,
    #[serde(default)]
    lat: Option<Value>,
    #[serde(default)]
    longitude: Option<Value>,
    #[serde(default)]
    lon: Option<Value>,
    #[serde(default)]
    tourist_id: Option<Value>,
}

/// A parsed and validated safety check request.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSafetyRequest {
    pub coordinate: Coordinate,
    /// Opaque caller identifier, recorded but never interpreted.
    pub tourist_id: Option<String>,
}

impl CheckSafetyRequest {
    /// Parse a request from a JSON document.
    pub fn from_json(body: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(body).map_err(|_| AppError::InvalidJson)?;
        if !value.is_object() {
            return Err(AppError::InvalidJson);
        }
        let raw: RawCheckRequest =
            serde_json::from_value(value).map_err(|_| AppError::InvalidJson)?;

        let lat = first_present(raw.latitude, raw.lat);
        let lon = first_present(raw.longitude, raw.lon);
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(AppError::MissingCoordinates);
        };

        let coordinate = Coordinate::new(as_number(&lat)?, as_number(&lon)?)?;

        let tourist_id = raw.tourist_id.and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(Self {
            coordinate,
            tourist_id,
        })
    }
}

fn first_present(primary: Option<Value>, alias: Option<Value>) -> Option<Value> {
    primary
        .filter(|v| !v.is_null())
        .or_else(|| alias.filter(|v| !v.is_null()))
}

fn as_number(value: &Value) -> Result<f64, AppError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(AppError::NonNumericCoordinates),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::NonNumericCoordinates),
        _ => Err(AppError::NonNumericCoordinates),
    }
}
