// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::services::zones::DEFAULT_DANGER_RADIUS_M;
use std::env;
use std::path::PathBuf;

const DEFAULT_ZONES_PATH: &str = "data/danger_zones.geojson";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GeoJSON document with the danger zones
    pub zones_path: PathBuf,
    /// Buffer around each zone that still counts as danger, in meters
    pub danger_radius_m: f64,
    /// Append-only JSON-lines file for check events (disabled if unset)
    pub tracking_log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zones_path: PathBuf::from(DEFAULT_ZONES_PATH),
            danger_radius_m: DEFAULT_DANGER_RADIUS_M,
            tracking_log_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let danger_radius_m = match env::var("DANGER_RADIUS_M") {
            Ok(raw) => parse_radius(&raw)?,
            Err(_) => DEFAULT_DANGER_RADIUS_M,
        };

        Ok(Self {
            zones_path: env::var("ZONES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ZONES_PATH)),
            danger_radius_m,
            tracking_log_path: env::var("TRACKING_LOG_PATH")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_radius(raw: &str) -> Result<f64, ConfigError> {
    let radius: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid("DANGER_RADIUS_M", raw.to_string()))?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ConfigError::Invalid("DANGER_RADIUS_M", raw.to_string()));
    }
    Ok(radius)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
