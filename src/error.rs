// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent JSON responses.

use serde::Serialize;

/// Application error type that converts to a JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Request body is not a JSON object")]
    InvalidJson,

    #[error("Latitude and longitude are required")]
    MissingCoordinates,

    #[error("Latitude and longitude must be numbers")]
    NonNumericCoordinates,

    #[error("Latitude must be within [-90, 90] and longitude within [-180, 180]")]
    CoordinatesOutOfRange,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidJson => "invalid_json",
            AppError::MissingCoordinates => "latitude_and_longitude_required",
            AppError::NonNumericCoordinates => "lat_lon_must_be_numbers",
            AppError::CoordinatesOutOfRange => "lat_lon_out_of_range",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether the error was caused by the client's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidJson
                | AppError::MissingCoordinates
                | AppError::NonNumericCoordinates
                | AppError::CoordinatesOutOfRange
        )
    }

    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            AppError::CoordinatesOutOfRange => Some(self.to_string()),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                None
            }
            _ => None,
        };

        ErrorResponse {
            error: self.code().to_string(),
            details,
        }
    }
}

/// Result type alias for request handling
pub type Result<T> = std::result::Result<T, AppError>;
