// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geolocation fixes and failures.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coordinates of a geolocation fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Accuracy of latitude and longitude, in meters.
    pub accuracy: f64,
    /// Altitude in meters above the WGS84 ellipsoid.
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Accuracy of the altitude, in meters.
    #[serde(default)]
    pub altitude_accuracy: Option<f64>,
    /// Direction of travel in degrees clockwise from true north.
    #[serde(default)]
    pub heading: Option<f64>,
    /// Ground speed in meters per second.
    #[serde(default)]
    pub speed: Option<f64>,
}

impl Coordinates {
    /// Creates coordinates with only latitude, longitude and accuracy set.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            altitude: None,
            altitude_accuracy: None,
            heading: None,
            speed: None,
        }
    }
}

/// A geolocation fix: coordinates plus the time they were acquired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Reported coordinates.
    pub coords: Coordinates,
    /// Acquisition time.
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(coords: Coordinates, timestamp: DateTime<Utc>) -> Self {
        Self { coords, timestamp }
    }
}

/// Reason a position request failed, using the platform's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionErrorCode {
    /// The user or host denied permission.
    PermissionDenied = 1,
    /// No position could be determined.
    PositionUnavailable = 2,
    /// The request took too long.
    Timeout = 3,
}

impl PositionErrorCode {
    /// Maps a platform numeric code to a variant.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    /// Returns the platform numeric code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// A failed position request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionError {
    /// Failure category.
    pub code: PositionErrorCode,
    /// Human readable message from the host.
    pub message: String,
}

impl PositionError {
    /// Creates a position error.
    #[must_use]
    pub fn new(code: PositionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PositionError {}
