// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery level and status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Battery charge as a fraction between 0.0 and 1.0.
///
/// # Examples
///
/// ```
/// use envsignal_lib::types::BatteryLevel;
///
/// let level = BatteryLevel::new(0.42).unwrap();
/// assert_eq!(level.as_percent(), 42);
///
/// assert!(BatteryLevel::new(1.2).is_err());
/// assert_eq!(BatteryLevel::clamped(1.2), BatteryLevel::FULL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BatteryLevel(f64);

impl BatteryLevel {
    /// Empty battery.
    pub const EMPTY: Self = Self(0.0);

    /// Fully charged battery.
    pub const FULL: Self = Self(1.0);

    /// Creates a battery level from a fraction.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidBatteryLevel` if the fraction is outside
    /// `[0.0, 1.0]` or is not a number.
    pub fn new(fraction: f64) -> Result<Self, ValueError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ValueError::InvalidBatteryLevel(fraction));
        }
        Ok(Self(fraction))
    }

    /// Creates a battery level, clamping to the valid range.
    ///
    /// `NaN` maps to [`BatteryLevel::EMPTY`].
    #[must_use]
    pub fn clamped(fraction: f64) -> Self {
        if fraction.is_nan() {
            Self::EMPTY
        } else {
            Self(fraction.clamp(0.0, 1.0))
        }
    }

    /// Returns the fraction value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns the level as a rounded percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_percent(&self) -> u8 {
        // Safe: the fraction is within [0, 1], so the result is within [0, 100]
        (self.0 * 100.0).round() as u8
    }
}

impl Default for BatteryLevel {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

impl TryFrom<f64> for BatteryLevel {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BatteryLevel> for f64 {
    fn from(level: BatteryLevel) -> Self {
        level.0
    }
}

/// Charge level and charging flag reported by the battery API.
///
/// The default, `{ level: 1.0, charging: false }`, is what the battery
/// observer reports forever on hosts without a battery API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Current charge level.
    pub level: BatteryLevel,
    /// Whether the battery is charging.
    pub charging: bool,
}

impl BatteryStatus {
    /// Creates a battery status.
    #[must_use]
    pub const fn new(level: BatteryLevel, charging: bool) -> Self {
        Self { level, charging }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_bounds() {
        assert!(BatteryLevel::new(0.0).is_ok());
        assert!(BatteryLevel::new(1.0).is_ok());
        assert!(BatteryLevel::new(-0.01).is_err());
        assert!(BatteryLevel::new(1.01).is_err());
        assert!(BatteryLevel::new(f64::NAN).is_err());
    }

    #[test]
    fn level_clamped() {
        assert_eq!(BatteryLevel::clamped(-3.0), BatteryLevel::EMPTY);
        assert_eq!(BatteryLevel::clamped(7.0), BatteryLevel::FULL);
        assert_eq!(BatteryLevel::clamped(f64::NAN), BatteryLevel::EMPTY);
    }

    #[test]
    fn level_percent_and_display() {
        let level = BatteryLevel::new(0.756).unwrap();
        assert_eq!(level.as_percent(), 76);
        assert_eq!(level.to_string(), "76%");
    }

    #[test]
    fn default_status_is_full_and_not_charging() {
        let status = BatteryStatus::default();
        assert_eq!(status.level, BatteryLevel::FULL);
        assert!(!status.charging);
    }

    #[test]
    fn level_serde_rejects_out_of_range() {
        let status: BatteryStatus =
            serde_json::from_str(r#"{"level": 0.5, "charging": true}"#).unwrap();
        assert!((status.level.value() - 0.5).abs() < f64::EPSILON);
        assert!(status.charging);

        assert!(serde_json::from_str::<BatteryLevel>("1.5").is_err());
    }
}
