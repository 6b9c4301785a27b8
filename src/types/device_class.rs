// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Width-based device classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Coarse device class derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Narrower than the tablet threshold.
    Mobile,
    /// At least the tablet threshold, narrower than the desktop threshold.
    Tablet,
    /// At least the desktop threshold.
    Desktop,
}

impl DeviceClass {
    /// Classifies a width with the default thresholds (768 / 1024).
    ///
    /// # Examples
    ///
    /// ```
    /// use envsignal_lib::types::DeviceClass;
    ///
    /// assert_eq!(DeviceClass::classify(767), DeviceClass::Mobile);
    /// assert_eq!(DeviceClass::classify(768), DeviceClass::Tablet);
    /// assert_eq!(DeviceClass::classify(1023), DeviceClass::Tablet);
    /// assert_eq!(DeviceClass::classify(1024), DeviceClass::Desktop);
    /// ```
    #[must_use]
    pub const fn classify(width: u32) -> Self {
        DeviceClassThresholds::DEFAULT.classify(width)
    }

    /// Returns the lowercase name of the class.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width thresholds separating the device classes.
///
/// Both bounds are inclusive lower bounds: a width equal to `tablet_min` is
/// a tablet, a width equal to `desktop_min` is a desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct DeviceClassThresholds {
    tablet_min: u32,
    desktop_min: u32,
}

#[derive(Deserialize)]
struct RawThresholds {
    #[serde(default = "default_tablet_min")]
    tablet_min: u32,
    #[serde(default = "default_desktop_min")]
    desktop_min: u32,
}

const fn default_tablet_min() -> u32 {
    768
}

const fn default_desktop_min() -> u32 {
    1024
}

impl TryFrom<RawThresholds> for DeviceClassThresholds {
    type Error = ValueError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.tablet_min, raw.desktop_min)
    }
}

impl DeviceClassThresholds {
    /// The standard 768 / 1024 split.
    pub const DEFAULT: Self = Self {
        tablet_min: default_tablet_min(),
        desktop_min: default_desktop_min(),
    };

    /// Creates thresholds from the smallest tablet and desktop widths.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ThresholdOrder` unless `tablet_min < desktop_min`.
    pub fn new(tablet_min: u32, desktop_min: u32) -> Result<Self, ValueError> {
        if tablet_min >= desktop_min {
            return Err(ValueError::ThresholdOrder {
                tablet_min,
                desktop_min,
            });
        }
        Ok(Self {
            tablet_min,
            desktop_min,
        })
    }

    /// Smallest width classified as tablet.
    #[must_use]
    pub const fn tablet_min(&self) -> u32 {
        self.tablet_min
    }

    /// Smallest width classified as desktop.
    #[must_use]
    pub const fn desktop_min(&self) -> u32 {
        self.desktop_min
    }

    /// Classifies a width.
    #[must_use]
    pub const fn classify(&self, width: u32) -> DeviceClass {
        if width < self.tablet_min {
            DeviceClass::Mobile
        } else if width < self.desktop_min {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}

impl Default for DeviceClassThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_boundaries() {
        assert_eq!(DeviceClass::classify(0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(767), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(768), DeviceClass::Tablet);
        assert_eq!(DeviceClass::classify(1023), DeviceClass::Tablet);
        assert_eq!(DeviceClass::classify(1024), DeviceClass::Desktop);
        assert_eq!(DeviceClass::classify(3840), DeviceClass::Desktop);
    }

    #[test]
    fn custom_thresholds() {
        let t = DeviceClassThresholds::new(600, 1200).unwrap();
        assert_eq!(t.classify(599), DeviceClass::Mobile);
        assert_eq!(t.classify(600), DeviceClass::Tablet);
        assert_eq!(t.classify(1200), DeviceClass::Desktop);
    }

    #[test]
    fn thresholds_must_be_ordered() {
        assert!(DeviceClassThresholds::new(1024, 768).is_err());
        assert!(DeviceClassThresholds::new(800, 800).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let t: DeviceClassThresholds = serde_json::from_str("{}").unwrap();
        assert_eq!(t, DeviceClassThresholds::DEFAULT);

        let bad = serde_json::from_str::<DeviceClassThresholds>(
            r#"{"tablet_min": 1100, "desktop_min": 1000}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn display() {
        assert_eq!(DeviceClass::Tablet.to_string(), "tablet");
    }
}
