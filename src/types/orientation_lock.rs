// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Screen orientation lock targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Orientation a screen can be locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationLockType {
    /// Any orientation the device supports.
    Any,
    /// The device's natural orientation.
    Natural,
    /// Either landscape orientation.
    Landscape,
    /// Either portrait orientation.
    Portrait,
    /// Primary portrait orientation.
    PortraitPrimary,
    /// Upside-down portrait orientation.
    PortraitSecondary,
    /// Primary landscape orientation.
    LandscapePrimary,
    /// Secondary landscape orientation.
    LandscapeSecondary,
}

impl OrientationLockType {
    /// Returns the platform keyword for this lock type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Natural => "natural",
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::PortraitPrimary => "portrait-primary",
            Self::PortraitSecondary => "portrait-secondary",
            Self::LandscapePrimary => "landscape-primary",
            Self::LandscapeSecondary => "landscape-secondary",
        }
    }
}

impl fmt::Display for OrientationLockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
