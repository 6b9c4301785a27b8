// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewport dimensions and the orientation derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inner dimensions of the host viewport in CSS pixels.
///
/// Width and height always travel together so an observer never reports a
/// fresh width alongside a stale height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width.
    pub width: u32,
    /// Inner height.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the orientation of this viewport.
    ///
    /// Only a strictly taller viewport is portrait; a square one is landscape.
    ///
    /// # Examples
    ///
    /// ```
    /// use envsignal_lib::types::{Orientation, Viewport};
    ///
    /// assert_eq!(Viewport::new(400, 800).orientation(), Orientation::Portrait);
    /// assert_eq!(Viewport::new(800, 400).orientation(), Orientation::Landscape);
    /// assert_eq!(Viewport::new(600, 600).orientation(), Orientation::Landscape);
    /// ```
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    Portrait,
    /// Wider than tall, or square.
    Landscape,
}

impl Orientation {
    /// Returns the lowercase name of the orientation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_from_dimensions() {
        assert_eq!(Viewport::new(400, 800).orientation(), Orientation::Portrait);
        assert_eq!(Viewport::new(800, 400).orientation(), Orientation::Landscape);
    }

    #[test]
    fn square_is_landscape() {
        assert_eq!(Viewport::new(0, 0).orientation(), Orientation::Landscape);
        assert_eq!(Viewport::new(1024, 1024).orientation(), Orientation::Landscape);
    }

    #[test]
    fn display() {
        assert_eq!(Viewport::new(1280, 720).to_string(), "1280x720");
        assert_eq!(Orientation::Portrait.to_string(), "portrait");
    }

    #[test]
    fn orientation_serializes_lowercase() {
        let json = serde_json::to_string(&Orientation::Landscape).unwrap();
        assert_eq!(json, "\"landscape\"");
    }
}
