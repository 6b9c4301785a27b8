// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optional platform capabilities.
//!
//! Most signals (viewport, connectivity, user agent) are always present on a
//! host. A few APIs are optional and must be feature-tested before use:
//! battery status, geolocation and the screen orientation lock. Observers
//! check [`Capabilities::supports`] first and fall back to a fixed default
//! when the answer is no.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single optional platform API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Battery status API.
    Battery,
    /// Continuous position watching.
    Geolocation,
    /// Locking the screen orientation.
    OrientationLock,
    /// Releasing a screen orientation lock.
    OrientationUnlock,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Battery => "battery status",
            Self::Geolocation => "geolocation",
            Self::OrientationLock => "orientation lock",
            Self::OrientationUnlock => "orientation unlock",
        };
        f.write_str(name)
    }
}

/// Optional APIs a host platform exposes.
///
/// # Examples
///
/// ```
/// use envsignal_lib::{Capabilities, Capability};
///
/// let caps = Capabilities::none();
/// assert!(!caps.supports(Capability::Battery));
///
/// let phone = Capabilities::mobile_browser();
/// assert!(phone.supports(Capability::OrientationLock));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
// Each flag is an independent feature test with no combined meaning.
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Battery status API is exposed.
    #[serde(default)]
    pub battery: bool,

    /// Geolocation API is exposed.
    #[serde(default)]
    pub geolocation: bool,

    /// Screen orientation can be locked.
    #[serde(default)]
    pub orientation_lock: bool,

    /// Screen orientation can be unlocked.
    #[serde(default)]
    pub orientation_unlock: bool,
}

impl Capabilities {
    /// A host with none of the optional APIs.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            battery: false,
            geolocation: false,
            orientation_lock: false,
            orientation_unlock: false,
        }
    }

    /// A host with every optional API.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            battery: true,
            geolocation: true,
            orientation_lock: true,
            orientation_unlock: true,
        }
    }

    /// A typical desktop browser: battery and geolocation, no orientation lock.
    #[must_use]
    pub const fn desktop_browser() -> Self {
        Self {
            battery: true,
            geolocation: true,
            orientation_lock: false,
            orientation_unlock: false,
        }
    }

    /// A typical mobile browser: geolocation and orientation lock, no battery API.
    #[must_use]
    pub const fn mobile_browser() -> Self {
        Self {
            battery: false,
            geolocation: true,
            orientation_lock: true,
            orientation_unlock: true,
        }
    }

    /// Returns whether the given capability is present.
    #[must_use]
    pub const fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Battery => self.battery,
            Capability::Geolocation => self.geolocation,
            Capability::OrientationLock => self.orientation_lock,
            Capability::OrientationUnlock => self.orientation_unlock,
        }
    }
}

/// Builder for creating custom capabilities.
#[derive(Debug, Default)]
pub struct CapabilitiesBuilder {
    inner: Capabilities,
}

impl CapabilitiesBuilder {
    /// Creates a new builder with no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the battery status API.
    #[must_use]
    pub fn with_battery(mut self) -> Self {
        self.inner.battery = true;
        self
    }

    /// Enables geolocation.
    #[must_use]
    pub fn with_geolocation(mut self) -> Self {
        self.inner.geolocation = true;
        self
    }

    /// Enables both orientation lock and unlock.
    #[must_use]
    pub fn with_orientation_lock(mut self) -> Self {
        self.inner.orientation_lock = true;
        self.inner.orientation_unlock = true;
        self
    }

    /// Builds the capabilities.
    #[must_use]
    pub fn build(self) -> Capabilities {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_nothing() {
        let caps = Capabilities::default();
        assert_eq!(caps, Capabilities::none());
        assert!(!caps.supports(Capability::Battery));
        assert!(!caps.supports(Capability::Geolocation));
        assert!(!caps.supports(Capability::OrientationLock));
        assert!(!caps.supports(Capability::OrientationUnlock));
    }

    #[test]
    fn all_has_everything() {
        let caps = Capabilities::all();
        assert!(caps.supports(Capability::Battery));
        assert!(caps.supports(Capability::Geolocation));
        assert!(caps.supports(Capability::OrientationLock));
        assert!(caps.supports(Capability::OrientationUnlock));
    }

    #[test]
    fn browser_presets() {
        let desktop = Capabilities::desktop_browser();
        assert!(desktop.supports(Capability::Battery));
        assert!(!desktop.supports(Capability::OrientationLock));

        let mobile = Capabilities::mobile_browser();
        assert!(!mobile.supports(Capability::Battery));
        assert!(mobile.supports(Capability::OrientationUnlock));
    }

    #[test]
    fn builder() {
        let caps = CapabilitiesBuilder::new()
            .with_geolocation()
            .with_orientation_lock()
            .build();

        assert!(caps.geolocation);
        assert!(caps.orientation_lock);
        assert!(caps.orientation_unlock);
        assert!(!caps.battery);
    }

    #[test]
    fn deserialize_partial() {
        let caps: Capabilities = serde_json::from_str(r#"{"battery": true}"#).unwrap();
        assert!(caps.battery);
        assert!(!caps.geolocation);
    }
}
