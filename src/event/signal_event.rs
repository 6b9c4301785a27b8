// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Signal change events.

use serde::{Deserialize, Serialize};

use crate::observer::{AccessibilityState, GeolocationState, MobileState};
use crate::types::{BatteryStatus, DeviceClass, Orientation, Viewport};

/// A new value reported by one observer.
///
/// Serialized with an adjacent tag so every variant, including bare
/// booleans, has the same `{"signal": ..., "value": ...}` shape.
///
/// # Examples
///
/// ```
/// use envsignal_lib::event::SignalEvent;
/// use envsignal_lib::types::Viewport;
///
/// let event = SignalEvent::ScreenSize(Viewport::new(390, 844));
/// assert_eq!(event.kind(), "screen_size");
/// assert!(event.is_layout());
///
/// let json = serde_json::to_string(&SignalEvent::Pwa(true)).unwrap();
/// assert_eq!(json, r#"{"signal":"pwa","value":true}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", content = "value", rename_all = "snake_case")]
pub enum SignalEvent {
    /// Mobile detector changed.
    Mobile(MobileState),
    /// Viewport orientation changed.
    Orientation(Orientation),
    /// Connectivity changed; `true` when online.
    Network(bool),
    /// Viewport dimensions changed.
    ScreenSize(Viewport),
    /// Pointer modality changed; `true` when touch.
    Pointer(bool),
    /// Battery level or charging state changed.
    Battery(BatteryStatus),
    /// A position fix or a geolocation error arrived.
    Geolocation(GeolocationState),
    /// Width-based device class changed.
    DeviceClass(DeviceClass),
    /// A watched media query flipped.
    MediaQuery {
        /// The query text.
        query: String,
        /// Whether it now matches.
        matches: bool,
    },
    /// Screen reader heuristic changed.
    Accessibility(AccessibilityState),
    /// Standalone app detection resolved.
    Pwa(bool),
}

impl SignalEvent {
    /// Creates a media query event.
    #[must_use]
    pub fn media_query(query: impl Into<String>, matches: bool) -> Self {
        Self::MediaQuery {
            query: query.into(),
            matches,
        }
    }

    /// Returns the snake-case name of the originating signal.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Mobile(_) => "mobile",
            Self::Orientation(_) => "orientation",
            Self::Network(_) => "network",
            Self::ScreenSize(_) => "screen_size",
            Self::Pointer(_) => "pointer",
            Self::Battery(_) => "battery",
            Self::Geolocation(_) => "geolocation",
            Self::DeviceClass(_) => "device_class",
            Self::MediaQuery { .. } => "media_query",
            Self::Accessibility(_) => "accessibility",
            Self::Pwa(_) => "pwa",
        }
    }

    /// Returns `true` for signals derived from the viewport size.
    #[must_use]
    pub const fn is_layout(&self) -> bool {
        matches!(
            self,
            Self::Mobile(_) | Self::Orientation(_) | Self::ScreenSize(_) | Self::DeviceClass(_)
        )
    }

    /// Returns `true` for signals that only an asynchronous platform
    /// request can produce.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        matches!(self, Self::Battery(_) | Self::Geolocation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serde_tag() {
        let events = [
            SignalEvent::Mobile(MobileState::default()),
            SignalEvent::Orientation(Orientation::Landscape),
            SignalEvent::Network(true),
            SignalEvent::DeviceClass(DeviceClass::Tablet),
            SignalEvent::media_query("(min-width: 600px)", true),
            SignalEvent::Pwa(false),
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["signal"], event.kind());
        }
    }

    #[test]
    fn media_query_serializes_fields() {
        let json = serde_json::to_value(SignalEvent::media_query("(hover: hover)", false)).unwrap();
        assert_eq!(json["value"]["query"], "(hover: hover)");
        assert_eq!(json["value"]["matches"], false);
    }

    #[test]
    fn deserialize_roundtrip() {
        let event = SignalEvent::ScreenSize(Viewport::new(800, 600));
        let json = serde_json::to_string(&event).unwrap();
        let back: SignalEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn categories() {
        assert!(SignalEvent::DeviceClass(DeviceClass::Mobile).is_layout());
        assert!(!SignalEvent::Network(false).is_layout());
        assert!(SignalEvent::Battery(BatteryStatus::default()).is_async());
        assert!(!SignalEvent::Pointer(true).is_async());
    }
}
