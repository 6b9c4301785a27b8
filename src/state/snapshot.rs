// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time view of every signal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::event::SignalEvent;
use crate::observer::{AccessibilityState, GeolocationState, MobileState};
use crate::types::{BatteryStatus, DeviceClass, Orientation, Viewport};

/// The value of every signal at one moment.
///
/// The default mirrors the initial values of a headless host before any
/// observer is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    /// Mobile detector state.
    pub mobile: MobileState,
    /// Viewport orientation.
    pub orientation: Orientation,
    /// Whether the host reports connectivity.
    pub online: bool,
    /// Viewport dimensions.
    pub viewport: Viewport,
    /// Whether the last pointer interaction was touch.
    pub touch: bool,
    /// Battery state.
    pub battery: BatteryStatus,
    /// Latest position or geolocation error.
    pub geolocation: GeolocationState,
    /// Width-based device class.
    pub device_class: DeviceClass,
    /// Match state of each watched media query.
    pub media_queries: BTreeMap<String, bool>,
    /// Screen reader heuristic.
    pub accessibility: AccessibilityState,
    /// Whether the app runs standalone.
    pub pwa: bool,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            mobile: MobileState::default(),
            orientation: Orientation::Portrait,
            online: true,
            viewport: Viewport::default(),
            touch: false,
            battery: BatteryStatus::default(),
            geolocation: GeolocationState::default(),
            device_class: DeviceClass::Desktop,
            media_queries: BTreeMap::new(),
            accessibility: AccessibilityState::default(),
            pwa: false,
        }
    }
}

/// Assigns `value` to `slot`, reporting whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl EnvironmentSnapshot {
    /// Applies an event to the snapshot.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn apply(&mut self, event: &SignalEvent) -> bool {
        match event {
            SignalEvent::Mobile(state) => replace(&mut self.mobile, *state),
            SignalEvent::Orientation(orientation) => replace(&mut self.orientation, *orientation),
            SignalEvent::Network(online) => replace(&mut self.online, *online),
            SignalEvent::ScreenSize(viewport) => replace(&mut self.viewport, *viewport),
            SignalEvent::Pointer(touch) => replace(&mut self.touch, *touch),
            SignalEvent::Battery(status) => replace(&mut self.battery, *status),
            SignalEvent::Geolocation(state) => {
                if self.geolocation == *state {
                    false
                } else {
                    self.geolocation.clone_from(state);
                    true
                }
            }
            SignalEvent::DeviceClass(class) => replace(&mut self.device_class, *class),
            SignalEvent::MediaQuery { query, matches } => {
                if self.media_queries.get(query) == Some(matches) {
                    false
                } else {
                    self.media_queries.insert(query.clone(), *matches);
                    true
                }
            }
            SignalEvent::Accessibility(state) => replace(&mut self.accessibility, *state),
            SignalEvent::Pwa(pwa) => replace(&mut self.pwa, *pwa),
        }
    }

    /// Returns the match state of a watched media query.
    #[must_use]
    pub fn media_query(&self, query: &str) -> Option<bool> {
        self.media_queries.get(query).copied()
    }
}
