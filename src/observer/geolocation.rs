// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Continuous geolocation observer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Observer;
use crate::capabilities::Capability;
use crate::platform::{Platform, WatchId};
use crate::signal::Signal;
use crate::types::{Position, PositionError};

/// Error reported when the host has no geolocation API.
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported by your browser";

/// Output of the [`GeolocationObserver`].
///
/// `location` and `error` are independent channels: a new fix does not
/// clear an earlier error, and a new error does not clear the last fix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeolocationState {
    /// Most recent fix.
    pub location: Option<Position>,
    /// Most recent failure message.
    pub error: Option<String>,
}

/// Tracks the device position through a continuous watch.
///
/// Without a geolocation API, attach sets [`GEOLOCATION_UNSUPPORTED`] as the
/// error and does nothing else; there are no retries. With one, attach
/// starts a position watch that dispose cancels.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use envsignal_lib::observer::{GEOLOCATION_UNSUPPORTED, GeolocationObserver, Observer};
/// use envsignal_lib::platform::SimulatedPlatform;
///
/// let host = Arc::new(SimulatedPlatform::new());
/// let mut geo = GeolocationObserver::new(host);
/// geo.attach();
///
/// assert_eq!(geo.current().error.as_deref(), Some(GEOLOCATION_UNSUPPORTED));
/// assert!(geo.current().location.is_none());
/// ```
pub struct GeolocationObserver {
    platform: Arc<dyn Platform>,
    signal: Signal<GeolocationState>,
    watch: Option<WatchId>,
    attached: bool,
}

impl GeolocationObserver {
    /// Creates the observer with no fix and no error.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            signal: Signal::new(GeolocationState::default()),
            watch: None,
            attached: false,
        }
    }

    /// Returns the running watch, if any.
    #[must_use]
    pub fn watch_id(&self) -> Option<WatchId> {
        self.watch
    }
}

impl Observer for GeolocationObserver {
    type Value = GeolocationState;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;

        if !self.platform.capabilities().supports(Capability::Geolocation) {
            tracing::warn!("Geolocation API not available");
            self.signal
                .update(|state| state.error = Some(GEOLOCATION_UNSUPPORTED.to_string()));
            return;
        }

        let on_fix = {
            let signal = self.signal.clone();
            Arc::new(move |position: Position| {
                tracing::trace!(
                    latitude = position.coords.latitude,
                    longitude = position.coords.longitude,
                    "Position fix"
                );
                signal.update(|state| state.location = Some(position));
            })
        };
        let on_error = {
            let signal = self.signal.clone();
            Arc::new(move |error: PositionError| {
                tracing::debug!(code = error.code.code(), message = %error.message, "Position error");
                signal.update(|state| state.error = Some(error.message));
            })
        };

        let id = self.platform.watch_position(on_fix, on_error);
        self.watch = Some(id);
        tracing::debug!(watch = id.value(), "Geolocation observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        if let Some(id) = self.watch.take() {
            self.platform.clear_watch(id);
        }
        self.attached = false;
        tracing::debug!("Geolocation observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<GeolocationState> {
        &self.signal
    }
}

impl Drop for GeolocationObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}
