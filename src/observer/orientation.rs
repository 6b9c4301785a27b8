// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Portrait/landscape observer.

use std::sync::Arc;

use super::Observer;
use super::listeners::ListenerSet;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;
use crate::types::Orientation;

/// Tracks whether the viewport is portrait or landscape.
///
/// The value is computed at construction, not deferred to attach, and
/// recomputed on every resize. Hosts without a viewport start as portrait.
pub struct OrientationObserver {
    platform: Arc<dyn Platform>,
    signal: Signal<Orientation>,
    listeners: ListenerSet,
    attached: bool,
}

impl OrientationObserver {
    /// Creates the observer, reading the current orientation.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        let initial = platform
            .viewport()
            .map_or(Orientation::Portrait, |v| v.orientation());
        Self {
            listeners: ListenerSet::new(Arc::clone(&platform)),
            platform,
            signal: Signal::new(initial),
            attached: false,
        }
    }
}

impl Observer for OrientationObserver {
    type Value = Orientation;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        let platform = Arc::downgrade(&self.platform);
        let signal = self.signal.clone();
        self.listeners.listen(EventSource::Resize, move || {
            let Some(viewport) = platform.upgrade().and_then(|p| p.viewport()) else {
                return;
            };
            if signal.set(viewport.orientation()) {
                tracing::trace!(orientation = %viewport.orientation(), "Orientation changed");
            }
        });
        self.attached = true;
        tracing::debug!("Orientation observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Orientation observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<Orientation> {
        &self.signal
    }
}

impl Drop for OrientationObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedPlatform;

    #[test]
    fn initial_value_is_eager() {
        let host = Arc::new(SimulatedPlatform::new().with_viewport(400, 800));
        let observer = OrientationObserver::new(host);
        assert_eq!(observer.current(), Orientation::Portrait);
        assert!(!observer.is_attached());
    }

    #[test]
    fn headless_starts_portrait() {
        let host = Arc::new(SimulatedPlatform::new().headless());
        assert_eq!(OrientationObserver::new(host).current(), Orientation::Portrait);
    }

    #[test]
    fn follows_resizes() {
        let host = Arc::new(SimulatedPlatform::new().with_viewport(800, 400));
        let mut observer = OrientationObserver::new(host.clone());
        observer.attach();
        assert_eq!(observer.current(), Orientation::Landscape);

        host.resize(400, 800);
        assert_eq!(observer.current(), Orientation::Portrait);

        host.resize(500, 500);
        assert_eq!(observer.current(), Orientation::Landscape);
    }

    #[test]
    fn dispose_stops_updates() {
        let host = Arc::new(SimulatedPlatform::new().with_viewport(800, 400));
        let mut observer = OrientationObserver::new(host.clone());
        observer.attach();
        observer.dispose();

        host.resize(400, 800);
        assert_eq!(observer.current(), Orientation::Landscape);
        assert_eq!(host.listener_count(), 0);
    }
}
