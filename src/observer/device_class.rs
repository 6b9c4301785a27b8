// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mobile/tablet/desktop classification observer.

use std::sync::Arc;

use super::Observer;
use super::listeners::ListenerSet;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;
use crate::types::{DeviceClass, DeviceClassThresholds};

/// Classifies the viewport width into a [`DeviceClass`].
///
/// Reports [`DeviceClass::Desktop`] until attached; attaching classifies
/// the current width immediately and every resize reclassifies it.
pub struct DeviceClassObserver {
    platform: Arc<dyn Platform>,
    thresholds: DeviceClassThresholds,
    signal: Signal<DeviceClass>,
    listeners: ListenerSet,
    attached: bool,
}

impl DeviceClassObserver {
    /// Creates the observer with the default 768 / 1024 thresholds.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self::with_thresholds(platform, DeviceClassThresholds::DEFAULT)
    }

    /// Creates the observer with custom thresholds.
    #[must_use]
    pub fn with_thresholds(platform: Arc<dyn Platform>, thresholds: DeviceClassThresholds) -> Self {
        Self {
            listeners: ListenerSet::new(Arc::clone(&platform)),
            platform,
            thresholds,
            signal: Signal::new(DeviceClass::Desktop),
            attached: false,
        }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> DeviceClassThresholds {
        self.thresholds
    }
}

fn classify(platform: &dyn Platform, thresholds: DeviceClassThresholds, signal: &Signal<DeviceClass>) {
    if let Some(viewport) = platform.viewport() {
        let class = thresholds.classify(viewport.width);
        if signal.set(class) {
            tracing::trace!(%class, width = viewport.width, "Device class changed");
        }
    }
}

impl Observer for DeviceClassObserver {
    type Value = DeviceClass;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        let thresholds = self.thresholds;
        classify(&*self.platform, thresholds, &self.signal);

        let platform = Arc::downgrade(&self.platform);
        let signal = self.signal.clone();
        self.listeners.listen(EventSource::Resize, move || {
            if let Some(platform) = platform.upgrade() {
                classify(&*platform, thresholds, &signal);
            }
        });
        self.attached = true;
        tracing::debug!("Device class observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Device class observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<DeviceClass> {
        &self.signal
    }
}

impl Drop for DeviceClassObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedPlatform;

    #[test]
    fn desktop_until_attached() {
        let host = Arc::new(SimulatedPlatform::new().with_viewport(320, 640));
        let mut observer = DeviceClassObserver::new(host);
        assert_eq!(observer.current(), DeviceClass::Desktop);

        observer.attach();
        assert_eq!(observer.current(), DeviceClass::Mobile);
    }

    #[test]
    fn boundaries_on_resize() {
        let host = Arc::new(SimulatedPlatform::new());
        let mut observer = DeviceClassObserver::new(host.clone());
        observer.attach();

        let cases = [
            (767, DeviceClass::Mobile),
            (768, DeviceClass::Tablet),
            (1023, DeviceClass::Tablet),
            (1024, DeviceClass::Desktop),
        ];
        for (width, expected) in cases {
            host.resize(width, 700);
            assert_eq!(observer.current(), expected, "width {width}");
        }
    }

    #[test]
    fn custom_thresholds() {
        let host = Arc::new(SimulatedPlatform::new().with_viewport(700, 700));
        let thresholds = DeviceClassThresholds::new(600, 900).unwrap();
        let mut observer = DeviceClassObserver::with_thresholds(host, thresholds);
        observer.attach();
        assert_eq!(observer.current(), DeviceClass::Tablet);
        assert_eq!(observer.thresholds(), thresholds);
    }

    #[test]
    fn dispose_stops_updates() {
        let host = Arc::new(SimulatedPlatform::new().with_viewport(1280, 700));
        let mut observer = DeviceClassObserver::new(host.clone());
        observer.attach();
        observer.dispose();

        host.resize(500, 700);
        assert_eq!(observer.current(), DeviceClass::Desktop);
        assert_eq!(host.listener_count(), 0);
    }
}
