// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewport width breakpoint detector.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Observer;
use super::listeners::ListenerSet;
use crate::config::MobileConfig;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;

/// Output of the [`MobileDetector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileState {
    /// Whether the last measured width is below the breakpoint.
    pub is_mobile: bool,
    /// Last measured viewport width.
    pub width: u32,
}

/// Classifies the viewport as mobile when its width is below a breakpoint.
///
/// Before the first measurement `width` holds the current viewport width,
/// or the configured fallback when there is no viewport, and `is_mobile`
/// is `false`. Attaching measures immediately; every resize re-measures
/// synchronously, without debouncing.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use envsignal_lib::config::MobileConfig;
/// use envsignal_lib::observer::{MobileDetector, Observer};
/// use envsignal_lib::platform::SimulatedPlatform;
///
/// let host = Arc::new(SimulatedPlatform::new().with_viewport(1280, 800));
/// let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
/// detector.attach();
/// assert!(!detector.current().is_mobile);
///
/// host.resize(375, 667);
/// assert!(detector.current().is_mobile);
/// assert_eq!(detector.current().width, 375);
/// ```
pub struct MobileDetector {
    platform: Arc<dyn Platform>,
    config: MobileConfig,
    signal: Signal<MobileState>,
    listeners: ListenerSet,
    attached: bool,
}

impl MobileDetector {
    /// Creates a detector. Nothing is measured until [`Observer::attach`].
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>, config: MobileConfig) -> Self {
        let width = platform
            .viewport()
            .map(|v| v.width)
            .or(config.fallback_width)
            .unwrap_or(0);
        Self {
            listeners: ListenerSet::new(Arc::clone(&platform)),
            platform,
            config,
            signal: Signal::new(MobileState {
                is_mobile: false,
                width,
            }),
            attached: false,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &MobileConfig {
        &self.config
    }

    /// Changes the breakpoint.
    ///
    /// While attached, the resize listener is replaced by one bound to the
    /// new breakpoint and the viewport is re-measured.
    pub fn set_breakpoint(&mut self, breakpoint: u32) {
        if self.config.breakpoint == breakpoint {
            return;
        }
        self.config.breakpoint = breakpoint;
        if self.attached {
            self.listeners.remove_all();
            self.subscribe();
            tracing::debug!(breakpoint, "Mobile detector re-registered for new breakpoint");
        }
    }

    fn subscribe(&self) {
        let breakpoint = self.config.breakpoint;
        measure(&*self.platform, breakpoint, &self.signal);

        let platform = Arc::downgrade(&self.platform);
        let signal = self.signal.clone();
        self.listeners.listen(EventSource::Resize, move || {
            if let Some(platform) = platform.upgrade() {
                measure(&*platform, breakpoint, &signal);
            }
        });
    }
}

fn measure(platform: &dyn Platform, breakpoint: u32, signal: &Signal<MobileState>) {
    if let Some(viewport) = platform.viewport() {
        let state = MobileState {
            is_mobile: viewport.width < breakpoint,
            width: viewport.width,
        };
        if signal.set(state) {
            tracing::trace!(width = state.width, is_mobile = state.is_mobile, "Mobile state changed");
        }
    }
}

impl Observer for MobileDetector {
    type Value = MobileState;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.subscribe();
        self.attached = true;
        tracing::debug!(breakpoint = self.config.breakpoint, "Mobile detector attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Mobile detector disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<MobileState> {
        &self.signal
    }
}

impl Drop for MobileDetector {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedPlatform;

    fn host(width: u32) -> Arc<SimulatedPlatform> {
        Arc::new(SimulatedPlatform::new().with_viewport(width, 800))
    }

    #[test]
    fn initial_state_before_attach() {
        let detector = MobileDetector::new(host(500), MobileConfig::default());
        assert_eq!(
            detector.current(),
            MobileState {
                is_mobile: false,
                width: 500
            }
        );
    }

    #[test]
    fn fallback_width_without_viewport() {
        let host = Arc::new(SimulatedPlatform::new().headless());
        let detector = MobileDetector::new(host.clone(), MobileConfig::default().with_fallback_width(360));
        assert_eq!(detector.current().width, 360);

        let detector = MobileDetector::new(host, MobileConfig::default());
        assert_eq!(detector.current().width, 0);
    }

    #[test]
    fn attach_measures_immediately() {
        let mut detector = MobileDetector::new(host(500), MobileConfig::default());
        detector.attach();
        assert!(detector.current().is_mobile);
    }

    #[test]
    fn breakpoint_edges() {
        let host = host(767);
        let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
        detector.attach();
        assert!(detector.current().is_mobile);

        host.resize(768, 800);
        assert!(!detector.current().is_mobile);

        host.resize(0, 800);
        assert!(detector.current().is_mobile);
    }

    #[test]
    fn every_resize_updates_synchronously() {
        let host = host(1200);
        let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
        detector.attach();

        for width in [1000, 900, 800, 700, 600] {
            host.resize(width, 800);
            assert_eq!(detector.current().width, width);
        }
    }

    #[test]
    fn changing_breakpoint_re_registers() {
        let host = host(900);
        let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
        detector.attach();
        assert!(!detector.current().is_mobile);

        detector.set_breakpoint(1000);
        assert!(detector.current().is_mobile);
        assert_eq!(host.listener_count_for(&EventSource::Resize), 1);

        host.resize(950, 800);
        assert!(detector.current().is_mobile);
        host.resize(1000, 800);
        assert!(!detector.current().is_mobile);
    }

    #[test]
    fn breakpoint_change_while_detached_applies_on_attach() {
        let host = host(900);
        let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
        detector.set_breakpoint(1000);
        assert_eq!(host.listener_count(), 0);

        detector.attach();
        assert!(detector.current().is_mobile);
    }

    #[test]
    fn dispose_removes_listener() {
        let host = host(1200);
        let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
        detector.attach();
        detector.dispose();
        assert_eq!(host.listener_count(), 0);

        host.resize(300, 800);
        assert_eq!(detector.current().width, 1200);
        assert!(!detector.current().is_mobile);
    }

    #[test]
    fn drop_disposes() {
        let host = host(1200);
        {
            let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
            detector.attach();
            assert_eq!(host.listener_count(), 1);
        }
        assert_eq!(host.listener_count(), 0);
    }
}
