// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Installed-app (standalone display mode) detection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Observer;
use crate::platform::{Platform, STANDALONE_DISPLAY_MODE_QUERY};
use crate::signal::Signal;

/// Referrer prefix used when an Android trusted web activity launches the app.
pub const ANDROID_APP_REFERRER: &str = "android-app://";

/// The three independent checks behind the PWA verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
// Three independent evidence flags, OR-ed together.
#[allow(clippy::struct_excessive_bools)]
pub struct PwaSignals {
    /// The standalone display-mode media query matches.
    pub display_mode_standalone: bool,
    /// The platform standalone flag is set.
    pub standalone_flag: bool,
    /// The referrer shows an installed-app launch.
    pub android_app_referrer: bool,
}

impl PwaSignals {
    /// Runs the three checks against a platform.
    #[must_use]
    pub fn detect(platform: &dyn Platform) -> Self {
        Self {
            display_mode_standalone: platform.media_matches(STANDALONE_DISPLAY_MODE_QUERY),
            standalone_flag: platform.standalone_flag().unwrap_or(false),
            android_app_referrer: platform.referrer().contains(ANDROID_APP_REFERRER),
        }
    }

    /// Returns whether any check matched.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.display_mode_standalone || self.standalone_flag || self.android_app_referrer
    }
}

/// Reports whether the app runs as an installed, standalone app.
///
/// `false` until first attached. The first attach takes a one-time snapshot
/// of [`PwaSignals`]; later display-mode changes and later attach cycles do
/// not re-evaluate it. No listeners are registered.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use envsignal_lib::observer::{Observer, PwaDetector};
/// use envsignal_lib::platform::SimulatedPlatform;
///
/// let host = Arc::new(SimulatedPlatform::new().with_referrer("android-app://com.example.app"));
/// let mut pwa = PwaDetector::new(host);
/// assert!(!pwa.current());
///
/// pwa.attach();
/// assert!(pwa.current());
/// assert!(pwa.signals().unwrap().android_app_referrer);
/// ```
pub struct PwaDetector {
    platform: Arc<dyn Platform>,
    signal: Signal<bool>,
    signals: Option<PwaSignals>,
    attached: bool,
}

impl PwaDetector {
    /// Creates the detector.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            signal: Signal::new(false),
            signals: None,
            attached: false,
        }
    }

    /// Returns the snapshot taken on first attach.
    #[must_use]
    pub fn signals(&self) -> Option<PwaSignals> {
        self.signals
    }
}

impl Observer for PwaDetector {
    type Value = bool;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        if self.signals.is_some() {
            return;
        }
        let signals = PwaSignals::detect(&*self.platform);
        self.signals = Some(signals);
        self.signal.set(signals.any());
        tracing::debug!(
            standalone = signals.any(),
            display_mode = signals.display_mode_standalone,
            flag = signals.standalone_flag,
            referrer = signals.android_app_referrer,
            "PWA mode detected"
        );
    }

    fn dispose(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<bool> {
        &self.signal
    }
}
