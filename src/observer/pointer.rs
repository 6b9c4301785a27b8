// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Touch versus mouse detection.

use std::sync::Arc;

use super::Observer;
use super::listeners::ListenerSet;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;

/// Guesses whether the user is on a touch device.
///
/// Starts `false`. Two one-shot listeners are registered: the first
/// `touchstart` sets the value to `true`, the first `mousemove` sets it to
/// `false`, and each listener removes itself after firing. The two paths are
/// independent, so a touch followed later by a mouse move flips the value
/// back to `false` once.
pub struct PointerModalityObserver {
    signal: Signal<bool>,
    listeners: ListenerSet,
    attached: bool,
}

impl PointerModalityObserver {
    /// Creates the observer.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            signal: Signal::new(false),
            listeners: ListenerSet::new(platform),
            attached: false,
        }
    }
}

impl Observer for PointerModalityObserver {
    type Value = bool;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        for (source, is_touch) in [(EventSource::TouchStart, true), (EventSource::MouseMove, false)] {
            let signal = self.signal.clone();
            self.listeners.listen_once(source, move || {
                if signal.set(is_touch) {
                    tracing::trace!(is_touch, "Pointer modality changed");
                }
            });
        }
        self.attached = true;
        tracing::debug!("Pointer modality observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Pointer modality observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<bool> {
        &self.signal
    }
}

impl Drop for PointerModalityObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}
