// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewport dimensions observer.

use std::sync::Arc;

use super::Observer;
use super::listeners::ListenerSet;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;
use crate::types::Viewport;

/// Tracks the viewport width and height as one value.
///
/// Both dimensions are replaced in a single transition, so a handler never
/// sees a fresh width paired with a stale height. Hosts without a viewport
/// report `0x0` until the first resize.
pub struct ScreenSizeObserver {
    platform: Arc<dyn Platform>,
    signal: Signal<Viewport>,
    listeners: ListenerSet,
    attached: bool,
}

impl ScreenSizeObserver {
    /// Creates the observer, reading the current viewport.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        let initial = platform.viewport().unwrap_or_default();
        Self {
            listeners: ListenerSet::new(Arc::clone(&platform)),
            platform,
            signal: Signal::new(initial),
            attached: false,
        }
    }
}

impl Observer for ScreenSizeObserver {
    type Value = Viewport;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        let platform = Arc::downgrade(&self.platform);
        let signal = self.signal.clone();
        self.listeners.listen(EventSource::Resize, move || {
            if let Some(viewport) = platform.upgrade().and_then(|p| p.viewport())
                && signal.set(viewport)
            {
                tracing::trace!(%viewport, "Screen size changed");
            }
        });
        self.attached = true;
        tracing::debug!("Screen size observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Screen size observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<Viewport> {
        &self.signal
    }
}

impl Drop for ScreenSizeObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}
