// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Online/offline observer.

use std::sync::Arc;

use super::Observer;
use super::listeners::ListenerSet;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;

/// Tracks network connectivity.
///
/// Starts at the platform's reported flag, or `true` when the platform does
/// not report one. The `online` and `offline` listeners are independent:
/// each simply writes its own value.
pub struct NetworkObserver {
    signal: Signal<bool>,
    listeners: ListenerSet,
    attached: bool,
}

impl NetworkObserver {
    /// Creates the observer, reading the current connectivity flag.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        let initial = platform.online().unwrap_or(true);
        Self {
            listeners: ListenerSet::new(platform),
            signal: Signal::new(initial),
            attached: false,
        }
    }
}

impl Observer for NetworkObserver {
    type Value = bool;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        for (source, online) in [(EventSource::Online, true), (EventSource::Offline, false)] {
            let signal = self.signal.clone();
            self.listeners.listen(source, move || {
                if signal.set(online) {
                    tracing::trace!(online, "Connectivity changed");
                }
            });
        }
        self.attached = true;
        tracing::debug!("Network observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Network observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<bool> {
        &self.signal
    }
}

impl Drop for NetworkObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}
