// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Screen reader heuristic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Observer;
use super::listeners::ListenerSet;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;

/// User agent substrings taken as evidence of a screen reader. Matching is
/// case-sensitive.
pub const SCREEN_READER_MARKERS: [&str; 3] = ["JAWS", "NVDA", "VoiceOver"];

/// Output of the [`AccessibilityObserver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityState {
    /// Whether the user agent names a known screen reader.
    pub is_screen_reader: bool,
}

impl AccessibilityState {
    /// Evaluates the heuristic against a user agent string.
    ///
    /// ```
    /// use envsignal_lib::observer::AccessibilityState;
    ///
    /// assert!(AccessibilityState::from_user_agent("Mozilla/5.0 NVDA/2024.1").is_screen_reader);
    /// assert!(!AccessibilityState::from_user_agent("Mozilla/5.0 nvda").is_screen_reader);
    /// ```
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        Self {
            is_screen_reader: SCREEN_READER_MARKERS
                .iter()
                .any(|marker| user_agent.contains(marker)),
        }
    }
}

/// Guesses whether a screen reader is active from the user agent.
///
/// This is a heuristic, so false negatives are expected. It is evaluated at
/// construction, again on attach, and on every window focus, since
/// assistive technology can attach or detach between focus events.
pub struct AccessibilityObserver {
    platform: Arc<dyn Platform>,
    signal: Signal<AccessibilityState>,
    listeners: ListenerSet,
    attached: bool,
}

impl AccessibilityObserver {
    /// Creates the observer, evaluating the current user agent.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        let initial = AccessibilityState::from_user_agent(&platform.user_agent());
        Self {
            listeners: ListenerSet::new(Arc::clone(&platform)),
            platform,
            signal: Signal::new(initial),
            attached: false,
        }
    }
}

fn check(platform: &dyn Platform, signal: &Signal<AccessibilityState>) {
    let state = AccessibilityState::from_user_agent(&platform.user_agent());
    if signal.set(state) {
        tracing::trace!(is_screen_reader = state.is_screen_reader, "Screen reader heuristic changed");
    }
}

impl Observer for AccessibilityObserver {
    type Value = AccessibilityState;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        check(&*self.platform, &self.signal);

        let platform = Arc::downgrade(&self.platform);
        let signal = self.signal.clone();
        self.listeners.listen(EventSource::Focus, move || {
            if let Some(platform) = platform.upgrade() {
                check(&*platform, &signal);
            }
        });
        self.attached = true;
        tracing::debug!("Accessibility observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Accessibility observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<AccessibilityState> {
        &self.signal
    }
}

impl Drop for AccessibilityObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedPlatform;

    #[test]
    fn markers_are_case_sensitive() {
        for ua in ["JAWS/2024", "x NVDA y", "Safari VoiceOver"] {
            assert!(AccessibilityState::from_user_agent(ua).is_screen_reader, "{ua}");
        }
        for ua in ["jaws", "Nvda", "voiceover", ""] {
            assert!(!AccessibilityState::from_user_agent(ua).is_screen_reader, "{ua}");
        }
    }

    #[test]
    fn computed_at_construction() {
        let host = Arc::new(SimulatedPlatform::new().with_user_agent("Mozilla/5.0 JAWS"));
        let observer = AccessibilityObserver::new(host);
        assert!(observer.current().is_screen_reader);
    }

    #[test]
    fn re_evaluated_on_focus() {
        let host = Arc::new(SimulatedPlatform::new());
        let mut observer = AccessibilityObserver::new(host.clone());
        observer.attach();
        assert!(!observer.current().is_screen_reader);

        host.set_user_agent("Mozilla/5.0 VoiceOver");
        assert!(!observer.current().is_screen_reader);

        host.focus();
        assert!(observer.current().is_screen_reader);
    }

    #[test]
    fn dispose_stops_focus_checks() {
        let host = Arc::new(SimulatedPlatform::new());
        let mut observer = AccessibilityObserver::new(host.clone());
        observer.attach();
        observer.dispose();

        host.set_user_agent("NVDA");
        host.focus();
        assert!(!observer.current().is_screen_reader);
        assert_eq!(host.listener_count(), 0);
    }
}
