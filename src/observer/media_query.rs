// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Media query match observer.

use std::sync::Arc;

use super::Observer;
use super::listeners::ListenerSet;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;

/// Tracks whether one media query matches.
///
/// Starts `false`. On attach the value catches up with the current match
/// state once, then follows the query's change notifications. Changing the
/// query while attached drops the old subscription and subscribes to the
/// new query.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use envsignal_lib::observer::{MediaQueryObserver, Observer};
/// use envsignal_lib::platform::SimulatedPlatform;
///
/// let query = "(prefers-color-scheme: dark)";
/// let host = Arc::new(SimulatedPlatform::new().with_media_match(query, true));
///
/// let mut dark = MediaQueryObserver::new(host.clone(), query);
/// assert!(!dark.current());
///
/// dark.attach();
/// assert!(dark.current());
///
/// host.set_media_match(query, false);
/// assert!(!dark.current());
/// ```
pub struct MediaQueryObserver {
    platform: Arc<dyn Platform>,
    query: String,
    signal: Signal<bool>,
    listeners: ListenerSet,
    attached: bool,
}

impl MediaQueryObserver {
    /// Creates an observer for `query`.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>, query: impl Into<String>) -> Self {
        Self {
            listeners: ListenerSet::new(Arc::clone(&platform)),
            platform,
            query: query.into(),
            signal: Signal::new(false),
            attached: false,
        }
    }

    /// Returns the observed query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the observed query, re-subscribing if attached.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        if self.attached {
            self.listeners.remove_all();
            self.subscribe();
            tracing::debug!(query = %self.query, "Media query observer re-subscribed");
        }
    }

    fn subscribe(&self) {
        let query = self.query.clone();
        // Catch up once before listening
        if self.signal.set(self.platform.media_matches(&query)) {
            tracing::trace!(%query, matches = self.signal.get(), "Media query caught up");
        }

        let platform = Arc::downgrade(&self.platform);
        let signal = self.signal.clone();
        self.listeners
            .listen(EventSource::MediaChange(query.clone()), move || {
                let Some(platform) = platform.upgrade() else {
                    return;
                };
                let matches = platform.media_matches(&query);
                if signal.set(matches) {
                    tracing::trace!(%query, matches, "Media query match changed");
                }
            });
    }
}

impl Observer for MediaQueryObserver {
    type Value = bool;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.subscribe();
        self.attached = true;
        tracing::debug!(query = %self.query, "Media query observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(query = %self.query, removed, "Media query observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<bool> {
        &self.signal
    }
}

impl Drop for MediaQueryObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}
