// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bookkeeping for the platform listeners an observer owns.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::platform::{EventSource, ListenerId, ListenerOptions, Platform};

/// Every listener an observer registered, so that dispose can remove all
/// of them.
pub(crate) struct ListenerSet {
    platform: Arc<dyn Platform>,
    ids: Mutex<Vec<ListenerId>>,
}

impl ListenerSet {
    pub(crate) fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            ids: Mutex::new(Vec::new()),
        }
    }

    /// Registers a listener that fires on every event from `source`.
    pub(crate) fn listen<F>(&self, source: EventSource, handler: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register(source, handler, ListenerOptions::persistent())
    }

    /// Registers a listener the platform removes after its first event.
    pub(crate) fn listen_once<F>(&self, source: EventSource, handler: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register(source, handler, ListenerOptions::once())
    }

    fn register<F>(&self, source: EventSource, handler: F, options: ListenerOptions) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self
            .platform
            .add_listener(source, Arc::new(handler), options);
        self.ids.lock().push(id);
        id
    }

    /// Removes every registered listener. Returns how many the platform
    /// still held (one-shot listeners that already fired are not counted).
    pub(crate) fn remove_all(&self) -> usize {
        let ids = std::mem::take(&mut *self.ids.lock());
        ids.into_iter()
            .filter(|id| self.platform.remove_listener(*id))
            .count()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.ids.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedPlatform;

    #[test]
    fn remove_all_clears_platform() {
        let host = Arc::new(SimulatedPlatform::new());
        let set = ListenerSet::new(host.clone());
        set.listen(EventSource::Resize, || {});
        set.listen(EventSource::Focus, || {});
        assert_eq!(set.len(), 2);
        assert_eq!(host.listener_count(), 2);

        assert_eq!(set.remove_all(), 2);
        assert_eq!(set.len(), 0);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn fired_once_listeners_are_not_counted() {
        let host = Arc::new(SimulatedPlatform::new());
        let set = ListenerSet::new(host.clone());
        set.listen_once(EventSource::TouchStart, || {});
        set.listen_once(EventSource::MouseMove, || {});

        host.touch_start();
        assert_eq!(set.remove_all(), 1);
        assert_eq!(host.listener_count(), 0);
    }
}
