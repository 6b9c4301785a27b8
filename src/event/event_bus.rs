// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of signal changes to async consumers.

use tokio::sync::broadcast;

use super::SignalEvent;

/// Events buffered per receiver before it starts lagging.
const DEFAULT_BACKLOG: usize = 256;

/// Fans [`SignalEvent`]s out to any number of async receivers.
///
/// Observer handlers run synchronously on whatever thread drove the
/// platform event, so `publish` never blocks and never fails. A receiver
/// that falls more than the backlog behind skips the oldest events and
/// gets `Lagged` once; it should then resynchronise from
/// [`EnvironmentMonitor::snapshot`](crate::EnvironmentMonitor::snapshot).
///
/// Clones share one channel, so several monitors can publish into the
/// same stream.
///
/// # Examples
///
/// ```
/// use envsignal_lib::event::{EventBus, SignalEvent};
///
/// let bus = EventBus::new();
/// let mut first = bus.subscribe();
/// let mut second = bus.subscribe();
///
/// bus.publish(SignalEvent::Pointer(true));
/// assert_eq!(first.try_recv().unwrap(), SignalEvent::Pointer(true));
/// assert_eq!(second.try_recv().unwrap(), SignalEvent::Pointer(true));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SignalEvent>,
}

impl EventBus {
    /// Creates a bus with a backlog of 256 events per receiver.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BACKLOG)
    }

    /// Creates a bus with the given per-receiver backlog.
    ///
    /// # Panics
    ///
    /// Panics if `backlog` is zero.
    #[must_use]
    pub fn with_capacity(backlog: usize) -> Self {
        let (sender, _) = broadcast::channel(backlog);
        Self { sender }
    }

    /// Returns a receiver for every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SignalEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns `true` when at least one receiver is live.
    #[must_use]
    pub fn is_observed(&self) -> bool {
        self.sender.receiver_count() > 0
    }

    /// Publishes a change. Dropped silently when nobody listens.
    pub fn publish(&self, event: SignalEvent) {
        let _ = self.publish_counted(event);
    }

    /// Publishes a change and returns how many receivers got it.
    #[must_use]
    pub fn publish_counted(&self, event: SignalEvent) -> usize {
        let kind = event.kind();
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(kind, delivered, "Signal event published");
        delivered
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
