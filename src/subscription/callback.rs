// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for value change subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for a subscription.
///
/// IDs are unique within the registry that issued them and increase in
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Registry of change handlers for values of type `T`.
///
/// Handlers run synchronously in registration order. The registry lock is
/// released before any handler runs, so a handler may subscribe or
/// unsubscribe (itself included) without deadlocking.
pub struct CallbackRegistry<T> {
    next_id: AtomicU64,
    callbacks: RwLock<BTreeMap<SubscriptionId, Callback<T>>>,
}

impl<T> CallbackRegistry<T> {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(BTreeMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a handler.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a handler by its subscription ID.
    ///
    /// Returns `true` if a handler was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    /// Clears all handlers.
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    /// Calls every registered handler with `value`.
    pub fn dispatch(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self.callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(value);
        }
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Returns `true` if there are no registered handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl<T> Default for CallbackRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CallbackRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::<bool>::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn subscribe_dispatch_unsubscribe() {
        let registry = CallbackRegistry::<bool>::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.callback_count(), 1);

        registry.dispatch(&true);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.dispatch(&false);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_passes_value() {
        let registry = CallbackRegistry::<u32>::new();
        let received = Arc::new(RwLock::new(None::<u32>));
        let received_clone = received.clone();

        registry.subscribe(move |width| {
            *received_clone.write() = Some(*width);
        });

        registry.dispatch(&1280);
        assert_eq!(*received.read(), Some(1280));
    }

    #[test]
    fn dispatch_in_registration_order() {
        let registry = CallbackRegistry::<()>::new();
        let order = Arc::new(RwLock::new(Vec::new()));

        for n in 0..3 {
            let order = order.clone();
            registry.subscribe(move |()| order.write().push(n));
        }

        registry.dispatch(&());
        assert_eq!(*order.read(), vec![0, 1, 2]);
    }

    #[test]
    fn handler_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::<()>::new());
        let own_id = Arc::new(RwLock::new(None::<SubscriptionId>));
        let counter = Arc::new(AtomicU32::new(0));

        let weak = Arc::downgrade(&registry);
        let own = own_id.clone();
        let count = counter.clone();
        let id = registry.subscribe(move |()| {
            count.fetch_add(1, Ordering::SeqCst);
            if let (Some(registry), Some(id)) = (weak.upgrade(), *own.read()) {
                registry.unsubscribe(id);
            }
        });
        *own_id.write() = Some(id);

        registry.dispatch(&());
        registry.dispatch(&());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn unsubscribe_nonexistent() {
        let registry = CallbackRegistry::<()>::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn clear_removes_everything() {
        let registry = CallbackRegistry::<u8>::new();
        registry.subscribe(|_| {});
        registry.subscribe(|_| {});
        assert_eq!(registry.callback_count(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn unique_ids() {
        let registry = CallbackRegistry::<u8>::new();
        let id1 = registry.subscribe(|_| {});
        let id2 = registry.subscribe(|_| {});
        assert_ne!(id1, id2);
        assert!(id1 < id2);
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::<u8>::new();
        registry.subscribe(|_| {});

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("callback_count"));
    }
}
