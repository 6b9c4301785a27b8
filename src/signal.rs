// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reactive value cell shared between an observer and its listeners.

use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};

use crate::subscription::{CallbackRegistry, SubscriptionId};

/// A value plus the handlers interested in its changes.
///
/// Cloning a `Signal` yields another handle to the same cell. Platform
/// listeners hold a clone and write through it; the owning observer reads
/// through its own.
///
/// Writes from different threads are serialised together with their
/// notifications: handlers observe changes in the order they were stored.
/// A handler may write to its own signal; that nested change is delivered
/// before the outer dispatch continues.
///
/// # Examples
///
/// ```
/// use envsignal_lib::Signal;
///
/// let signal = Signal::new(false);
/// signal.subscribe(|online| println!("online: {online}"));
///
/// assert!(signal.set(true));
/// assert!(!signal.set(true));
/// assert!(signal.get());
/// ```
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

struct SignalInner<T> {
    /// Held from the store through the end of dispatch.
    notify: ReentrantMutex<()>,
    value: RwLock<T>,
    subscribers: CallbackRegistry<T>,
}

impl<T> Signal<T>
where
    T: Clone + PartialEq,
{
    /// Creates a signal holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                notify: ReentrantMutex::new(()),
                value: RwLock::new(initial),
                subscribers: CallbackRegistry::new(),
            }),
        }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Replaces the value and notifies subscribers.
    ///
    /// Setting a value equal to the current one is a no-op. Returns whether
    /// the value changed. Subscribers run after the value lock is released, but
    /// before any other writer can store a newer value.
    pub fn set(&self, value: T) -> bool {
        let _notify = self.inner.notify.lock();
        {
            let mut current = self.inner.value.write();
            if *current == value {
                return false;
            }
            current.clone_from(&value);
        }
        self.inner.subscribers.dispatch(&value);
        true
    }

    /// Applies `f` to a copy of the value and stores the result.
    ///
    /// The read and the write happen under one lock, so concurrent updates
    /// never interleave. Subscribers are notified only if the value changed.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let _notify = self.inner.notify.lock();
        let next = {
            let mut current = self.inner.value.write();
            let mut next = current.clone();
            f(&mut next);
            if *current == next {
                return false;
            }
            current.clone_from(&next);
            next
        };
        self.inner.subscribers.dispatch(&next);
        true
    }

    /// Registers a change handler.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.inner.subscribers.subscribe(handler)
    }

    /// Removes a change handler.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.unsubscribe(id)
    }

    /// Returns the number of registered change handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.callback_count()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.inner.value.read())
            .field("subscribers", &self.inner.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn set_notifies_only_on_change() {
        let signal = Signal::new(0_u32);
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        signal.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(signal.set(5));
        assert!(!signal.set(5));
        assert!(signal.set(6));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(signal.get(), 6);
    }

    #[test]
    fn handler_can_read_the_new_value() {
        let signal = Signal::new(String::from("a"));
        let seen = Arc::new(RwLock::new(String::new()));
        let reader = signal.clone();
        let seen_clone = seen.clone();
        signal.subscribe(move |_| {
            *seen_clone.write() = reader.get();
        });

        signal.set(String::from("b"));
        assert_eq!(*seen.read(), "b");
    }

    #[test]
    fn update_modifies_in_place() {
        let signal = Signal::new((1_u32, 2_u32));
        assert!(signal.update(|pair| pair.1 = 3));
        assert!(!signal.update(|pair| pair.1 = 3));
        assert_eq!(signal.get(), (1, 3));
    }

    #[test]
    fn clones_share_state() {
        let a = Signal::new(1_u8);
        let b = a.clone();
        b.set(2);
        assert_eq!(a.get(), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let signal = Signal::new(false);
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let id = signal.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(signal.unsubscribe(id));
        signal.set(true);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn concurrent_writes_notify_in_store_order() {
        use std::sync::mpsc;
        use std::time::Duration;

        let signal = Signal::new(0_u32);
        let notified = Arc::new(RwLock::new(Vec::new()));
        let (started_tx, started_rx) = mpsc::channel();

        let log = notified.clone();
        let started = parking_lot::Mutex::new(started_tx);
        signal.subscribe(move |value| {
            if *value == 1 {
                let _ = started.lock().send(());
                std::thread::sleep(Duration::from_millis(50));
            }
            log.write().push(*value);
        });

        let writer = signal.clone();
        let handle = std::thread::spawn(move || writer.set(1));
        started_rx.recv().unwrap();
        signal.set(2);
        handle.join().unwrap();

        assert_eq!(*notified.read(), vec![1, 2]);
        assert_eq!(signal.get(), 2);
    }

    #[test]
    fn handler_may_write_its_own_signal() {
        let signal = Signal::new(0_u32);
        let inner = signal.clone();
        signal.subscribe(move |value| {
            if *value == 1 {
                inner.set(2);
            }
        });

        signal.set(1);
        assert_eq!(signal.get(), 2);
    }
}
