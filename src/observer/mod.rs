// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observers over ambient platform signals.
//!
//! Every observer follows the same lifecycle:
//!
//! 1. **Construct** with a shared [`Platform`](crate::platform::Platform).
//!    The value starts at its documented initial state.
//! 2. [`Observer::attach`] registers the platform listeners and performs
//!    any eager measurement.
//! 3. The value changes only through those listeners. Each change is
//!    delivered to handlers registered with [`Observer::on_change`].
//! 4. [`Observer::dispose`] (or dropping the observer) removes every
//!    listener it registered, synchronously.
//!
//! Observers are independent of each other: none reads another's state.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use envsignal_lib::observer::{NetworkObserver, Observer};
//! use envsignal_lib::platform::SimulatedPlatform;
//!
//! let host = Arc::new(SimulatedPlatform::new());
//! let mut network = NetworkObserver::new(host.clone());
//! network.attach();
//!
//! network.on_change(|online| println!("online: {online}"));
//! host.go_offline();
//! assert!(!network.current());
//!
//! network.dispose();
//! assert_eq!(host.listener_count(), 0);
//! ```

mod accessibility;
mod battery;
mod device_class;
mod geolocation;
mod listeners;
mod media_query;
mod mobile;
mod network;
mod orientation;
mod orientation_lock;
mod pointer;
mod pwa;
mod screen_size;

pub use accessibility::{AccessibilityObserver, AccessibilityState, SCREEN_READER_MARKERS};
pub use battery::BatteryObserver;
pub use device_class::DeviceClassObserver;
pub use geolocation::{GEOLOCATION_UNSUPPORTED, GeolocationObserver, GeolocationState};
pub use media_query::MediaQueryObserver;
pub use mobile::{MobileDetector, MobileState};
pub use network::NetworkObserver;
pub use orientation::OrientationObserver;
pub use orientation_lock::OrientationLockControl;
pub use pointer::PointerModalityObserver;
pub use pwa::{ANDROID_APP_REFERRER, PwaDetector, PwaSignals};
pub use screen_size::ScreenSizeObserver;

use crate::signal::Signal;
use crate::subscription::SubscriptionId;

/// Common shape of every observer: a value, change notifications, and an
/// attach/dispose lifecycle.
pub trait Observer {
    /// Type of the observed value.
    type Value: Clone + PartialEq + Send + Sync + 'static;

    /// Registers platform listeners and takes any eager measurement.
    ///
    /// Attaching an attached observer does nothing.
    fn attach(&mut self);

    /// Removes every platform listener this observer registered.
    ///
    /// The value keeps its last state. Disposing a detached observer does
    /// nothing.
    fn dispose(&mut self);

    /// Returns whether the observer is currently attached.
    fn is_attached(&self) -> bool;

    /// Returns the signal holding the observed value.
    fn signal(&self) -> &Signal<Self::Value>;

    /// Returns the current value.
    fn current(&self) -> Self::Value {
        self.signal().get()
    }

    /// Registers a handler called with the new value after every change.
    fn on_change<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Self::Value) + Send + Sync + 'static,
    {
        self.signal().subscribe(handler)
    }

    /// Removes a handler registered with [`Observer::on_change`].
    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.signal().unsubscribe(id)
    }
}
