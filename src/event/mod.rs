// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for signal changes.
//!
//! Each observer change can be republished as a [`SignalEvent`] on an
//! [`EventBus`]. The bus uses tokio's broadcast channel, so any number of
//! async consumers can follow the environment without touching observers
//! directly.
//!
//! # Examples
//!
//! ```
//! use envsignal_lib::event::{EventBus, SignalEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(SignalEvent::Network(false));
//! assert_eq!(rx.try_recv().unwrap(), SignalEvent::Network(false));
//! ```

mod event_bus;
mod signal_event;

pub use event_bus::EventBus;
pub use signal_event::SignalEvent;
