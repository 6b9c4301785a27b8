// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregated environment state.
//!
//! [`EnvironmentSnapshot`] holds one value per signal. It can be read from
//! a live [`EnvironmentMonitor`](crate::EnvironmentMonitor) or rebuilt by
//! folding [`SignalEvent`](crate::event::SignalEvent)s into it, for example
//! on the receiving end of an event bus.
//!
//! # Examples
//!
//! ```
//! use envsignal_lib::event::SignalEvent;
//! use envsignal_lib::state::EnvironmentSnapshot;
//!
//! let mut state = EnvironmentSnapshot::default();
//!
//! assert!(state.apply(&SignalEvent::Network(false)));
//! assert!(!state.online);
//!
//! // Applying the same value again reports no change
//! assert!(!state.apply(&SignalEvent::Network(false)));
//! ```

mod snapshot;

pub use snapshot::EnvironmentSnapshot;
