// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change subscriptions.
//!
//! Every observer exposes its value changes through a [`CallbackRegistry`].
//! Registering a handler returns a [`SubscriptionId`] that can later be
//! passed back to unsubscribe.
//!
//! ```
//! use envsignal_lib::subscription::CallbackRegistry;
//!
//! let registry = CallbackRegistry::<u32>::new();
//! let id = registry.subscribe(|width| println!("width is now {width}"));
//!
//! registry.dispatch(&1280);
//! assert!(registry.unsubscribe(id));
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
