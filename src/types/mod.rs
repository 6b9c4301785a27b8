// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the observers.
//!
//! Each type is a plain value: cheap to clone, comparable, and serialisable
//! so a UI layer can diff or forward it. Constrained types validate at
//! construction time.
//!
//! # Types
//!
//! - [`Viewport`] - Viewport dimensions in CSS pixels
//! - [`Orientation`] - Portrait or landscape, derived from a viewport
//! - [`DeviceClass`] - Mobile/tablet/desktop classification by width
//! - [`BatteryLevel`] - Charge fraction (0.0-1.0)
//! - [`Position`] - A geolocation fix
//! - [`OrientationLockType`] - Target of a screen orientation lock

mod battery;
mod device_class;
mod orientation_lock;
mod position;
mod viewport;

pub use battery::{BatteryLevel, BatteryStatus};
pub use device_class::{DeviceClass, DeviceClassThresholds};
pub use orientation_lock::OrientationLockType;
pub use position::{Coordinates, Position, PositionError, PositionErrorCode};
pub use viewport::{Orientation, Viewport};
