// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `envsignal` Lib - Observers for ambient device and browser signals.
//!
//! This library exposes the runtime environment of a client as a set of
//! independent, reactive observers: viewport size and orientation,
//! connectivity, pointer modality, battery, geolocation, media queries,
//! a screen reader heuristic and installed-app detection. Each observer
//! holds a value, notifies handlers when it changes, and releases every
//! listener it registered when disposed.
//!
//! # Supported Signals
//!
//! - **Layout**: mobile breakpoint, orientation, viewport size, device class
//! - **Input**: touch vs. mouse pointer modality
//! - **Connectivity**: online/offline
//! - **Power**: battery level and charging (capability gated)
//! - **Location**: continuous position watch (capability gated)
//! - **Media**: arbitrary media queries, standalone display mode
//! - **Accessibility**: screen reader user agent heuristic
//! - **Actions**: screen orientation lock and unlock
//!
//! Observers talk to the host through the [`Platform`](platform::Platform)
//! trait. [`SimulatedPlatform`](platform::SimulatedPlatform) is a
//! deterministic implementation for tests and demos.
//!
//! # Quick Start
//!
//! ## A single observer
//!
//! ```
//! use std::sync::Arc;
//! use envsignal_lib::config::MobileConfig;
//! use envsignal_lib::observer::{MobileDetector, Observer};
//! use envsignal_lib::platform::SimulatedPlatform;
//!
//! let host = Arc::new(SimulatedPlatform::new().with_viewport(1280, 800));
//! let mut detector = MobileDetector::new(host.clone(), MobileConfig::default());
//! detector.attach();
//!
//! detector.on_change(|state| println!("{}px, mobile: {}", state.width, state.is_mobile));
//! host.resize(375, 667);
//! assert!(detector.current().is_mobile);
//!
//! detector.dispose();
//! assert_eq!(host.listener_count(), 0);
//! ```
//!
//! ## Every signal at once
//!
//! ```
//! use std::sync::Arc;
//! use envsignal_lib::{Capabilities, EnvironmentMonitor};
//! use envsignal_lib::config::MonitorConfig;
//! use envsignal_lib::platform::SimulatedPlatform;
//!
//! let host = Arc::new(SimulatedPlatform::new().with_capabilities(Capabilities::desktop_browser()));
//! let mut monitor = EnvironmentMonitor::new(host.clone(), MonitorConfig::default());
//! monitor.attach();
//!
//! let mut events = monitor.subscribe();
//! host.go_offline();
//!
//! let event = events.try_recv().unwrap();
//! println!("{}", serde_json::to_string(&event).unwrap());
//! assert!(!monitor.snapshot().online);
//! ```

mod capabilities;
pub mod config;
pub mod error;
pub mod event;
mod monitor;
pub mod observer;
pub mod platform;
mod signal;
pub mod state;
pub mod subscription;
pub mod types;

pub use capabilities::{Capabilities, CapabilitiesBuilder, Capability};
pub use config::{MobileConfig, MonitorConfig};
pub use error::{ConfigError, Error, PlatformError, Result, ValueError};
pub use event::{EventBus, SignalEvent};
pub use monitor::EnvironmentMonitor;
pub use observer::Observer;
pub use signal::Signal;
pub use state::EnvironmentSnapshot;
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use types::{
    BatteryLevel, BatteryStatus, DeviceClass, DeviceClassThresholds, Orientation,
    OrientationLockType, Position, PositionError, Viewport,
};
