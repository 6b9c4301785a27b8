// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host platform abstraction.
//!
//! Observers never talk to a browser or window system directly. They go
//! through the [`Platform`] trait, which exposes the ambient values they
//! read (viewport, connectivity flag, user agent, referrer, media query
//! matches) and the event sources they subscribe to.
//!
//! Listener registration returns a [`ListenerId`]; removing it must
//! guarantee the listener is never invoked again. Optional APIs (battery,
//! geolocation, orientation lock) are advertised through
//! [`Platform::capabilities`] and must not be called when absent.
//!
//! [`SimulatedPlatform`] is a deterministic in-process implementation for
//! tests, demos and hosts that want to feed events by hand.

mod simulated;

use std::fmt;
use std::sync::Arc;

use crate::capabilities::Capabilities;
use crate::error::PlatformError;
use crate::types::{BatteryStatus, OrientationLockType, Position, PositionError, Viewport};

pub use simulated::SimulatedPlatform;

/// Media query matching an installed app running in standalone display mode.
pub const STANDALONE_DISPLAY_MODE_QUERY: &str = "(display-mode: standalone)";

/// An event source an observer can listen to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventSource {
    /// The viewport was resized.
    Resize,
    /// Connectivity was restored.
    Online,
    /// Connectivity was lost.
    Offline,
    /// The window gained focus.
    Focus,
    /// A touch started anywhere in the window.
    TouchStart,
    /// The mouse moved anywhere in the window.
    MouseMove,
    /// The match state of the given media query changed.
    MediaChange(String),
    /// The battery charge level changed.
    BatteryLevelChange,
    /// The battery charging flag changed.
    BatteryChargingChange,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resize => f.write_str("resize"),
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
            Self::Focus => f.write_str("focus"),
            Self::TouchStart => f.write_str("touchstart"),
            Self::MouseMove => f.write_str("mousemove"),
            Self::MediaChange(query) => write!(f, "change({query})"),
            Self::BatteryLevelChange => f.write_str("levelchange"),
            Self::BatteryChargingChange => f.write_str("chargingchange"),
        }
    }
}

/// Options for a listener registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Remove the listener automatically after its first invocation.
    pub once: bool,
}

impl ListenerOptions {
    /// Options for a listener that fires on every event.
    #[must_use]
    pub const fn persistent() -> Self {
        Self { once: false }
    }

    /// Options for a listener that removes itself after firing once.
    #[must_use]
    pub const fn once() -> Self {
        Self { once: true }
    }
}

/// Handle for a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wraps a raw listener handle.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

/// Handle for a running position watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchId(u64);

impl WatchId {
    /// Wraps a raw watch handle.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

/// Event listener. Handlers re-read whatever platform state they need.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Called with every successful position fix of a watch.
pub type PositionCallback = Arc<dyn Fn(Position) + Send + Sync>;

/// Called with every failure of a watch.
pub type PositionErrorCallback = Arc<dyn Fn(PositionError) + Send + Sync>;

/// Called once when a battery request settles.
pub type BatteryCallback = Box<dyn FnOnce(Result<BatteryStatus, PlatformError>) + Send>;

/// Called once when an orientation lock request settles.
pub type LockCallback = Box<dyn FnOnce(Result<(), PlatformError>) + Send>;

/// The host an observer runs against.
///
/// Implementations must not hold internal locks while invoking listeners or
/// callbacks: handlers routinely call back into the platform.
pub trait Platform: Send + Sync {
    /// Optional APIs this host exposes.
    fn capabilities(&self) -> Capabilities;

    /// Current viewport, or `None` when there is no viewport (for example
    /// during server-side rendering).
    fn viewport(&self) -> Option<Viewport>;

    /// Connectivity flag, or `None` when the host does not report one.
    fn online(&self) -> Option<bool>;

    /// User agent string.
    fn user_agent(&self) -> String;

    /// Referrer of the current document.
    fn referrer(&self) -> String;

    /// Platform specific standalone flag (set by some mobile browsers when
    /// launched from the home screen), or `None` when not reported.
    fn standalone_flag(&self) -> Option<bool>;

    /// Whether the media query currently matches.
    fn media_matches(&self, query: &str) -> bool;

    /// Registers a listener for `source`.
    fn add_listener(
        &self,
        source: EventSource,
        listener: Listener,
        options: ListenerOptions,
    ) -> ListenerId;

    /// Removes a listener. Returns `false` if it was already gone (for
    /// instance a one-shot listener that already fired).
    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Requests the battery manager. `on_ready` is called exactly once,
    /// possibly later. Only valid when [`Capabilities::battery`] is set.
    fn request_battery(&self, on_ready: BatteryCallback);

    /// Re-reads the battery manager, once a request has resolved.
    fn battery_status(&self) -> Option<BatteryStatus>;

    /// Starts a continuous position watch. Only valid when
    /// [`Capabilities::geolocation`] is set.
    fn watch_position(&self, on_fix: PositionCallback, on_error: PositionErrorCallback) -> WatchId;

    /// Cancels a position watch. Returns `false` if it was not running.
    fn clear_watch(&self, id: WatchId) -> bool;

    /// Requests an orientation lock. `on_settled` is called exactly once.
    /// Only valid when [`Capabilities::orientation_lock`] is set.
    fn lock_orientation(&self, orientation: OrientationLockType, on_settled: LockCallback);

    /// Releases any orientation lock. Only valid when
    /// [`Capabilities::orientation_unlock`] is set.
    fn unlock_orientation(&self);
}
