// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic in-process host.
//!
//! [`SimulatedPlatform`] keeps every ambient value in memory and delivers
//! events only when one of its driver methods is called. It is the host used
//! by this crate's tests and demo, and it follows the same delivery rules a
//! browser does: one-shot listeners are removed before they run, removed
//! listeners never run, and no internal lock is held while a listener runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use super::{
    BatteryCallback, EventSource, Listener, ListenerId, ListenerOptions, LockCallback, Platform,
    PositionCallback, PositionErrorCallback, WatchId,
};
use crate::capabilities::{Capabilities, Capability};
use crate::error::PlatformError;
use crate::types::{
    BatteryLevel, BatteryStatus, OrientationLockType, Position, PositionError, Viewport,
};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

struct Registration {
    source: EventSource,
    listener: Listener,
    once: bool,
}

struct Watch {
    on_fix: PositionCallback,
    on_error: PositionErrorCallback,
}

#[derive(Debug)]
struct HostState {
    capabilities: Capabilities,
    viewport: Option<Viewport>,
    online: Option<bool>,
    user_agent: String,
    referrer: String,
    standalone: Option<bool>,
    media: HashMap<String, bool>,
    battery: BatteryStatus,
    battery_resolved: bool,
    defer_battery: bool,
    battery_rejection: Option<String>,
    lock_rejection: Option<String>,
    locked: Option<OrientationLockType>,
    lock_requests: usize,
    unlock_requests: usize,
}

/// In-memory host driven by explicit method calls.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use envsignal_lib::observer::{Observer, ScreenSizeObserver};
/// use envsignal_lib::platform::SimulatedPlatform;
/// use envsignal_lib::types::Viewport;
///
/// let host = Arc::new(SimulatedPlatform::new().with_viewport(1280, 720));
/// let mut screen = ScreenSizeObserver::new(host.clone());
/// screen.attach();
///
/// host.resize(390, 844);
/// assert_eq!(screen.current(), Viewport::new(390, 844));
/// ```
pub struct SimulatedPlatform {
    state: RwLock<HostState>,
    listeners: RwLock<BTreeMap<ListenerId, Registration>>,
    watches: RwLock<BTreeMap<WatchId, Watch>>,
    pending_battery: Mutex<Vec<BatteryCallback>>,
    next_id: AtomicU64,
}

impl SimulatedPlatform {
    /// Creates a 1024x768 online desktop host with no optional APIs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HostState {
                capabilities: Capabilities::none(),
                viewport: Some(Viewport::new(1024, 768)),
                online: Some(true),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                referrer: String::new(),
                standalone: None,
                media: HashMap::new(),
                battery: BatteryStatus::default(),
                battery_resolved: false,
                defer_battery: false,
                battery_rejection: None,
                lock_rejection: None,
                locked: None,
                lock_requests: 0,
                unlock_requests: 0,
            }),
            listeners: RwLock::new(BTreeMap::new()),
            watches: RwLock::new(BTreeMap::new()),
            pending_battery: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Sets the initial viewport.
    #[must_use]
    pub fn with_viewport(self, width: u32, height: u32) -> Self {
        self.state.write().viewport = Some(Viewport::new(width, height));
        self
    }

    /// Removes the viewport, as on a host that renders without a window.
    #[must_use]
    pub fn headless(self) -> Self {
        self.state.write().viewport = None;
        self
    }

    /// Sets the optional APIs the host exposes.
    #[must_use]
    pub fn with_capabilities(self, capabilities: Capabilities) -> Self {
        self.state.write().capabilities = capabilities;
        self
    }

    /// Sets the reported connectivity flag; `None` means "not reported".
    #[must_use]
    pub fn with_online(self, online: Option<bool>) -> Self {
        self.state.write().online = online;
        self
    }

    /// Sets the user agent string.
    #[must_use]
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        self.state.write().user_agent = user_agent.into();
        self
    }

    /// Sets the document referrer.
    #[must_use]
    pub fn with_referrer(self, referrer: impl Into<String>) -> Self {
        self.state.write().referrer = referrer.into();
        self
    }

    /// Sets the platform standalone flag.
    #[must_use]
    pub fn with_standalone_flag(self, standalone: bool) -> Self {
        self.state.write().standalone = Some(standalone);
        self
    }

    /// Sets the initial match state of a media query.
    #[must_use]
    pub fn with_media_match(self, query: impl Into<String>, matches: bool) -> Self {
        self.state.write().media.insert(query.into(), matches);
        self
    }

    /// Sets the battery state the battery API reports.
    #[must_use]
    pub fn with_battery(self, status: BatteryStatus) -> Self {
        self.state.write().battery = status;
        self
    }

    /// Holds battery requests until [`SimulatedPlatform::resolve_battery`].
    #[must_use]
    pub fn with_deferred_battery(self) -> Self {
        self.state.write().defer_battery = true;
        self
    }

    /// Makes battery requests fail with the given message.
    #[must_use]
    pub fn with_battery_rejection(self, message: impl Into<String>) -> Self {
        self.state.write().battery_rejection = Some(message.into());
        self
    }

    /// Makes orientation lock requests fail with the given message.
    #[must_use]
    pub fn with_lock_rejection(self, message: impl Into<String>) -> Self {
        self.state.write().lock_rejection = Some(message.into());
        self
    }

    // =========================================================================
    // Event drivers
    // =========================================================================

    /// Resizes the viewport and fires `resize`.
    pub fn resize(&self, width: u32, height: u32) -> usize {
        self.state.write().viewport = Some(Viewport::new(width, height));
        self.dispatch(&EventSource::Resize)
    }

    /// Marks the host offline and fires `offline`.
    pub fn go_offline(&self) -> usize {
        self.state.write().online = Some(false);
        self.dispatch(&EventSource::Offline)
    }

    /// Marks the host online and fires `online`.
    pub fn go_online(&self) -> usize {
        self.state.write().online = Some(true);
        self.dispatch(&EventSource::Online)
    }

    /// Fires `focus`.
    pub fn focus(&self) -> usize {
        self.dispatch(&EventSource::Focus)
    }

    /// Fires `touchstart`.
    pub fn touch_start(&self) -> usize {
        self.dispatch(&EventSource::TouchStart)
    }

    /// Fires `mousemove`.
    pub fn mouse_move(&self) -> usize {
        self.dispatch(&EventSource::MouseMove)
    }

    /// Replaces the user agent without firing anything.
    pub fn set_user_agent(&self, user_agent: impl Into<String>) {
        self.state.write().user_agent = user_agent.into();
    }

    /// Updates a media query and fires its change event if the match flipped.
    pub fn set_media_match(&self, query: &str, matches: bool) -> usize {
        let previous = self.state.write().media.insert(query.to_string(), matches);
        if previous.unwrap_or(false) == matches {
            return 0;
        }
        self.dispatch(&EventSource::MediaChange(query.to_string()))
    }

    /// Updates the battery level and fires `levelchange`.
    pub fn set_battery_level(&self, level: BatteryLevel) -> usize {
        self.state.write().battery.level = level;
        self.dispatch(&EventSource::BatteryLevelChange)
    }

    /// Updates the charging flag and fires `chargingchange`.
    pub fn set_charging(&self, charging: bool) -> usize {
        self.state.write().battery.charging = charging;
        self.dispatch(&EventSource::BatteryChargingChange)
    }

    /// Settles every deferred battery request. Returns how many settled.
    pub fn resolve_battery(&self) -> usize {
        let pending: Vec<BatteryCallback> = std::mem::take(&mut *self.pending_battery.lock());
        let count = pending.len();
        for on_ready in pending {
            on_ready(self.settle_battery());
        }
        count
    }

    /// Delivers a fix to every running position watch.
    pub fn push_position(&self, position: &Position) -> usize {
        let callbacks: Vec<PositionCallback> =
            self.watches.read().values().map(|w| w.on_fix.clone()).collect();
        for on_fix in &callbacks {
            on_fix(position.clone());
        }
        callbacks.len()
    }

    /// Delivers a failure to every running position watch.
    pub fn push_position_error(&self, error: &PositionError) -> usize {
        let callbacks: Vec<PositionErrorCallback> =
            self.watches.read().values().map(|w| w.on_error.clone()).collect();
        for on_error in &callbacks {
            on_error(error.clone());
        }
        callbacks.len()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Total number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Number of listeners registered for one source.
    #[must_use]
    pub fn listener_count_for(&self, source: &EventSource) -> usize {
        self.listeners
            .read()
            .values()
            .filter(|r| &r.source == source)
            .count()
    }

    /// Number of running position watches.
    #[must_use]
    pub fn watch_count(&self) -> usize {
        self.watches.read().len()
    }

    /// Number of battery requests waiting for [`SimulatedPlatform::resolve_battery`].
    #[must_use]
    pub fn pending_battery_requests(&self) -> usize {
        self.pending_battery.lock().len()
    }

    /// Orientation the screen is currently locked to.
    #[must_use]
    pub fn locked_orientation(&self) -> Option<OrientationLockType> {
        self.state.read().locked
    }

    /// Number of lock requests received, including rejected ones.
    #[must_use]
    pub fn lock_requests(&self) -> usize {
        self.state.read().lock_requests
    }

    /// Number of unlock requests received.
    #[must_use]
    pub fn unlock_requests(&self) -> usize {
        self.state.read().unlock_requests
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn dispatch(&self, source: &EventSource) -> usize {
        let targets: Vec<(ListenerId, Listener, bool)> = self
            .listeners
            .read()
            .iter()
            .filter(|(_, r)| &r.source == source)
            .map(|(id, r)| (*id, r.listener.clone(), r.once))
            .collect();

        tracing::trace!(%source, listeners = targets.len(), "Dispatching simulated event");

        let mut fired = 0;
        for (id, listener, once) in targets {
            // Claimed at invocation time, so a listener removed by an
            // earlier one in this dispatch never runs.
            let live = if once {
                self.listeners.write().remove(&id).is_some()
            } else {
                self.listeners.read().contains_key(&id)
            };
            if !live {
                continue;
            }
            listener();
            fired += 1;
        }
        fired
    }

    fn settle_battery(&self) -> Result<BatteryStatus, PlatformError> {
        let mut state = self.state.write();
        if let Some(message) = &state.battery_rejection {
            return Err(PlatformError::Rejected(message.clone()));
        }
        state.battery_resolved = true;
        Ok(state.battery)
    }
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimulatedPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedPlatform")
            .field("state", &*self.state.read())
            .field("listener_count", &self.listener_count())
            .field("watch_count", &self.watch_count())
            .finish_non_exhaustive()
    }
}

impl Platform for SimulatedPlatform {
    fn capabilities(&self) -> Capabilities {
        self.state.read().capabilities
    }

    fn viewport(&self) -> Option<Viewport> {
        self.state.read().viewport
    }

    fn online(&self) -> Option<bool> {
        self.state.read().online
    }

    fn user_agent(&self) -> String {
        self.state.read().user_agent.clone()
    }

    fn referrer(&self) -> String {
        self.state.read().referrer.clone()
    }

    fn standalone_flag(&self) -> Option<bool> {
        self.state.read().standalone
    }

    fn media_matches(&self, query: &str) -> bool {
        self.state.read().media.get(query).copied().unwrap_or(false)
    }

    fn add_listener(
        &self,
        source: EventSource,
        listener: Listener,
        options: ListenerOptions,
    ) -> ListenerId {
        let id = ListenerId::new(self.next_id());
        self.listeners.write().insert(
            id,
            Registration {
                source,
                listener,
                once: options.once,
            },
        );
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.write().remove(&id).is_some()
    }

    fn request_battery(&self, on_ready: BatteryCallback) {
        let (supported, deferred) = {
            let state = self.state.read();
            (state.capabilities.battery, state.defer_battery)
        };
        if !supported {
            on_ready(Err(PlatformError::CapabilityUnavailable(Capability::Battery)));
        } else if deferred {
            self.pending_battery.lock().push(on_ready);
        } else {
            on_ready(self.settle_battery());
        }
    }

    fn battery_status(&self) -> Option<BatteryStatus> {
        let state = self.state.read();
        state.battery_resolved.then_some(state.battery)
    }

    fn watch_position(&self, on_fix: PositionCallback, on_error: PositionErrorCallback) -> WatchId {
        let id = WatchId::new(self.next_id());
        self.watches.write().insert(id, Watch { on_fix, on_error });
        id
    }

    fn clear_watch(&self, id: WatchId) -> bool {
        self.watches.write().remove(&id).is_some()
    }

    fn lock_orientation(&self, orientation: OrientationLockType, on_settled: LockCallback) {
        let result = {
            let mut state = self.state.write();
            state.lock_requests += 1;
            if !state.capabilities.orientation_lock {
                Err(PlatformError::CapabilityUnavailable(Capability::OrientationLock))
            } else if let Some(message) = &state.lock_rejection {
                Err(PlatformError::Rejected(message.clone()))
            } else {
                state.locked = Some(orientation);
                Ok(())
            }
        };
        on_settled(result);
    }

    fn unlock_orientation(&self) {
        let mut state = self.state.write();
        state.unlock_requests += 1;
        state.locked = None;
    }
}
