// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitor coordinating every observer on one platform.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::MonitorConfig;
use crate::event::{EventBus, SignalEvent};
use crate::observer::{
    AccessibilityObserver, BatteryObserver, DeviceClassObserver, GeolocationObserver,
    MediaQueryObserver, MobileDetector, NetworkObserver, Observer, OrientationLockControl,
    OrientationObserver, PointerModalityObserver, PwaDetector, ScreenSizeObserver,
};
use crate::platform::Platform;
use crate::state::EnvironmentSnapshot;

/// Detaches one event forwarder.
type Unforward = Box<dyn FnOnce() + Send + Sync>;

/// Owns one instance of every observer for a platform.
///
/// The monitor attaches and disposes all observers together and republishes
/// every value change as a [`SignalEvent`] on its [`EventBus`]. Observers
/// stay independent: the monitor only forwards, it never feeds one
/// observer's value into another.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use envsignal_lib::EnvironmentMonitor;
/// use envsignal_lib::config::MonitorConfig;
/// use envsignal_lib::event::SignalEvent;
/// use envsignal_lib::platform::SimulatedPlatform;
/// use envsignal_lib::types::DeviceClass;
///
/// let host = Arc::new(SimulatedPlatform::new().with_viewport(1280, 800));
/// let mut monitor = EnvironmentMonitor::new(host.clone(), MonitorConfig::default());
/// monitor.attach();
///
/// let mut events = monitor.subscribe();
/// host.resize(800, 600);
///
/// let mut snapshot = monitor.snapshot();
/// assert_eq!(snapshot.device_class, DeviceClass::Tablet);
///
/// while let Ok(event) = events.try_recv() {
///     snapshot.apply(&event);
/// }
/// assert_eq!(snapshot, monitor.snapshot());
/// ```
pub struct EnvironmentMonitor {
    platform: Arc<dyn Platform>,
    config: MonitorConfig,
    mobile: MobileDetector,
    orientation: OrientationObserver,
    network: NetworkObserver,
    screen_size: ScreenSizeObserver,
    pointer: PointerModalityObserver,
    battery: BatteryObserver,
    geolocation: GeolocationObserver,
    device_class: DeviceClassObserver,
    media_queries: Vec<MediaQueryObserver>,
    accessibility: AccessibilityObserver,
    pwa: PwaDetector,
    orientation_lock: OrientationLockControl,
    event_bus: EventBus,
    forwarders: Vec<Unforward>,
    attached: bool,
}

/// Republishes every change of `observer` on `bus`.
fn forward<O, F>(observer: &O, bus: &EventBus, to_event: F) -> Unforward
where
    O: Observer,
    F: Fn(&O::Value) -> SignalEvent + Send + Sync + 'static,
{
    let bus = bus.clone();
    let id = observer.on_change(move |value| bus.publish(to_event(value)));
    let signal = observer.signal().clone();
    Box::new(move || {
        signal.unsubscribe(id);
    })
}

impl EnvironmentMonitor {
    /// Creates a monitor with every observer constructed but detached.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>, config: MonitorConfig) -> Self {
        Self::with_bus(platform, config, EventBus::new())
    }

    /// Creates a monitor publishing on an existing event bus.
    ///
    /// A media query listed more than once gets a single observer.
    #[must_use]
    pub fn with_bus(platform: Arc<dyn Platform>, config: MonitorConfig, event_bus: EventBus) -> Self {
        let media_queries = {
            let mut seen = HashSet::new();
            config
                .media_queries
                .iter()
                .filter(|query| {
                    let first = seen.insert(query.as_str());
                    if !first {
                        tracing::warn!(%query, "Duplicate media query ignored");
                    }
                    first
                })
                .map(|query| MediaQueryObserver::new(Arc::clone(&platform), query.as_str()))
                .collect()
        };

        Self {
            mobile: MobileDetector::new(Arc::clone(&platform), config.mobile),
            orientation: OrientationObserver::new(Arc::clone(&platform)),
            network: NetworkObserver::new(Arc::clone(&platform)),
            screen_size: ScreenSizeObserver::new(Arc::clone(&platform)),
            pointer: PointerModalityObserver::new(Arc::clone(&platform)),
            battery: BatteryObserver::new(Arc::clone(&platform)),
            geolocation: GeolocationObserver::new(Arc::clone(&platform)),
            device_class: DeviceClassObserver::with_thresholds(
                Arc::clone(&platform),
                config.device_class,
            ),
            media_queries,
            accessibility: AccessibilityObserver::new(Arc::clone(&platform)),
            pwa: PwaDetector::new(Arc::clone(&platform)),
            orientation_lock: OrientationLockControl::new(Arc::clone(&platform)),
            platform,
            config,
            event_bus,
            forwarders: Vec::new(),
            attached: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attaches every observer and starts forwarding changes.
    ///
    /// Forwarding starts before the observers attach, so values measured
    /// during attach are published too. Attaching twice does nothing.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;

        let bus = &self.event_bus;
        let mut forwarders = vec![
            forward(&self.mobile, bus, |v| SignalEvent::Mobile(*v)),
            forward(&self.orientation, bus, |v| SignalEvent::Orientation(*v)),
            forward(&self.network, bus, |v| SignalEvent::Network(*v)),
            forward(&self.screen_size, bus, |v| SignalEvent::ScreenSize(*v)),
            forward(&self.pointer, bus, |v| SignalEvent::Pointer(*v)),
            forward(&self.battery, bus, |v| SignalEvent::Battery(*v)),
            forward(&self.geolocation, bus, |v| SignalEvent::Geolocation(v.clone())),
            forward(&self.device_class, bus, |v| SignalEvent::DeviceClass(*v)),
            forward(&self.accessibility, bus, |v| SignalEvent::Accessibility(*v)),
            forward(&self.pwa, bus, |v| SignalEvent::Pwa(*v)),
        ];
        for observer in &self.media_queries {
            let query = observer.query().to_string();
            forwarders.push(forward(observer, bus, move |matches| {
                SignalEvent::media_query(query.clone(), *matches)
            }));
        }
        self.forwarders = forwarders;

        self.mobile.attach();
        self.orientation.attach();
        self.network.attach();
        self.screen_size.attach();
        self.pointer.attach();
        self.battery.attach();
        self.geolocation.attach();
        self.device_class.attach();
        for observer in &mut self.media_queries {
            observer.attach();
        }
        self.accessibility.attach();
        self.pwa.attach();

        tracing::debug!(
            media_queries = self.media_queries.len(),
            "Environment monitor attached"
        );
    }

    /// Stops forwarding and disposes every observer.
    ///
    /// Values keep their last state. Disposing a detached monitor does
    /// nothing.
    pub fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;

        for unforward in self.forwarders.drain(..) {
            unforward();
        }

        self.mobile.dispose();
        self.orientation.dispose();
        self.network.dispose();
        self.screen_size.dispose();
        self.pointer.dispose();
        self.battery.dispose();
        self.geolocation.dispose();
        self.device_class.dispose();
        for observer in &mut self.media_queries {
            observer.dispose();
        }
        self.accessibility.dispose();
        self.pwa.dispose();

        tracing::debug!("Environment monitor disposed");
    }

    /// Returns whether the monitor is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribes to signal events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SignalEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    /// Returns the event bus changes are published on.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Reads every observer's current value.
    #[must_use]
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            mobile: self.mobile.current(),
            orientation: self.orientation.current(),
            online: self.network.current(),
            viewport: self.screen_size.current(),
            touch: self.pointer.current(),
            battery: self.battery.current(),
            geolocation: self.geolocation.current(),
            device_class: self.device_class.current(),
            media_queries: self
                .media_queries
                .iter()
                .map(|observer| (observer.query().to_string(), observer.current()))
                .collect(),
            accessibility: self.accessibility.current(),
            pwa: self.pwa.current(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the platform the observers run on.
    #[must_use]
    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    /// Returns the configuration the monitor was built with.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Returns the mobile detector.
    #[must_use]
    pub fn mobile(&self) -> &MobileDetector {
        &self.mobile
    }

    /// Returns the orientation observer.
    #[must_use]
    pub fn orientation(&self) -> &OrientationObserver {
        &self.orientation
    }

    /// Returns the network observer.
    #[must_use]
    pub fn network(&self) -> &NetworkObserver {
        &self.network
    }

    /// Returns the screen size observer.
    #[must_use]
    pub fn screen_size(&self) -> &ScreenSizeObserver {
        &self.screen_size
    }

    /// Returns the pointer modality observer.
    #[must_use]
    pub fn pointer(&self) -> &PointerModalityObserver {
        &self.pointer
    }

    /// Returns the battery observer.
    #[must_use]
    pub fn battery(&self) -> &BatteryObserver {
        &self.battery
    }

    /// Returns the geolocation observer.
    #[must_use]
    pub fn geolocation(&self) -> &GeolocationObserver {
        &self.geolocation
    }

    /// Returns the device class observer.
    #[must_use]
    pub fn device_class(&self) -> &DeviceClassObserver {
        &self.device_class
    }

    /// Returns the observer for `query`, if it was configured.
    #[must_use]
    pub fn media_query(&self, query: &str) -> Option<&MediaQueryObserver> {
        self.media_queries
            .iter()
            .find(|observer| observer.query() == query)
    }

    /// Returns the accessibility observer.
    #[must_use]
    pub fn accessibility(&self) -> &AccessibilityObserver {
        &self.accessibility
    }

    /// Returns the PWA detector.
    #[must_use]
    pub fn pwa(&self) -> &PwaDetector {
        &self.pwa
    }

    /// Returns the orientation lock control.
    #[must_use]
    pub fn orientation_lock(&self) -> &OrientationLockControl {
        &self.orientation_lock
    }
}

impl Drop for EnvironmentMonitor {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for EnvironmentMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentMonitor")
            .field("config", &self.config)
            .field("attached", &self.attached)
            .field("subscribers", &self.event_bus.subscriber_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::platform::SimulatedPlatform;
    use crate::types::{DeviceClass, Orientation};

    fn monitor_on(host: &Arc<SimulatedPlatform>) -> EnvironmentMonitor {
        let config = MonitorConfig::default().with_media_query("(prefers-color-scheme: dark)");
        EnvironmentMonitor::new(host.clone(), config)
    }

    #[test]
    fn new_monitor_registers_nothing() {
        let host = Arc::new(SimulatedPlatform::new());
        let monitor = monitor_on(&host);

        assert!(!monitor.is_attached());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(monitor.device_class().current(), DeviceClass::Desktop);
    }

    #[test]
    fn attach_publishes_initial_measurements() {
        let host = Arc::new(SimulatedPlatform::new().with_viewport(390, 844));
        let mut monitor = monitor_on(&host);
        let mut events = monitor.subscribe();

        monitor.attach();

        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            received.push(event);
        }
        assert!(received.contains(&SignalEvent::DeviceClass(DeviceClass::Mobile)));
        assert!(received.iter().any(|e| matches!(e, SignalEvent::Mobile(s) if s.is_mobile)));
    }

    #[test]
    fn forwards_changes() {
        let host = Arc::new(SimulatedPlatform::new());
        let mut monitor = monitor_on(&host);
        monitor.attach();
        let mut events = monitor.subscribe();

        host.go_offline();
        host.set_media_match("(prefers-color-scheme: dark)", true);

        assert_eq!(events.try_recv().unwrap(), SignalEvent::Network(false));
        assert_eq!(
            events.try_recv().unwrap(),
            SignalEvent::media_query("(prefers-color-scheme: dark)", true)
        );
    }

    #[test]
    fn snapshot_reads_every_observer() {
        let host = Arc::new(
            SimulatedPlatform::new()
                .with_viewport(800, 1000)
                .with_user_agent("Mozilla/5.0 JAWS/2024"),
        );
        let mut monitor = monitor_on(&host);
        monitor.attach();

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.orientation, Orientation::Portrait);
        assert_eq!(snapshot.device_class, DeviceClass::Tablet);
        assert!(snapshot.accessibility.is_screen_reader);
        assert_eq!(snapshot.media_query("(prefers-color-scheme: dark)"), Some(false));
    }

    #[test]
    fn dispose_stops_everything() {
        let host = Arc::new(SimulatedPlatform::new().with_capabilities(Capabilities::all()));
        let mut monitor = monitor_on(&host);
        monitor.attach();
        assert!(host.listener_count() > 0);
        assert_eq!(host.watch_count(), 1);

        monitor.dispose();
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.watch_count(), 0);

        let mut events = monitor.subscribe();
        host.resize(300, 300);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn drop_disposes() {
        let host = Arc::new(SimulatedPlatform::new());
        let mut monitor = monitor_on(&host);
        monitor.attach();
        drop(monitor);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn media_query_lookup() {
        let host = Arc::new(SimulatedPlatform::new());
        let monitor = monitor_on(&host);
        assert!(monitor.media_query("(prefers-color-scheme: dark)").is_some());
        assert!(monitor.media_query("(hover: hover)").is_none());
    }

    #[test]
    fn duplicate_media_queries_share_one_observer() {
        let host = Arc::new(SimulatedPlatform::new());
        let config = MonitorConfig::default()
            .with_media_query("(hover: hover)")
            .with_media_query("(hover: hover)");
        let mut monitor = EnvironmentMonitor::new(host.clone(), config);
        monitor.attach();

        assert_eq!(
            host.listener_count_for(&crate::platform::EventSource::MediaChange(
                "(hover: hover)".into()
            )),
            1
        );
        assert_eq!(monitor.snapshot().media_queries.len(), 1);
    }
}
