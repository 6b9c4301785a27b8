// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery status observer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Observer;
use super::listeners::ListenerSet;
use crate::capabilities::Capability;
use crate::platform::{EventSource, Platform};
use crate::signal::Signal;
use crate::types::BatteryStatus;

/// Tracks battery charge level and charging state.
///
/// Capability gated: on hosts without a battery API the value stays at
/// `{ level: 1.0, charging: false }` forever and nothing is reported as an
/// error. Otherwise attach requests the battery manager; once it resolves,
/// the value is set and two listeners (level, charging) are registered,
/// each re-reading both fields.
///
/// A request that resolves after dispose is ignored.
pub struct BatteryObserver {
    platform: Arc<dyn Platform>,
    signal: Signal<BatteryStatus>,
    listeners: Arc<ListenerSet>,
    generation: Arc<AtomicU64>,
    attached: bool,
}

impl BatteryObserver {
    /// Creates the observer with the default status.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            listeners: Arc::new(ListenerSet::new(Arc::clone(&platform))),
            platform,
            signal: Signal::new(BatteryStatus::default()),
            generation: Arc::new(AtomicU64::new(0)),
            attached: false,
        }
    }
}

fn reread(platform: &dyn Platform, signal: &Signal<BatteryStatus>) {
    if let Some(status) = platform.battery_status()
        && signal.set(status)
    {
        tracing::trace!(level = %status.level, charging = status.charging, "Battery status changed");
    }
}

impl Observer for BatteryObserver {
    type Value = BatteryStatus;

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;

        if !self.platform.capabilities().supports(Capability::Battery) {
            tracing::debug!("Battery API not available, keeping default status");
            return;
        }

        let generation = Arc::clone(&self.generation);
        let requested_at = generation.load(Ordering::SeqCst);
        let platform = Arc::downgrade(&self.platform);
        let listeners = Arc::downgrade(&self.listeners);
        let signal = self.signal.clone();

        self.platform.request_battery(Box::new(move |result| {
            if generation.load(Ordering::SeqCst) != requested_at {
                tracing::trace!("Battery request settled after dispose, ignoring");
                return;
            }
            let status = match result {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(error = %e, "Battery status request failed");
                    return;
                }
            };
            signal.set(status);

            let Some(listeners) = listeners.upgrade() else {
                return;
            };
            for source in [EventSource::BatteryLevelChange, EventSource::BatteryChargingChange] {
                let platform = platform.clone();
                let signal = signal.clone();
                listeners.listen(source, move || {
                    if let Some(platform) = platform.upgrade() {
                        reread(&*platform, &signal);
                    }
                });
            }
            tracing::debug!(level = %status.level, charging = status.charging, "Battery status available");
        }));
        tracing::debug!("Battery observer attached");
    }

    fn dispose(&mut self) {
        if !self.attached {
            return;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        let removed = self.listeners.remove_all();
        self.attached = false;
        tracing::debug!(removed, "Battery observer disposed");
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn signal(&self) -> &Signal<BatteryStatus> {
        &self.signal
    }
}

impl Drop for BatteryObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::platform::SimulatedPlatform;
    use crate::types::BatteryLevel;

    fn status(level: f64, charging: bool) -> BatteryStatus {
        BatteryStatus::new(BatteryLevel::new(level).unwrap(), charging)
    }

    fn battery_host() -> SimulatedPlatform {
        SimulatedPlatform::new()
            .with_capabilities(Capabilities::all())
            .with_battery(status(0.5, true))
    }

    #[test]
    fn absent_capability_keeps_default() {
        let host = Arc::new(SimulatedPlatform::new().with_battery(status(0.2, true)));
        let mut observer = BatteryObserver::new(host.clone());
        observer.attach();

        host.set_battery_level(BatteryLevel::new(0.1).unwrap());
        assert_eq!(observer.current(), BatteryStatus::default());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn resolved_request_sets_status_and_listens() {
        let host = Arc::new(battery_host());
        let mut observer = BatteryObserver::new(host.clone());
        observer.attach();

        assert_eq!(observer.current(), status(0.5, true));
        assert_eq!(host.listener_count_for(&EventSource::BatteryLevelChange), 1);
        assert_eq!(host.listener_count_for(&EventSource::BatteryChargingChange), 1);

        host.set_battery_level(BatteryLevel::new(0.4).unwrap());
        assert_eq!(observer.current(), status(0.4, true));

        host.set_charging(false);
        assert_eq!(observer.current(), status(0.4, false));
    }

    #[test]
    fn rejected_request_keeps_default() {
        let host = Arc::new(battery_host().with_battery_rejection("denied"));
        let mut observer = BatteryObserver::new(host.clone());
        observer.attach();

        assert_eq!(observer.current(), BatteryStatus::default());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn deferred_resolution() {
        let host = Arc::new(battery_host().with_deferred_battery());
        let mut observer = BatteryObserver::new(host.clone());
        observer.attach();
        assert_eq!(observer.current(), BatteryStatus::default());

        host.resolve_battery();
        assert_eq!(observer.current(), status(0.5, true));
        assert_eq!(host.listener_count(), 2);
    }

    #[test]
    fn resolution_after_dispose_is_ignored() {
        let host = Arc::new(battery_host().with_deferred_battery());
        let mut observer = BatteryObserver::new(host.clone());
        observer.attach();
        observer.dispose();

        host.resolve_battery();
        assert_eq!(observer.current(), BatteryStatus::default());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn dispose_removes_change_listeners() {
        let host = Arc::new(battery_host());
        let mut observer = BatteryObserver::new(host.clone());
        observer.attach();
        observer.dispose();
        assert_eq!(host.listener_count(), 0);

        host.set_charging(false);
        assert_eq!(observer.current(), status(0.5, true));
    }

    #[test]
    fn reattach_requests_again() {
        let host = Arc::new(battery_host());
        let mut observer = BatteryObserver::new(host.clone());
        observer.attach();
        observer.dispose();
        observer.attach();

        host.set_charging(false);
        assert_eq!(observer.current(), status(0.5, false));
        assert_eq!(host.listener_count(), 2);
    }
}
