// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Screen orientation lock actions.

use std::sync::Arc;

use crate::capabilities::Capability;
use crate::platform::Platform;
use crate::types::OrientationLockType;

/// Locks and unlocks the screen orientation.
///
/// Not an observer: it holds no state and registers no listeners. Both
/// actions are no-ops on hosts without the capability, and a rejected lock
/// is logged, never returned. Failed locks are not retried.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use envsignal_lib::Capabilities;
/// use envsignal_lib::observer::OrientationLockControl;
/// use envsignal_lib::platform::SimulatedPlatform;
/// use envsignal_lib::types::OrientationLockType;
///
/// let host = Arc::new(SimulatedPlatform::new().with_capabilities(Capabilities::mobile_browser()));
/// let control = OrientationLockControl::new(host.clone());
///
/// control.lock(OrientationLockType::Portrait);
/// assert_eq!(host.locked_orientation(), Some(OrientationLockType::Portrait));
///
/// control.unlock();
/// assert_eq!(host.locked_orientation(), None);
/// ```
#[derive(Clone)]
pub struct OrientationLockControl {
    platform: Arc<dyn Platform>,
}

impl OrientationLockControl {
    /// Creates the control.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    /// Attempts to lock the screen to `orientation`.
    pub fn lock(&self, orientation: OrientationLockType) {
        if !self.platform.capabilities().supports(Capability::OrientationLock) {
            tracing::debug!(%orientation, "Orientation lock not available, ignoring");
            return;
        }
        self.platform.lock_orientation(
            orientation,
            Box::new(move |result| match result {
                Ok(()) => tracing::debug!(%orientation, "Orientation locked"),
                Err(e) => tracing::error!(%orientation, error = %e, "Orientation lock failed"),
            }),
        );
    }

    /// Attempts to release any orientation lock.
    pub fn unlock(&self) {
        if !self.platform.capabilities().supports(Capability::OrientationUnlock) {
            tracing::debug!("Orientation unlock not available, ignoring");
            return;
        }
        self.platform.unlock_orientation();
        tracing::debug!("Orientation unlocked");
    }
}

impl std::fmt::Debug for OrientationLockControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrientationLockControl")
            .field("capabilities", &self.platform.capabilities())
            .finish()
    }
}
