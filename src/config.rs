// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer configuration.
//!
//! Only two observers take configuration in their own right: the mobile
//! detector (breakpoint and fallback width) and the media query observer
//! (the query string). [`MonitorConfig`] bundles those with the device class
//! thresholds so an [`EnvironmentMonitor`](crate::monitor::EnvironmentMonitor)
//! can be configured from a single JSON document.
//!
//! ```
//! use envsignal_lib::config::MonitorConfig;
//!
//! let config = MonitorConfig::from_json(r#"{
//!     "mobile": { "breakpoint": 640 },
//!     "media_queries": ["(prefers-color-scheme: dark)"]
//! }"#).unwrap();
//!
//! assert_eq!(config.mobile.breakpoint, 640);
//! assert_eq!(config.device_class.tablet_min(), 768);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValueError};
use crate::types::DeviceClassThresholds;

/// Default mobile breakpoint in CSS pixels.
pub const DEFAULT_BREAKPOINT: u32 = 768;

/// Configuration of the [`MobileDetector`](crate::observer::MobileDetector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileConfig {
    /// Widths strictly below this value are mobile.
    #[serde(default = "default_breakpoint")]
    pub breakpoint: u32,

    /// Width reported before the first measurement when the host has no
    /// viewport.
    #[serde(default)]
    pub fallback_width: Option<u32>,
}

const fn default_breakpoint() -> u32 {
    DEFAULT_BREAKPOINT
}

impl Default for MobileConfig {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            fallback_width: None,
        }
    }
}

impl MobileConfig {
    /// Creates a configuration with the given breakpoint.
    #[must_use]
    pub const fn new(breakpoint: u32) -> Self {
        Self {
            breakpoint,
            fallback_width: None,
        }
    }

    /// Sets the breakpoint.
    #[must_use]
    pub const fn with_breakpoint(mut self, breakpoint: u32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Sets the fallback width.
    #[must_use]
    pub const fn with_fallback_width(mut self, width: u32) -> Self {
        self.fallback_width = Some(width);
        self
    }
}

/// Configuration of an [`EnvironmentMonitor`](crate::monitor::EnvironmentMonitor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Mobile detector settings.
    #[serde(default)]
    pub mobile: MobileConfig,

    /// Device class thresholds.
    #[serde(default)]
    pub device_class: DeviceClassThresholds,

    /// Media queries to observe, one observer each.
    #[serde(default)]
    pub media_queries: Vec<String>,
}

impl MonitorConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the document is malformed or holds
    /// out-of-order thresholds, and `ConfigError::Invalid` if a media query
    /// is empty or listed twice.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds a media query to observe.
    #[must_use]
    pub fn with_media_query(mut self, query: impl Into<String>) -> Self {
        self.media_queries.push(query.into());
        self
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyMediaQuery` if any query is blank and
    /// `ValueError::DuplicateMediaQuery` if a query appears twice.
    pub fn validate(&self) -> Result<(), ValueError> {
        let mut seen = HashSet::new();
        for query in &self.media_queries {
            if query.trim().is_empty() {
                return Err(ValueError::EmptyMediaQuery);
            }
            if !seen.insert(query.as_str()) {
                return Err(ValueError::DuplicateMediaQuery(query.clone()));
            }
        }
        Ok(())
    }
}
