// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `envsignal` library.
//!
//! Observers themselves never return errors: a missing platform capability
//! degrades to a fixed default and a failed platform operation is logged or
//! written into the observer's own error field. The types here cover the
//! fallible edges around them: constrained value construction,
//! configuration parsing, and host-reported failures.

use thiserror::Error;

use crate::capabilities::Capability;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while loading configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The host platform reported a failure.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A battery level outside the `[0, 1]` fraction range.
    #[error("battery level {0} is out of range [0, 1]")]
    InvalidBatteryLevel(f64),

    /// Device class thresholds where the tablet bound does not precede the
    /// desktop bound.
    #[error("tablet threshold {tablet_min} must be below desktop threshold {desktop_min}")]
    ThresholdOrder {
        /// Smallest width classified as tablet.
        tablet_min: u32,
        /// Smallest width classified as desktop.
        desktop_min: u32,
    },

    /// An empty media query string.
    #[error("media query must not be empty")]
    EmptyMediaQuery,

    /// The same media query listed more than once.
    #[error("media query {0:?} is listed more than once")]
    DuplicateMediaQuery(String),
}

/// Errors reported by the host platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform does not expose the requested capability.
    #[error("{0} is not supported on this platform")]
    CapabilityUnavailable(Capability),

    /// The platform rejected the request.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Errors related to configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The parsed configuration contains an invalid value.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValueError),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
