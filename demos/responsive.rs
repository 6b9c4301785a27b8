// SPDX-License-Identifier: MPL-2.0

//! Demo program: follow a simulated window through a series of resizes.
//!
//! Prints the current width and whether the layout counts as mobile, then
//! dumps the full environment snapshot as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example responsive -- [breakpoint]
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=envsignal_lib=trace cargo run --example responsive -- 600
//! ```

use std::env;
use std::sync::Arc;

use envsignal_lib::config::{MobileConfig, MonitorConfig};
use envsignal_lib::observer::Observer;
use envsignal_lib::platform::SimulatedPlatform;
use envsignal_lib::types::{BatteryLevel, BatteryStatus, OrientationLockType};
use envsignal_lib::{Capabilities, EnvironmentMonitor, SignalEvent};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let breakpoint = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => envsignal_lib::config::DEFAULT_BREAKPOINT,
    };

    let host = Arc::new(
        SimulatedPlatform::new()
            .with_viewport(1280, 800)
            .with_capabilities(Capabilities::all())
            .with_battery(BatteryStatus::new(BatteryLevel::new(0.82)?, true)),
    );

    let config = MonitorConfig {
        mobile: MobileConfig::new(breakpoint),
        ..MonitorConfig::default()
    }
    .with_media_query("(prefers-color-scheme: dark)");

    let mut monitor = EnvironmentMonitor::new(host.clone(), config);
    let mut events = monitor.subscribe();

    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let SignalEvent::Mobile(state) = event {
                println!("Current width: {}px", state.width);
                println!("Is mobile: {}", if state.is_mobile { "Yes" } else { "No" });
            }
        }
    });

    monitor.attach();

    for (width, height) in [(1024, 768), (820, 1180), (390, 844), (1440, 900)] {
        host.resize(width, height);
    }
    host.touch_start();
    host.set_media_match("(prefers-color-scheme: dark)", true);
    monitor.orientation_lock().lock(OrientationLockType::Portrait);

    println!(
        "Device class: {}, orientation: {}",
        monitor.device_class().current(),
        monitor.orientation().current().as_str()
    );
    println!("{}", serde_json::to_string_pretty(&monitor.snapshot())?);

    // Dropping the monitor closes the last sender and ends the printer.
    drop(monitor);
    printer.await?;

    Ok(())
}
