//! Room sensing core for RoomSense
//!
//! PIR motion detection and LDR light-level measurement for
//! WLED-style LED controller firmware, publishing over MQTT with
//! home-automation hub auto-discovery.
//!
//! Key constraints:
//! - Owns no hardware, sockets, or threads; the host lends GPIO/ADC
//!   access and a telemetry sink through narrow traits
//! - `no_std` by default; settings JSON and telemetry formatting sit
//!   behind the `std` feature
//! - Every entry point is synchronous and non-blocking so the host
//!   loop stays responsive
//!
//! ```
//! use roomsense_core::{LightChannel, SensorConfig};
//!
//! // 12-bit ADC, 3.3 V reference, 10 kΩ divider resistor
//! let light = LightChannel::new(&SensorConfig::default());
//! assert_eq!(light.lux_from_raw(2048), 330);
//! ```
//!
//! The full polled lifecycle lives in [`module::SensorModule`]; the
//! runnable demos under `examples/` drive it against simulated
//! hardware.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod filter;
pub mod light;
#[cfg(feature = "std")]
pub mod module;
pub mod motion;
#[cfg(feature = "std")]
pub mod publish;
pub mod time;
pub mod traits;

// Public API
pub use config::{SensorConfig, MODULE_NAME};
pub use errors::PublishError;
pub use events::{DiscoveryRecord, SensorKind, TelemetryEvent};
pub use filter::exceeds_delta;
pub use light::LightChannel;
#[cfg(feature = "std")]
pub use module::SensorModule;
pub use motion::MotionChannel;
#[cfg(feature = "std")]
pub use publish::{DeviceId, PublishStats, TelemetryPublisher};
pub use time::{FixedTime, TimeSource, Timestamp};
#[cfg(feature = "std")]
pub use time::{MonotonicTime, SystemTime};
pub use traits::{PinId, PolledModule, SensorHal, TelemetrySink};

/// Crate version from Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
