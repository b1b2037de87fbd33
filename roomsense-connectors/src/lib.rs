//! Telemetry Sinks for RoomSense
//!
//! ## Overview
//!
//! This crate provides transport implementations of the
//! [`TelemetrySink`](roomsense_core::traits::TelemetrySink) seam that
//! `roomsense-core` publishes through. The core stays transport-free;
//! everything that opens sockets lives here.
//!
//! ## Connection Model
//!
//! Sinks follow the core's liveness contract:
//!
//! - `is_connected()` is a cheap flag read, safe to call every tick
//! - `publish()` never blocks; a sink that cannot take the message
//!   right now returns an error instead of waiting
//! - The sensor module drops messages while the sink is offline, so
//!   sinks do not queue across outages on its behalf
//!
//! The MQTT sink splits into two halves: [`mqtt::MqttSink`] (handed to
//! the module) and [`mqtt::MqttEventPump`] (driven on a host thread,
//! where all socket I/O happens).
//!
//! ## Example Usage
//!
//! ```no_run
//! use roomsense_connectors::mqtt::{MqttSink, MqttSinkConfig};
//! use roomsense_core::traits::TelemetrySink;
//!
//! let config = MqttSinkConfig::new("broker.local", 1883)
//!     .client_id("wled-living-room")
//!     .credentials("wled", "secret");
//!
//! let (sink, pump) = MqttSink::connect(config)?;
//! std::thread::spawn(move || pump.run());
//!
//! // Hand `sink` to the host loop; it reports offline until the
//! // broker acknowledges the session
//! assert!(!sink.is_connected());
//! # Ok::<(), roomsense_connectors::mqtt::MqttSinkError>(())
//! ```

#[cfg(feature = "mqtt")]
pub mod mqtt;

// Re-export common types
#[cfg(feature = "mqtt")]
pub use mqtt::{MqttEventPump, MqttSink, MqttSinkConfig, MqttSinkError};

/// Connection statistics common to all sinks
#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages failed to send
    pub messages_failed: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Number of reconnections
    pub reconnections: u32,
    /// Last error message
    pub last_error: Option<String>,
}
