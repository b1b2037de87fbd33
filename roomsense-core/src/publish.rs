//! Telemetry formatting and hand-off
//!
//! Owns the wire contract and nothing else: connection management,
//! retries, and delivery confirmation all belong to the sink.
//!
//! ## Topics
//!
//! | Purpose | Topic | Payload |
//! |---------|-------|---------|
//! | State | `wled/<sensorType>` | bare decimal integer |
//! | Discovery | `homeassistant/sensor/wled_<device>/<sensorType>/config` | JSON registration object |
//!
//! `<device>` is the station MAC as 12 lowercase hex digits. Discovery
//! payloads carry `name`, `state_topic`, `unit_of_measurement`,
//! `unique_id`, `device_class` and a fixed pass-through
//! `value_template`, which is what home-automation hubs expect for
//! an auto-configured sensor entity.
//!
//! Both operations are silent no-ops while the sink reports no
//! connection: this is a live-state broadcast, not a durable log, and
//! the next tick re-evaluates from current state anyway.

use core::fmt::{self, Write as _};

use serde::Serialize;

use crate::errors::PublishError;
use crate::events::{DiscoveryRecord, SensorKind};
use crate::traits::TelemetrySink;

/// Topic root for hub auto-discovery registrations
const DISCOVERY_TOPIC_ROOT: &str = "homeassistant/sensor";

/// Prefix for state topics and device-scoped identifiers
const DEVICE_PREFIX: &str = "wled";

/// Fixed pass-through template for discovered entities
const VALUE_TEMPLATE: &str = "{{ value }}";

/// Device identity used in telemetry topics: the station MAC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId([u8; 6]);

impl DeviceId {
    /// Identity from the six MAC octets
    pub const fn from_mac(mac: [u8; 6]) -> Self {
        Self(mac)
    }
}

impl fmt::Display for DeviceId {
    // 12 lowercase hex digits, no separators
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Counters for publish outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishStats {
    /// Messages the sink accepted
    pub sent: u32,
    /// Messages dropped because the sink was offline
    pub dropped_offline: u32,
    /// Messages the transport failed to accept
    pub failed: u32,
    /// Most recent transport failure
    pub last_error: Option<PublishError>,
}

/// Registration object rendered into a discovery payload
#[derive(Serialize)]
struct DiscoveryPayload<'a> {
    name: &'a str,
    state_topic: &'a str,
    unit_of_measurement: &'a str,
    unique_id: &'a str,
    device_class: &'a str,
    value_template: &'a str,
}

/// Formats telemetry messages and hands them to a sink
///
/// Holds only the device identity and outcome counters; all messages
/// are built fresh per call into bounded buffers.
#[derive(Debug, Clone)]
pub struct TelemetryPublisher {
    device: DeviceId,
    stats: PublishStats,
}

impl TelemetryPublisher {
    /// Publisher for one device identity
    pub fn new(device: DeviceId) -> Self {
        Self {
            device,
            stats: PublishStats::default(),
        }
    }

    /// Outcome counters since construction
    pub fn stats(&self) -> &PublishStats {
        &self.stats
    }

    /// Register one channel with the home-automation hub
    ///
    /// Silent no-op while the sink is offline; registration is not
    /// queued or retried.
    pub fn publish_discovery(&mut self, sink: &mut dyn TelemetrySink, record: &DiscoveryRecord) {
        if !sink.is_connected() {
            log::debug!(
                "telemetry sink offline, dropping discovery for {}",
                record.kind.name()
            );
            self.stats.dropped_offline += 1;
            return;
        }

        match self.try_discovery(sink, record) {
            Ok(()) => self.stats.sent += 1,
            Err(err) => {
                log::warn!("discovery publish for {} failed: {}", record.kind.name(), err);
                self.stats.failed += 1;
                self.stats.last_error = Some(err);
            }
        }
    }

    /// Send one state value as a bare decimal string
    ///
    /// Same offline rule as discovery: dropped, not queued.
    pub fn publish_value(&mut self, sink: &mut dyn TelemetrySink, kind: SensorKind, value: i32) {
        if !sink.is_connected() {
            log::debug!("telemetry sink offline, dropping {} = {}", kind.name(), value);
            self.stats.dropped_offline += 1;
            return;
        }

        match Self::try_value(sink, kind, value) {
            Ok(()) => self.stats.sent += 1,
            Err(err) => {
                log::warn!("state publish for {} failed: {}", kind.name(), err);
                self.stats.failed += 1;
                self.stats.last_error = Some(err);
            }
        }
    }

    fn try_discovery(
        &self,
        sink: &mut dyn TelemetrySink,
        record: &DiscoveryRecord,
    ) -> Result<(), PublishError> {
        let kind = record.kind.name();

        let mut topic: heapless::String<128> = heapless::String::new();
        write!(
            topic,
            "{DISCOVERY_TOPIC_ROOT}/{DEVICE_PREFIX}_{}/{kind}/config",
            self.device
        )
        .map_err(|_| PublishError::PayloadTooLarge)?;

        let state_topic = Self::state_topic(record.kind)?;

        let mut unique_id: heapless::String<64> = heapless::String::new();
        write!(unique_id, "{DEVICE_PREFIX}_{}_{kind}", self.device)
            .map_err(|_| PublishError::PayloadTooLarge)?;

        let payload = DiscoveryPayload {
            name: record.display_name,
            state_topic: &state_topic,
            unit_of_measurement: record.unit,
            unique_id: &unique_id,
            device_class: kind,
            value_template: VALUE_TEMPLATE,
        };
        // Formatting failures count as oversize payloads
        let body = serde_json::to_string(&payload).map_err(|_| PublishError::PayloadTooLarge)?;

        sink.publish(&topic, body.as_bytes())
    }

    fn try_value(
        sink: &mut dyn TelemetrySink,
        kind: SensorKind,
        value: i32,
    ) -> Result<(), PublishError> {
        let topic = Self::state_topic(kind)?;

        let mut payload: heapless::String<16> = heapless::String::new();
        write!(payload, "{value}").map_err(|_| PublishError::PayloadTooLarge)?;

        sink.publish(&topic, payload.as_bytes())
    }

    fn state_topic(kind: SensorKind) -> Result<heapless::String<64>, PublishError> {
        let mut topic = heapless::String::new();
        write!(topic, "{DEVICE_PREFIX}/{}", kind.name())
            .map_err(|_| PublishError::PayloadTooLarge)?;
        Ok(topic)
    }
}
