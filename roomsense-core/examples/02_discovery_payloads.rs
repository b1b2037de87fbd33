//! Discovery Payload Example
//!
//! Prints the exact messages a device publishes to register its
//! channels with a home-automation hub, plus the state messages that
//! follow.
//!
//! ## What You'll Learn
//!
//! - The discovery topic scheme
//!   (`homeassistant/sensor/wled_<device>/<type>/config`)
//! - The registration JSON the hub consumes, including `unique_id`
//!   and the pass-through `value_template`
//! - The bare-decimal state messages on `wled/<type>`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_discovery_payloads
//! ```

use roomsense_core::errors::PublishError;
use roomsense_core::events::{DiscoveryRecord, SensorKind};
use roomsense_core::publish::{DeviceId, TelemetryPublisher};
use roomsense_core::traits::TelemetrySink;

/// Sink that keeps every message for printing
struct CapturingSink {
    messages: Vec<(String, Vec<u8>)>,
}

impl TelemetrySink for CapturingSink {
    fn is_connected(&self) -> bool {
        true
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), PublishError> {
        self.messages.push((topic.to_owned(), payload.to_vec()));
        Ok(())
    }
}

fn main() {
    println!("RoomSense Discovery Payload Example");
    println!("===================================\n");

    let device = DeviceId::from_mac([0x24, 0x6f, 0x28, 0x3c, 0x9a, 0x11]);
    println!("device id: {device}\n");

    let mut publisher = TelemetryPublisher::new(device);
    let mut sink = CapturingSink {
        messages: Vec::new(),
    };

    // What on_start sends for each channel
    for kind in [SensorKind::Motion, SensorKind::LightLevel] {
        publisher.publish_discovery(&mut sink, &DiscoveryRecord::for_kind(kind));
    }

    // What a motion edge and a light report look like afterwards
    publisher.publish_value(&mut sink, SensorKind::Motion, 1);
    publisher.publish_value(&mut sink, SensorKind::LightLevel, 330);

    for (topic, payload) in &sink.messages {
        println!("topic: {topic}");
        if topic.ends_with("/config") {
            let doc: serde_json::Value =
                serde_json::from_slice(payload).expect("registration payloads are JSON");
            let pretty =
                serde_json::to_string_pretty(&doc).expect("rendering parsed JSON cannot fail");
            println!("{pretty}\n");
        } else {
            println!("payload: {}\n", String::from_utf8_lossy(payload));
        }
    }

    println!("messages sent: {}", publisher.stats().sent);
}
