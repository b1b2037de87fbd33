//! Simulated Room Example
//!
//! This example drives the full sensor module against a scripted room:
//! a PIR line that rises and falls as someone moves around, and an LDR
//! divider that follows the lighting.
//!
//! ## What You'll Learn
//!
//! - Wiring `SensorModule` to a host-owned HAL and telemetry sink
//! - How motion edges and the auto-off hold produce `wled/pir_sensor`
//!   messages
//! - How the lux delta threshold suppresses small light changes
//! - Reading the human-readable status report
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_room
//! ```

use roomsense_core::config::SensorConfig;
use roomsense_core::errors::PublishError;
use roomsense_core::module::SensorModule;
use roomsense_core::publish::DeviceId;
use roomsense_core::time::{FixedTime, TimeSource};
use roomsense_core::traits::{PinId, PolledModule, SensorHal, TelemetrySink};

/// Room state the host hardware would normally report
struct SimulatedRoom {
    pir_high: bool,
    adc_counts: u16,
}

impl SensorHal for SimulatedRoom {
    fn configure_input(&mut self, pin: PinId) {
        println!("[hal]  pin {pin} configured as input");
    }

    fn digital_read(&mut self, _pin: PinId) -> bool {
        self.pir_high
    }

    fn analog_read(&mut self, _pin: PinId) -> u16 {
        self.adc_counts
    }
}

/// Sink that prints every message instead of talking to a broker
struct ConsoleSink;

impl TelemetrySink for ConsoleSink {
    fn is_connected(&self) -> bool {
        true
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), PublishError> {
        println!("[mqtt] {topic} <- {}", String::from_utf8_lossy(payload));
        Ok(())
    }
}

fn main() {
    println!("RoomSense Simulated Room Example");
    println!("================================\n");

    // Shorten the motion hold from the default 30 s so the timer shows
    // up inside a short script
    let mut config = SensorConfig::default();
    config.pir_off_secs = 10;

    let mut hal = SimulatedRoom {
        pir_high: false,
        adc_counts: 120, // dark room, about 19 lx
    };
    let mut sink = ConsoleSink;
    let mut module = SensorModule::with_config(
        DeviceId::from_mac([0x24, 0x6f, 0x28, 0x3c, 0x9a, 0x11]),
        config,
    );

    println!("-- startup --");
    module.on_start(&mut hal, &mut sink);
    println!();

    // (time, PIR line, ADC counts, note). At the default divider the
    // counts convert to 19, 300, 305 and 315 lx.
    let timeline: &[(u64, bool, u16, &str)] = &[
        (1_000, false, 120, "dark and empty"),
        (5_000, true, 120, "someone walks in"),
        (8_000, true, 1_862, "lights on (300 lx)"),
        (12_000, false, 1_862, "PIR line drops"),
        (16_000, true, 1_893, "re-entry; 305 lx stays under the 10 lx gate"),
        (20_000, true, 1_893, "line held high"),
        (26_000, true, 1_893, "still held, hold window not over"),
        (26_500, true, 1_893, "10 s of quiet: auto-off takes over"),
        (27_000, false, 1_955, "line drops low; 315 lx clears the gate"),
    ];

    let mut clock = FixedTime::new(0);
    for &(at_ms, pir_high, adc_counts, note) in timeline {
        println!("-- t={:>6} ms: {note}", at_ms);
        clock.set(at_ms);
        hal.pir_high = pir_high;
        hal.adc_counts = adc_counts;
        module.on_tick(&mut hal, &mut sink, clock.now());
    }

    println!("\n-- status report --");
    let mut report = String::new();
    module
        .write_status(&mut hal, &mut report)
        .expect("writing to a String cannot fail");
    print!("{report}");

    let stats = module.publish_stats();
    println!("\nmessages sent: {}, dropped offline: {}", stats.sent, stats.dropped_offline);
}
