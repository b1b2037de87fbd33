//! WLED Telemetry Example
//!
//! Complete host wiring: the sensor module from `roomsense-core`
//! publishing through a live MQTT session.
//!
//! ## What You'll Learn
//!
//! - Splitting the MQTT connection into a sink for the module and a
//!   pump thread for the socket
//! - Waiting on the liveness flag before registering with the hub
//! - Driving `on_tick` from a host loop with a monotonic clock
//!
//! ## Running the Example
//!
//! Expects a broker on localhost, for example:
//!
//! ```bash
//! mosquitto -v &
//! cargo run --example 01_wled_telemetry
//! ```
//!
//! Watch the messages with:
//!
//! ```bash
//! mosquitto_sub -t 'wled/#' -t 'homeassistant/#' -v
//! ```

use std::thread;
use std::time::Duration;

use roomsense_connectors::mqtt::{MqttSink, MqttSinkConfig};
use roomsense_core::module::SensorModule;
use roomsense_core::publish::DeviceId;
use roomsense_core::time::{MonotonicTime, TimeSource};
use roomsense_core::traits::{PinId, PolledModule, SensorHal, TelemetrySink};

/// Fake room wiring in place of real GPIO
struct DemoBoard {
    pir_high: bool,
    adc_counts: u16,
}

impl SensorHal for DemoBoard {
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("RoomSense WLED Telemetry Example");
    println!("================================\n");

    let config = MqttSinkConfig::new("localhost", 1883).client_id("roomsense-demo");
    let (mut sink, pump) = MqttSink::connect(config)?;
    let pump_handle = thread::spawn(move || pump.run());

    // Registration is dropped while the sink is offline, so give the
    // broker a moment to acknowledge the session first
    for _ in 0..20 {
        if sink.is_connected() {
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }
    println!(
        "broker {}\n",
        if sink.is_connected() {
            "connected"
        } else {
            "not reachable, messages will be dropped"
        }
    );

    let clock = MonotonicTime::new();
    let mut board = DemoBoard {
        pir_high: false,
        adc_counts: 120, // dark room
    };
    let mut module = SensorModule::new(DeviceId::from_mac([0x24, 0x6f, 0x28, 0x3c, 0x9a, 0x11]));

    module.on_start(&mut board, &mut sink);

    // Twenty ticks at 200 ms: motion between ticks 5 and 12, lights
    // come on at tick 10
    for tick in 0..20u32 {
        board.pir_high = (5..=12).contains(&tick);
        if tick >= 10 {
            board.adc_counts = 1_862; // about 300 lx
        }

        module.on_tick(&mut board, &mut sink, clock.now());
        thread::sleep(Duration::from_millis(200));
    }

    let mut report = String::new();
    module.write_status(&mut board, &mut report)?;
    println!("{report}");

    let publish_stats = module.publish_stats();
    let sink_stats = sink.stats();
    println!(
        "module: {} sent, {} dropped offline; sink: {} accepted, {} failed",
        publish_stats.sent,
        publish_stats.dropped_offline,
        sink_stats.messages_sent,
        sink_stats.messages_failed
    );

    sink.disconnect()?;
    pump_handle.join().expect("pump thread panicked");
    Ok(())
}
