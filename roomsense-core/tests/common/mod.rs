//! Common test utilities for integration tests
//!
//! This module provides:
//! - A scripted hardware stand-in with settable pin levels
//! - A recording telemetry sink with a switchable connection flag
//! - ADC count constants for known lux conversions at the default
//!   divider (3.3 V reference, 12-bit ADC, 10 kΩ)
//! - A step runner that drives a module tick-by-tick

#![allow(dead_code)]

use roomsense_core::errors::PublishError;
use roomsense_core::module::SensorModule;
use roomsense_core::publish::DeviceId;
use roomsense_core::time::Timestamp;
use roomsense_core::traits::{PinId, PolledModule, SensorHal, TelemetrySink};

/// Station MAC used across the integration suite
pub const TEST_MAC: [u8; 6] = [0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6];

/// ADC counts that convert to 300 lx at the default divider
pub const RAW_300_LX: u16 = 1862;
/// 305 lx: a 5 lx step, under the default 10 lx threshold
pub const RAW_305_LX: u16 = 1893;
/// 315 lx: a 15 lx step, over the default threshold
pub const RAW_315_LX: u16 = 1955;
/// 330 lx: the mid-scale reading (2048 counts)
pub const RAW_330_LX: u16 = 2048;
/// 359 lx
pub const RAW_359_LX: u16 = 2234;

/// Device identity used across the integration suite
pub fn test_device() -> DeviceId {
    DeviceId::from_mac(TEST_MAC)
}

/// Module with default configuration and the suite's device identity
pub fn fresh_module() -> SensorModule {
    SensorModule::new(test_device())
}

/// Hardware stand-in with directly settable pin levels
///
/// Tests mutate `pir_high` and `adc_counts` between ticks to script an
/// environment. Pin setup calls and read counts are recorded so tests
/// can assert which pins the module actually touched.
pub struct ScriptedHal {
    pub pir_high: bool,
    pub adc_counts: u16,
    pub configured_pins: Vec<PinId>,
    pub digital_reads: u32,
    pub analog_reads: u32,
}

impl ScriptedHal {
    pub fn new() -> Self {
        Self {
            pir_high: false,
            adc_counts: RAW_330_LX,
            configured_pins: Vec::new(),
            digital_reads: 0,
            analog_reads: 0,
        }
    }
}

impl SensorHal for ScriptedHal {
    fn configure_input(&mut self, pin: PinId) {
        self.configured_pins.push(pin);
    }

    fn digital_read(&mut self, _pin: PinId) -> bool {
        self.digital_reads += 1;
        self.pir_high
    }

    fn analog_read(&mut self, _pin: PinId) -> u16 {
        self.analog_reads += 1;
        self.adc_counts
    }
}

/// One captured publish call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub topic: String,
    pub payload: String,
}

/// Sink that records every accepted message
///
/// All wire payloads are UTF-8 (bare decimals and JSON), so they are
/// stored as strings for direct assertion.
pub struct RecordingSink {
    pub connected: bool,
    pub messages: Vec<Message>,
}

impl RecordingSink {
    pub fn online() -> Self {
        Self {
            connected: true,
            messages: Vec::new(),
        }
    }

    pub fn offline() -> Self {
        Self {
            connected: false,
            messages: Vec::new(),
        }
    }

    /// Payloads published to one topic, in order
    pub fn payloads_on(&self, topic: &str) -> Vec<String> {
        self.messages
            .iter()
            .filter(|message| message.topic == topic)
            .map(|message| message.payload.clone())
            .collect()
    }

    /// Topics seen so far, in order, duplicates kept
    pub fn topics(&self) -> Vec<String> {
        self.messages
            .iter()
            .map(|message| message.topic.clone())
            .collect()
    }
}

impl TelemetrySink for RecordingSink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), PublishError> {
        self.messages.push(Message {
            topic: topic.to_owned(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        });
        Ok(())
    }
}

/// Environment state presented to the module at one tick
pub struct Step {
    pub at_ms: Timestamp,
    pub pir_high: bool,
    pub adc_counts: u16,
}

impl Step {
    pub fn new(at_ms: Timestamp, pir_high: bool, adc_counts: u16) -> Self {
        Self {
            at_ms,
            pir_high,
            adc_counts,
        }
    }
}

/// Drive the module through a scripted sequence of ticks
pub fn run_steps(
    module: &mut SensorModule,
    hal: &mut ScriptedHal,
    sink: &mut RecordingSink,
    steps: &[Step],
) {
    for step in steps {
        hal.pir_high = step.pir_high;
        hal.adc_counts = step.adc_counts;
        module.on_tick(hal, sink, step.at_ms);
    }
}
