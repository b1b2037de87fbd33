//! Integration tests for the polled sensor module
//!
//! Drives complete tick flows: scripted pin levels in, published
//! telemetry out, including hub registration, the motion hold window,
//! the light delta filter, and offline-sink behavior.

#![cfg(all(test, feature = "std"))]

mod common;

use proptest::prelude::*;
use serde_json::{json, Value};

use roomsense_core::config::SensorConfig;
use roomsense_core::filter::exceeds_delta;
use roomsense_core::light::LightChannel;
use roomsense_core::module::SensorModule;
use roomsense_core::motion::MotionChannel;
use roomsense_core::time::{FixedTime, TimeSource};
use roomsense_core::traits::PolledModule;

use common::{
    fresh_module, run_steps, test_device, RecordingSink, ScriptedHal, Step, RAW_300_LX,
    RAW_305_LX, RAW_315_LX, RAW_330_LX, RAW_359_LX,
};

const MOTION_TOPIC: &str = "wled/pir_sensor";
const LIGHT_TOPIC: &str = "wled/light_level";

/// Module with the light channel disabled, for motion-only scripts
fn motion_only_module() -> SensorModule {
    let mut config = SensorConfig::default();
    config.ldr_enabled = false;
    SensorModule::with_config(test_device(), config)
}

#[test]
fn startup_registers_both_channels_with_the_hub() {
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::online();
    let mut module = fresh_module();

    module.on_start(&mut hal, &mut sink);

    assert_eq!(hal.configured_pins, vec![12, 33]);
    assert_eq!(
        sink.topics(),
        vec![
            "homeassistant/sensor/wled_a1b2c3d4e5f6/pir_sensor/config",
            "homeassistant/sensor/wled_a1b2c3d4e5f6/light_level/config",
        ]
    );
}

#[test]
fn motion_pulse_publishes_edge_then_auto_off() {
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::online();
    let mut module = motion_only_module();
    module.on_start(&mut hal, &mut sink);
    sink.messages.clear();

    // Line goes high at 1 s and stays high; the hold window is 30 s
    let mut clock = FixedTime::new(1_000);
    hal.pir_high = true;
    module.on_tick(&mut hal, &mut sink, clock.now());

    clock.advance(14_000);
    module.on_tick(&mut hal, &mut sink, clock.now());

    // 30 s of quiet exactly is still within the hold
    clock.advance(16_000);
    module.on_tick(&mut hal, &mut sink, clock.now());
    assert_eq!(sink.payloads_on(MOTION_TOPIC), vec!["1"]);

    clock.advance(1);
    module.on_tick(&mut hal, &mut sink, clock.now());

    assert_eq!(sink.payloads_on(MOTION_TOPIC), vec!["1", "0"]);
    assert_eq!(hal.digital_reads, 4);
    assert_eq!(hal.analog_reads, 0);
}

#[test]
fn presence_cycle_publishes_every_transition() {
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::online();
    let mut module = motion_only_module();
    module.on_start(&mut hal, &mut sink);
    sink.messages.clear();

    // Enter, line drops, re-trigger, then leave for good
    run_steps(
        &mut module,
        &mut hal,
        &mut sink,
        &[
            Step::new(1_000, true, RAW_330_LX),
            Step::new(10_000, false, RAW_330_LX),
            Step::new(10_500, true, RAW_330_LX),
            Step::new(40_500, true, RAW_330_LX),
            Step::new(40_501, true, RAW_330_LX),
        ],
    );

    // The 10.5 s re-trigger restarts the hold, so auto-off lands at 40.501 s
    assert_eq!(sink.payloads_on(MOTION_TOPIC), vec!["1", "0", "1", "0"]);
    assert!(!module.motion().is_triggered());
}

#[test]
fn light_changes_pass_the_delta_filter() {
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::online();
    let mut module = fresh_module();
    module.on_start(&mut hal, &mut sink);
    sink.messages.clear();

    run_steps(
        &mut module,
        &mut hal,
        &mut sink,
        &[
            Step::new(1_000, false, RAW_300_LX),
            Step::new(2_000, false, RAW_305_LX),
            Step::new(3_000, false, RAW_315_LX),
        ],
    );

    // 305 lx is only 5 lx away from the last report and gets suppressed
    assert_eq!(sink.payloads_on(LIGHT_TOPIC), vec!["300", "315"]);
    assert_eq!(hal.analog_reads, 3);
}

#[test]
fn offline_sink_drops_messages_but_state_advances() {
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::offline();
    let mut module = fresh_module();

    module.on_start(&mut hal, &mut sink);
    run_steps(
        &mut module,
        &mut hal,
        &mut sink,
        &[Step::new(1_000, true, RAW_300_LX)],
    );

    // Two registrations, one edge, one light report: all dropped
    assert!(sink.messages.is_empty());
    assert_eq!(module.publish_stats().dropped_offline, 4);
    assert!(module.motion().is_triggered());

    // After reconnecting, 305 lx stays suppressed: the 300 lx baseline
    // was recorded while the sink was offline
    sink.connected = true;
    run_steps(
        &mut module,
        &mut hal,
        &mut sink,
        &[Step::new(2_000, true, RAW_305_LX)],
    );
    assert!(sink.messages.is_empty());

    run_steps(
        &mut module,
        &mut hal,
        &mut sink,
        &[Step::new(3_000, true, RAW_315_LX)],
    );
    assert_eq!(sink.payloads_on(LIGHT_TOPIC), vec!["315"]);
}

#[test]
fn disabled_channels_never_touch_the_hardware() {
    let mut config = SensorConfig::default();
    config.pir_enabled = false;
    config.ldr_enabled = false;
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::online();
    let mut module = SensorModule::with_config(test_device(), config);

    module.on_start(&mut hal, &mut sink);
    run_steps(
        &mut module,
        &mut hal,
        &mut sink,
        &[
            Step::new(1_000, true, RAW_300_LX),
            Step::new(2_000, false, RAW_315_LX),
        ],
    );

    assert!(hal.configured_pins.is_empty());
    assert_eq!(hal.digital_reads, 0);
    assert_eq!(hal.analog_reads, 0);
    // Hub registration still happens for both channels
    assert_eq!(sink.messages.len(), 2);
}

#[test]
fn status_report_reflects_live_readings() {
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::online();
    let mut module = fresh_module();
    module.on_start(&mut hal, &mut sink);

    hal.pir_high = true;
    hal.adc_counts = RAW_330_LX;
    module.on_tick(&mut hal, &mut sink, 1_000);

    let mut report = String::new();
    module.write_status(&mut hal, &mut report).unwrap();
    assert_eq!(report, "PIR State: Triggered\nLDR Value: 330 lx\n");
}

#[test]
fn merged_settings_change_hold_and_threshold_behavior() {
    let mut hal = ScriptedHal::new();
    let mut sink = RecordingSink::online();
    let mut module = fresh_module();
    module.on_start(&mut hal, &mut sink);
    sink.messages.clear();

    // Persist, tighten the hold to 5 s and widen the lux gate to 50
    let mut root = serde_json::Map::new();
    module.render_config(&mut root);
    let section = root
        .get_mut("RoomSense")
        .and_then(Value::as_object_mut)
        .unwrap();
    section.insert("PIRoffSec".to_owned(), json!(5));
    section.insert("luxDeltaThreshold".to_owned(), json!(50.0));
    assert!(module.apply_config(&root));

    run_steps(
        &mut module,
        &mut hal,
        &mut sink,
        &[
            Step::new(1_000, true, RAW_300_LX),
            Step::new(6_000, true, RAW_359_LX),
            Step::new(6_001, true, RAW_315_LX),
        ],
    );

    // Auto-off now lands just past 5 s of quiet
    assert_eq!(sink.payloads_on(MOTION_TOPIC), vec!["1", "0"]);
    // 300 and 359 clear the 50 lx gate, 315 (44 lx step) does not
    assert_eq!(sink.payloads_on(LIGHT_TOPIC), vec!["300", "359"]);
}

proptest! {
    /// Motion events always alternate: every publish is a real
    /// transition, starting from the idle state
    #[test]
    fn motion_events_strictly_alternate(
        steps in proptest::collection::vec((0u64..120_000, any::<bool>()), 1..200)
    ) {
        let mut channel = MotionChannel::new(&SensorConfig::default());
        let mut now = 0u64;
        let mut values = Vec::new();

        for (dt, level) in steps {
            now += dt;
            if let Some(event) = channel.update(level, now) {
                values.push(event.value);
            }
        }

        if let Some(first) = values.first() {
            prop_assert_eq!(*first, 1);
        }
        for pair in values.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }

    /// Every reported light level differs from the previous report by
    /// more than the threshold, whatever the raw sequence does
    #[test]
    fn reported_light_levels_always_clear_the_threshold(
        raws in proptest::collection::vec(any::<u16>(), 1..200)
    ) {
        let config = SensorConfig::default();
        let mut channel = LightChannel::new(&config);
        let mut reported: Vec<u16> = vec![0];

        for raw in raws {
            if let Some(event) = channel.sample(raw) {
                reported.push(event.value as u16);
            }
        }

        for pair in reported.windows(2) {
            prop_assert!(
                f32::from(pair[0].abs_diff(pair[1])) > config.lux_delta_threshold
            );
        }
    }

    /// The delta filter does not care which reading came first
    #[test]
    fn delta_filter_is_symmetric(
        a in any::<u16>(),
        b in any::<u16>(),
        threshold in 0.0f32..1_000.0
    ) {
        prop_assert_eq!(
            exceeds_delta(a, b, threshold),
            exceeds_delta(b, a, threshold)
        );
    }
}
