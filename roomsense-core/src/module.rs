//! Room sensor module: motion and light level behind one polled surface
//!
//! [`SensorModule`] owns the two channels, the persisted configuration,
//! and the telemetry publisher, and wires them to the host through
//! [`PolledModule`]. The host calls [`on_start`](PolledModule::on_start)
//! once, then [`on_tick`](PolledModule::on_tick) from its main loop;
//! everything in between is synchronous and non-blocking.
//!
//! Startup registers both channels with the home-automation hub even
//! when one is disabled, so the hub entities exist ahead of the first
//! sample. Pin direction is set once at startup and only for enabled
//! channels; a channel enabled through a later configuration merge is
//! polled immediately but its pin is not reconfigured until restart.

use core::fmt;

use crate::config::{SensorConfig, MODULE_NAME};
use crate::events::{DiscoveryRecord, SensorKind};
use crate::light::LightChannel;
use crate::motion::MotionChannel;
use crate::publish::{DeviceId, PublishStats, TelemetryPublisher};
use crate::time::Timestamp;
use crate::traits::{PolledModule, SensorHal, TelemetrySink};

/// PIR motion and LDR light-level sensing as one host-polled module
///
/// Construction is infallible and does no I/O; all hardware and network
/// access happens inside the [`PolledModule`] entry points with
/// host-lent borrows.
pub struct SensorModule {
    config: SensorConfig,
    motion: MotionChannel,
    light: LightChannel,
    publisher: TelemetryPublisher,
}

impl SensorModule {
    /// Module with default configuration for the given device identity
    pub fn new(device: DeviceId) -> Self {
        Self::with_config(device, SensorConfig::default())
    }

    /// Module with an explicit starting configuration
    ///
    /// Hosts that load persisted settings before construction can pass
    /// the merged result here instead of calling
    /// [`apply_config`](PolledModule::apply_config) afterwards.
    pub fn with_config(device: DeviceId, config: SensorConfig) -> Self {
        Self {
            motion: MotionChannel::new(&config),
            light: LightChannel::new(&config),
            publisher: TelemetryPublisher::new(device),
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Motion channel state
    pub fn motion(&self) -> &MotionChannel {
        &self.motion
    }

    /// Light channel state
    pub fn light(&self) -> &LightChannel {
        &self.light
    }

    /// Publish outcome counters
    pub fn publish_stats(&self) -> &PublishStats {
        self.publisher.stats()
    }
}

impl PolledModule for SensorModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn on_start(&mut self, hal: &mut dyn SensorHal, sink: &mut dyn TelemetrySink) {
        if self.motion.enabled() {
            hal.configure_input(self.motion.pin());
        }
        if self.light.enabled() {
            hal.configure_input(self.light.pin());
        }

        // Registration is unconditional, pin setup is not
        self.publisher
            .publish_discovery(sink, &DiscoveryRecord::for_kind(SensorKind::Motion));
        self.publisher
            .publish_discovery(sink, &DiscoveryRecord::for_kind(SensorKind::LightLevel));
    }

    fn on_tick(&mut self, hal: &mut dyn SensorHal, sink: &mut dyn TelemetrySink, now: Timestamp) {
        if self.motion.enabled() {
            let raw = hal.digital_read(self.motion.pin());
            if let Some(event) = self.motion.update(raw, now) {
                self.publisher.publish_value(sink, event.kind, event.value);
            }
        }

        if self.light.enabled() {
            let raw = hal.analog_read(self.light.pin());
            if let Some(event) = self.light.sample(raw) {
                self.publisher.publish_value(sink, event.kind, event.value);
            }
        }
    }

    fn write_status(&self, hal: &mut dyn SensorHal, out: &mut dyn fmt::Write) -> fmt::Result {
        let motion_state = if self.motion.is_triggered() {
            "Triggered"
        } else {
            "Not Triggered"
        };
        writeln!(out, "PIR State: {motion_state}")?;

        if self.light.enabled() {
            let lux = self.light.lux_from_raw(hal.analog_read(self.light.pin()));
            writeln!(out, "LDR Value: {lux} lx")?;
        }
        Ok(())
    }

    fn apply_config(&mut self, root: &serde_json::Map<String, serde_json::Value>) -> bool {
        let found = self.config.merge_from(root);
        if !found {
            log::debug!("no {MODULE_NAME} section in settings, keeping current values");
        }

        self.motion.reconfigure(&self.config);
        self.light.reconfigure(&self.config);
        found
    }

    fn render_config(&self, root: &mut serde_json::Map<String, serde_json::Value>) {
        self.config.render_into(root);
    }
}
