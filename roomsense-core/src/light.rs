//! Calibrated LDR light sensing
//!
//! The LDR sits in a voltage divider against a fixed resistor; the ADC
//! samples the tap. [`LightChannel`] models the divider to turn raw
//! counts into whole lux, then gates reporting on a minimum delta so
//! ADC noise does not flood the telemetry topic.

use crate::config::SensorConfig;
use crate::constants::{LUX_PER_MICROAMP, MICROAMPS_PER_AMP};
use crate::events::{SensorKind, TelemetryEvent};
use crate::filter;
use crate::traits::PinId;

/// Calibrated illuminance reader with delta-gated reporting
///
/// Owned by the module instance and mutated once per tick.
#[derive(Debug, Clone)]
pub struct LightChannel {
    enabled: bool,
    pin: PinId,
    reference_volts: f32,
    adc_bits: u8,
    resistor_ohms: f32,
    lux_offset: f32,
    delta_threshold: f32,
    last_reported_lux: u16,
}

impl LightChannel {
    /// Build the channel from persisted settings
    ///
    /// The last reported value starts at 0 lux, so the first sample in a
    /// lit room reports immediately.
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            enabled: config.ldr_enabled,
            pin: config.ldr_pin,
            reference_volts: config.ldr_reference_volts,
            // Shift and divisor safety
            adc_bits: config.ldr_adc_bits.clamp(1, 30),
            resistor_ohms: config.ldr_resistor_ohms.max(1) as f32,
            lux_offset: config.ldr_lux_offset,
            delta_threshold: config.lux_delta_threshold,
            last_reported_lux: 0,
        }
    }

    /// Apply updated settings, keeping the last reported value
    pub fn reconfigure(&mut self, config: &SensorConfig) {
        self.enabled = config.ldr_enabled;
        self.pin = config.ldr_pin;
        self.reference_volts = config.ldr_reference_volts;
        self.adc_bits = config.ldr_adc_bits.clamp(1, 30);
        self.resistor_ohms = config.ldr_resistor_ohms.max(1) as f32;
        self.lux_offset = config.ldr_lux_offset;
        self.delta_threshold = config.lux_delta_threshold;
    }

    /// Whether the channel participates in ticks
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// GPIO at the divider tap
    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// Convert one raw ADC sample to whole lux
    ///
    /// Divider model: counts scale to volts against the reference, volts
    /// over the fixed resistor give the photocurrent, and the current
    /// maps to lux through the responsivity coefficient plus the
    /// calibration offset.
    pub fn lux_from_raw(&self, raw_adc: u16) -> u16 {
        let volts = f32::from(raw_adc) * (self.reference_volts / (1u32 << self.adc_bits) as f32);
        // Single rounding step from volts to lux: dividing into amps
        // first lands 2048 counts at 329.99997 instead of 330.0
        let lux = volts * (MICROAMPS_PER_AMP * LUX_PER_MICROAMP) / self.resistor_ohms;
        // Truncates toward zero in range; saturates at the u16 bounds outside it
        (lux + self.lux_offset) as u16
    }

    /// Convert one sample and report it if it moved far enough
    ///
    /// The last reported value only advances when the delta gate opens,
    /// so slow drift accumulates until it finally crosses the threshold.
    pub fn sample(&mut self, raw_adc: u16) -> Option<TelemetryEvent> {
        if !self.enabled {
            return None;
        }

        let lux = self.lux_from_raw(raw_adc);
        if !filter::exceeds_delta(lux, self.last_reported_lux, self.delta_threshold) {
            return None;
        }

        self.last_reported_lux = lux;
        Some(TelemetryEvent {
            kind: SensorKind::LightLevel,
            value: i32::from(lux),
        })
    }
}

impl Default for LightChannel {
    fn default() -> Self {
        Self::new(&SensorConfig::default())
    }
}
