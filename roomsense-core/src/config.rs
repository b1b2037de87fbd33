//! Persisted settings for the sensor module
//!
//! The host keeps one settings document (a JSON object) shared by all of
//! its modules; this module owns the flat section keyed by
//! [`MODULE_NAME`]. Loading uses merge-on-read semantics: every field
//! present in the section overrides the in-memory value, every missing
//! field keeps it. A missing section is not an error, the defaults
//! simply stay in effect.

use crate::constants::{
    DEFAULT_LDR_ADC_BITS, DEFAULT_LDR_LUX_OFFSET, DEFAULT_LDR_PIN, DEFAULT_LDR_REFERENCE_VOLTS,
    DEFAULT_LDR_RESISTOR_OHMS, DEFAULT_LUX_DELTA_THRESHOLD, DEFAULT_PIR_OFF_DELAY_SECS,
    DEFAULT_PIR_PIN,
};
use crate::traits::PinId;

/// Section key this module owns in the persisted settings document
pub const MODULE_NAME: &str = "RoomSense";

/// Settings for both sensor channels
///
/// Doc comments give the persisted JSON key of each field.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorConfig {
    /// `PIRenabled`: motion channel on/off
    pub pir_enabled: bool,
    /// `PIRpin`: PIR signal GPIO
    pub pir_pin: PinId,
    /// `PIRoffSec`: auto-off delay in seconds
    pub pir_off_secs: u32,
    /// `LDRenable`: light channel on/off
    pub ldr_enabled: bool,
    /// `LDRpin`: LDR divider GPIO
    pub ldr_pin: PinId,
    /// `LDRReferenceVoltage`: ADC reference in volts
    pub ldr_reference_volts: f32,
    /// `LDRAdcPrecision`: ADC sample width in bits
    pub ldr_adc_bits: u8,
    /// `LDRResistorValue`: divider resistor in ohms
    pub ldr_resistor_ohms: u32,
    /// `LDRLuxOffset`: additive lux calibration
    pub ldr_lux_offset: f32,
    /// `luxDeltaThreshold`: minimum reported lux change
    pub lux_delta_threshold: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            pir_enabled: true,
            pir_pin: DEFAULT_PIR_PIN,
            pir_off_secs: DEFAULT_PIR_OFF_DELAY_SECS,
            ldr_enabled: true,
            ldr_pin: DEFAULT_LDR_PIN,
            ldr_reference_volts: DEFAULT_LDR_REFERENCE_VOLTS,
            ldr_adc_bits: DEFAULT_LDR_ADC_BITS,
            ldr_resistor_ohms: DEFAULT_LDR_RESISTOR_OHMS,
            ldr_lux_offset: DEFAULT_LDR_LUX_OFFSET,
            lux_delta_threshold: DEFAULT_LUX_DELTA_THRESHOLD,
        }
    }
}

#[cfg(feature = "std")]
impl SensorConfig {
    /// Merge this module's section from a loaded settings document
    ///
    /// Fields apply individually: a present, well-typed value that fits
    /// the field overrides, anything else keeps the current value.
    /// Returns false when the section itself is missing.
    pub fn merge_from(&mut self, root: &serde_json::Map<String, serde_json::Value>) -> bool {
        use serde_json::Value;

        let section = match root.get(MODULE_NAME) {
            Some(section) => section,
            None => return false,
        };

        if let Some(v) = section.get("PIRenabled").and_then(Value::as_bool) {
            self.pir_enabled = v;
        }
        if let Some(v) = section
            .get("PIRpin")
            .and_then(Value::as_u64)
            .and_then(|v| PinId::try_from(v).ok())
        {
            self.pir_pin = v;
        }
        if let Some(v) = section
            .get("PIRoffSec")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
        {
            self.pir_off_secs = v;
        }
        if let Some(v) = section.get("LDRenable").and_then(Value::as_bool) {
            self.ldr_enabled = v;
        }
        if let Some(v) = section
            .get("LDRpin")
            .and_then(Value::as_u64)
            .and_then(|v| PinId::try_from(v).ok())
        {
            self.ldr_pin = v;
        }
        if let Some(v) = section.get("LDRReferenceVoltage").and_then(Value::as_f64) {
            self.ldr_reference_volts = v as f32;
        }
        if let Some(v) = section
            .get("LDRAdcPrecision")
            .and_then(Value::as_u64)
            .and_then(|v| u8::try_from(v).ok())
        {
            self.ldr_adc_bits = v;
        }
        if let Some(v) = section
            .get("LDRResistorValue")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
        {
            self.ldr_resistor_ohms = v;
        }
        if let Some(v) = section.get("LDRLuxOffset").and_then(Value::as_f64) {
            self.ldr_lux_offset = v as f32;
        }
        if let Some(v) = section.get("luxDeltaThreshold").and_then(Value::as_f64) {
            self.lux_delta_threshold = v as f32;
        }

        true
    }

    /// Render the full settings section under the module key
    pub fn render_into(&self, root: &mut serde_json::Map<String, serde_json::Value>) {
        let section = serde_json::json!({
            "PIRenabled": self.pir_enabled,
            "PIRpin": self.pir_pin,
            "PIRoffSec": self.pir_off_secs,
            "LDRenable": self.ldr_enabled,
            "LDRpin": self.ldr_pin,
            "LDRReferenceVoltage": self.ldr_reference_volts,
            "LDRAdcPrecision": self.ldr_adc_bits,
            "LDRResistorValue": self.ldr_resistor_ohms,
            "LDRLuxOffset": self.ldr_lux_offset,
            "luxDeltaThreshold": self.lux_delta_threshold,
        });
        root.insert(MODULE_NAME.to_owned(), section);
    }
}
