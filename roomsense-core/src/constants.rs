//! Constants for the RoomSense core
//!
//! Centralized, documented constants: configuration defaults for both
//! sensor channels, the light-model coefficients, and time conversions.
//! Always use these instead of magic numbers; when adding new constants,
//! reference the wiring or datasheet they come from.

use crate::traits::PinId;

// ===== PIR CHANNEL DEFAULTS =====

/// Default GPIO for the PIR signal line.
///
/// Source: reference devkit wiring (HC-SR501 OUT on GPIO12)
pub const DEFAULT_PIR_PIN: PinId = 12;

/// Default auto-off delay in seconds.
///
/// Motion is held "triggered" this long after the last rising edge;
/// matches the HC-SR501 single-trigger usage where the module itself
/// holds its output only a few seconds.
pub const DEFAULT_PIR_OFF_DELAY_SECS: u32 = 30;

// ===== LDR CHANNEL DEFAULTS =====

/// Default GPIO for the LDR divider tap.
///
/// Source: reference devkit wiring (GPIO33 is ADC1_CH5, usable with WiFi on)
pub const DEFAULT_LDR_PIN: PinId = 33;

/// Default ADC reference voltage (V).
///
/// Source: 3.3 V supply rail on ESP32-class boards
pub const DEFAULT_LDR_REFERENCE_VOLTS: f32 = 3.3;

/// Default ADC sample width in bits.
///
/// Source: ESP32 SAR ADC native resolution
pub const DEFAULT_LDR_ADC_BITS: u8 = 12;

/// Default fixed resistor in the divider (Ω).
pub const DEFAULT_LDR_RESISTOR_OHMS: u32 = 10_000;

/// Default additive lux calibration offset.
pub const DEFAULT_LDR_LUX_OFFSET: f32 = 0.0;

/// Default minimum lux change that gets reported.
///
/// Deltas at or below this are treated as ADC noise and suppressed.
pub const DEFAULT_LUX_DELTA_THRESHOLD: f32 = 10.0;

// ===== LIGHT MODEL =====

/// Photodiode responsivity calibration factor (lux per µA).
///
/// Sensor-specific and deliberately not configurable: reported values
/// are only comparable across devices while every unit applies the same
/// coefficient.
///
/// Source: GL55-series photoresistor divider calibration
pub const LUX_PER_MICROAMP: f32 = 2.0;

/// Microamps per amp, for the divider-current to lux conversion.
pub const MICROAMPS_PER_AMP: f32 = 1_000_000.0;

// ===== TIME CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;
