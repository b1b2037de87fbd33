//! Debounced PIR motion tracking
//!
//! A PIR sensor line goes high while the hardware sees motion and drops
//! as soon as it stops. [`MotionChannel`] turns that raw line into a
//! stable boolean: edges report immediately, and a configurable auto-off
//! timer forces the state back to quiet after a period with no new
//! trigger. The timer is always measured from the most recent rising
//! edge, so flicker extends the hold instead of cutting it short.

use crate::config::SensorConfig;
use crate::constants::MS_PER_SECOND;
use crate::events::{SensorKind, TelemetryEvent};
use crate::time::Timestamp;
use crate::traits::PinId;

/// Debounced motion state with auto-off timer
///
/// Owned by the module instance and mutated once per tick; the host
/// samples the pin and feeds the raw level into [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct MotionChannel {
    enabled: bool,
    pin: PinId,
    off_delay_secs: u32,
    last_trigger: Timestamp,
    state: bool,
}

impl MotionChannel {
    /// Build the channel from persisted settings
    ///
    /// State starts quiet; the first raw `true` reading produces the
    /// initial triggered edge.
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            enabled: config.pir_enabled,
            pin: config.pir_pin,
            off_delay_secs: config.pir_off_secs,
            last_trigger: 0,
            state: false,
        }
    }

    /// Apply updated settings, keeping the runtime state
    ///
    /// The debounced state and trigger timestamp survive a settings
    /// reload; only the configuration fields change.
    pub fn reconfigure(&mut self, config: &SensorConfig) {
        self.enabled = config.pir_enabled;
        self.pin = config.pir_pin;
        self.off_delay_secs = config.pir_off_secs;
    }

    /// Whether the channel participates in ticks
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// GPIO carrying the PIR signal
    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// Current debounced state
    pub fn is_triggered(&self) -> bool {
        self.state
    }

    /// Advance the state machine with one raw pin sample
    ///
    /// Emits an event exactly when the debounced state changes: value 1
    /// on a rising edge, 0 on a falling edge or auto-off expiry. Returns
    /// nothing while the state holds, and always nothing when disabled.
    pub fn update(&mut self, raw_pin_state: bool, now: Timestamp) -> Option<TelemetryEvent> {
        if !self.enabled {
            return None;
        }

        if raw_pin_state != self.state {
            self.state = raw_pin_state;
            self.last_trigger = now;
            return Some(self.state_event());
        }

        // Auto-off: quiet for longer than the configured delay
        let hold_ms = u64::from(self.off_delay_secs) * MS_PER_SECOND;
        if self.state && now.saturating_sub(self.last_trigger) > hold_ms {
            self.state = false;
            return Some(self.state_event());
        }

        None
    }

    fn state_event(&self) -> TelemetryEvent {
        TelemetryEvent {
            kind: SensorKind::Motion,
            value: i32::from(self.state),
        }
    }
}

impl Default for MotionChannel {
    fn default() -> Self {
        Self::new(&SensorConfig::default())
    }
}
