//! Capability seams between the sensor core and its host
//!
//! The core owns no hardware, no network connection, and no loop. The
//! host firmware owns all three and lends them to the module through the
//! narrow traits here:
//!
//! - [`SensorHal`]: GPIO/ADC access primitives
//! - [`TelemetrySink`]: outbound message hand-off plus a read-only
//!   connection liveness flag
//! - [`PolledModule`]: the entry points the host scheduler invokes
//!
//! All three are object-safe so a host can hold heterogeneous modules
//! and swap hardware backends behind `&mut dyn` borrows.

use core::fmt;

use crate::errors::PublishError;
use crate::time::Timestamp;

/// GPIO pin identifier
pub type PinId = u8;

/// Hardware access primitives the host lends to the module
///
/// Implementations wrap the platform HAL (ESP-IDF, embedded-hal pins,
/// a test rig). Reads are assumed to always yield a valid sample; there
/// is no error path at this boundary.
///
/// ```
/// use roomsense_core::traits::{PinId, SensorHal};
///
/// struct BenchRig {
///     pir_high: bool,
/// }
///
/// impl SensorHal for BenchRig {
///     fn configure_input(&mut self, _pin: PinId) {}
///
///     fn digital_read(&mut self, _pin: PinId) -> bool {
///         self.pir_high
///     }
///
///     fn analog_read(&mut self, _pin: PinId) -> u16 {
///         2048
///     }
/// }
/// ```
pub trait SensorHal {
    /// Configure a pin as an input, once at startup
    fn configure_input(&mut self, pin: PinId);

    /// Sample a digital pin (PIR signal line)
    fn digital_read(&mut self, pin: PinId) -> bool;

    /// Sample an analog pin (LDR divider tap), raw ADC counts
    fn analog_read(&mut self, pin: PinId) -> u16;
}

/// Outbound telemetry hand-off
///
/// The sink owns connection management entirely. The core only checks
/// [`is_connected`](TelemetrySink::is_connected) before formatting a
/// message and hands the bytes over; it never connects, reconnects, or
/// retries.
pub trait TelemetrySink {
    /// Liveness of the underlying connection, read-only
    fn is_connected(&self) -> bool;

    /// Hand one message to the transport
    ///
    /// Must not block: a sink that cannot accept the message right now
    /// returns an error instead of waiting.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), PublishError>;
}

/// Entry points the host scheduler drives
///
/// The host owns the main loop and calls these synchronously; a module
/// never blocks, spawns, or schedules itself. Each tick runs to
/// completion before the host regains control.
pub trait PolledModule {
    /// Stable module name; also the section key in persisted settings
    fn name(&self) -> &'static str;

    /// One-time startup hook, called before the first tick
    fn on_start(&mut self, hal: &mut dyn SensorHal, sink: &mut dyn TelemetrySink);

    /// Periodic tick; `now` is the host's current millisecond timestamp
    fn on_tick(
        &mut self,
        hal: &mut dyn SensorHal,
        sink: &mut dyn TelemetrySink,
        now: Timestamp,
    );

    /// Append a human-readable status summary to a device report
    fn write_status(&self, hal: &mut dyn SensorHal, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Merge persisted settings into the running configuration
    ///
    /// Looks up the module's section by [`name`](PolledModule::name) and
    /// applies each field that is present, keeping current values for
    /// the rest. Returns false when the section is missing entirely.
    #[cfg(feature = "std")]
    fn apply_config(&mut self, root: &serde_json::Map<String, serde_json::Value>) -> bool;

    /// Render the full current configuration under the module's section
    /// key, for the host to persist
    #[cfg(feature = "std")]
    fn render_config(&self, root: &mut serde_json::Map<String, serde_json::Value>);
}
