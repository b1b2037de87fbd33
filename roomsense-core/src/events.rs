//! Event and identity types shared by the sensor channels
//!
//! Two channels exist: debounced PIR motion and calibrated LDR light.
//! Channels produce [`TelemetryEvent`]s during a tick; the publisher
//! turns them into wire messages. [`DiscoveryRecord`]s carry the
//! registration metadata announced once at startup.

/// Sensor channels exposed by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SensorKind {
    /// Debounced PIR motion state (binary)
    Motion = 0,
    /// Calibrated LDR illuminance (lux)
    LightLevel = 1,
}

impl SensorKind {
    /// Wire name, used as the state-topic suffix and in unique ids
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Motion => "pir_sensor",
            Self::LightLevel => "light_level",
        }
    }

    /// Entity name shown by the home-automation hub
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Motion => "WLED PIR Sensor",
            Self::LightLevel => "WLED Light Level",
        }
    }

    /// Unit of measurement advertised at discovery ("" when unitless)
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Motion => "",
            Self::LightLevel => "lx",
        }
    }
}

/// A state change accepted for reporting
///
/// Ephemeral: produced by a channel during one tick and handed straight
/// to the publisher. Motion edges carry 1/0, light carries whole lux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryEvent {
    /// Channel that produced the value
    pub kind: SensorKind,
    /// Reported value
    pub value: i32,
}

impl TelemetryEvent {
    /// State-topic suffix for this event
    pub const fn topic_suffix(&self) -> &'static str {
        self.kind.name()
    }
}

/// Discovery registration metadata for one channel
///
/// Immutable: built once at startup and rendered into the registration
/// payload together with the device identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryRecord {
    /// Channel being registered
    pub kind: SensorKind,
    /// Entity name shown by the home-automation hub
    pub display_name: &'static str,
    /// Unit of measurement ("" when unitless)
    pub unit: &'static str,
}

impl DiscoveryRecord {
    /// Record with the channel's standard name and unit
    pub const fn for_kind(kind: SensorKind) -> Self {
        Self {
            kind,
            display_name: kind.display_name(),
            unit: kind.unit(),
        }
    }
}
