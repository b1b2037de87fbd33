//! Error types for the sensor core
//!
//! Exactly one failure boundary exists here: the telemetry sink. Sampling
//! and state transitions operate on already-sampled hardware values and
//! cannot fail.

use thiserror_no_std::Error;

/// Errors a telemetry sink may report when a publish is attempted
///
/// These never escape a tick. The publisher folds them into its counters
/// and drops the message; the next tick re-evaluates from current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The sink has no live broker connection
    #[error("telemetry sink is not connected")]
    NotConnected,

    /// The transport failed to accept the message
    #[error("telemetry transport failure")]
    Transport,

    /// Topic or payload exceeded the sink's buffer limits
    #[error("payload exceeds sink limits")]
    PayloadTooLarge,
}
