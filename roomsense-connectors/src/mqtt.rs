//! MQTT Sink for RoomSense Telemetry
//!
//! ## Overview
//!
//! Implements the core's `TelemetrySink` over MQTT using `rumqttc`'s
//! synchronous client. State values go out as QoS 0 without retain:
//! telemetry here is a live broadcast, and a missed reading is
//! replaced by the next tick rather than redelivered.
//!
//! ## Design Decisions
//!
//! ### Split sink and pump
//!
//! `rumqttc` needs its event loop driven for any I/O to happen. The
//! host loop that ticks the sensor module must never block on a
//! socket, so the connection is split:
//!
//! - [`MqttSink`] holds the client handle and a shared liveness flag;
//!   `publish` only moves bytes into the client's bounded request
//!   queue
//! - [`MqttEventPump`] owns the network side and runs on a thread the
//!   host dedicates to it, updating the flag as the session comes and
//!   goes
//!
//! ### Reconnects
//!
//! The pump keeps iterating after connection errors; `rumqttc`
//! re-dials on the next poll. Between attempts the pump pauses briefly
//! so a dead broker does not turn into a busy loop. While the flag is
//! down the sensor module skips formatting entirely.
//!
//! ## Example Usage
//!
//! ```no_run
//! use roomsense_connectors::mqtt::{MqttSink, MqttSinkConfig};
//!
//! let config = MqttSinkConfig::new("192.168.1.10", 1883)
//!     .client_id("wled-bedroom")
//!     .keep_alive_secs(30);
//!
//! let (sink, pump) = MqttSink::connect(config)?;
//! let pump_handle = std::thread::spawn(move || pump.run());
//!
//! // ... tick the sensor module with `sink` ...
//!
//! sink.disconnect()?;
//! pump_handle.join().expect("pump thread panicked");
//! # Ok::<(), roomsense_connectors::mqtt::MqttSinkError>(())
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rumqttc::{Client, Connection, Event, MqttOptions, Packet, QoS};
use thiserror::Error;

use roomsense_core::errors::PublishError;
use roomsense_core::traits::TelemetrySink;

use crate::ConnectionStats;

/// Pause between reconnect attempts after a connection error
const RECONNECT_PAUSE: Duration = Duration::from_secs(1);

/// MQTT-specific errors
#[derive(Debug, Error)]
pub enum MqttSinkError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side request failure
    #[error("MQTT client error: {0}")]
    Client(String),
}

/// MQTT sink configuration
#[derive(Debug, Clone)]
pub struct MqttSinkConfig {
    /// Broker hostname or IP address
    pub broker_host: String,
    /// Broker port
    pub broker_port: u16,
    /// Client identifier presented to the broker
    pub client_id: String,
    /// Keep-alive interval
    pub keep_alive: Duration,
    /// Optional username/password pair
    pub credentials: Option<(String, String)>,
    /// Capacity of the outbound request queue
    pub channel_capacity: usize,
}

impl MqttSinkConfig {
    /// Create new configuration for a broker address
    pub fn new(broker_host: impl Into<String>, broker_port: u16) -> Self {
        Self {
            broker_host: broker_host.into(),
            broker_port,
            client_id: "roomsense".to_owned(),
            keep_alive: Duration::from_secs(30),
            credentials: None,
            channel_capacity: 16,
        }
    }

    /// Set the client identifier
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Set the keep-alive interval in seconds
    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive = Duration::from_secs(secs);
        self
    }

    /// Set username/password authentication
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Set the outbound queue capacity
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}

/// Telemetry sink backed by an MQTT session
///
/// Cheap to hand around: publishing moves bytes into a bounded queue
/// and the liveness flag is a single atomic read. All socket work
/// happens in the matching [`MqttEventPump`].
pub struct MqttSink {
    client: Client,
    connected: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
}

impl MqttSink {
    /// Create a sink and its event pump from a configuration
    ///
    /// No I/O happens here; the broker is dialed once the pump runs.
    /// The sink reports offline until the broker acknowledges the
    /// session.
    pub fn connect(config: MqttSinkConfig) -> Result<(Self, MqttEventPump), MqttSinkError> {
        if config.broker_host.is_empty() {
            return Err(MqttSinkError::Config("broker host must not be empty".into()));
        }
        if config.client_id.is_empty() {
            return Err(MqttSinkError::Config("client id must not be empty".into()));
        }
        if config.channel_capacity == 0 {
            return Err(MqttSinkError::Config(
                "outbound queue capacity must be at least 1".into(),
            ));
        }

        let mut options = MqttOptions::new(
            config.client_id,
            config.broker_host,
            config.broker_port,
        );
        options.set_keep_alive(config.keep_alive);
        if let Some((username, password)) = config.credentials {
            options.set_credentials(username, password);
        }

        let (client, connection) = Client::new(options, config.channel_capacity);
        let connected = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(Mutex::new(ConnectionStats::default()));

        let sink = Self {
            client,
            connected: Arc::clone(&connected),
            shutdown: Arc::clone(&shutdown),
            stats: Arc::clone(&stats),
        };
        let pump = MqttEventPump {
            connection,
            connected,
            shutdown,
            stats,
        };
        Ok((sink, pump))
    }

    /// Connection statistics snapshot
    pub fn stats(&self) -> ConnectionStats {
        self.stats.lock().unwrap().clone()
    }

    /// Request a clean session shutdown
    ///
    /// The pump exits once the disconnect makes it through the event
    /// loop; join its thread afterwards.
    pub fn disconnect(&self) -> Result<(), MqttSinkError> {
        self.shutdown.store(true, Ordering::Relaxed);
        self.client
            .disconnect()
            .map_err(|e| MqttSinkError::Client(e.to_string()))
    }
}

impl TelemetrySink for MqttSink {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), PublishError> {
        match self
            .client
            .try_publish(topic, QoS::AtMostOnce, false, payload)
        {
            Ok(()) => {
                let mut stats = self.stats.lock().unwrap();
                stats.messages_sent += 1;
                stats.bytes_sent += payload.len() as u64;
                Ok(())
            }
            Err(e) => {
                let mut stats = self.stats.lock().unwrap();
                stats.messages_failed += 1;
                stats.last_error = Some(e.to_string());
                log::warn!("mqtt publish to {topic} failed: {e}");
                Err(PublishError::Transport)
            }
        }
    }
}

/// Network half of an MQTT sink
///
/// [`run`](MqttEventPump::run) drives the session until
/// [`MqttSink::disconnect`] is called. Give it its own thread.
pub struct MqttEventPump {
    connection: Connection,
    connected: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
}

impl MqttEventPump {
    /// Drive the MQTT event loop
    ///
    /// Blocks the calling thread. Keeps the shared liveness flag in
    /// sync with the session and retries after connection errors with
    /// a short pause.
    pub fn run(mut self) {
        let mut sessions: u32 = 0;

        for notification in self.connection.iter() {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            match notification {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    sessions += 1;
                    if sessions > 1 {
                        self.stats.lock().unwrap().reconnections += 1;
                    }
                    self.connected.store(true, Ordering::Relaxed);
                    log::info!("mqtt session established ({sessions} total)");
                }
                Ok(Event::Incoming(Packet::Disconnect)) => {
                    self.connected.store(false, Ordering::Relaxed);
                    log::warn!("mqtt broker closed the session");
                }
                Ok(_) => {}
                Err(e) => {
                    self.connected.store(false, Ordering::Relaxed);
                    self.stats.lock().unwrap().last_error = Some(e.to_string());
                    log::warn!("mqtt connection error: {e}");
                    thread::sleep(RECONNECT_PAUSE);
                }
            }
        }

        self.connected.store(false, Ordering::Relaxed);
        log::debug!("mqtt event pump stopped");
    }
}
