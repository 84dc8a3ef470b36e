//! Sensor event intake for the Hand-Wheel Controller.
//!
//! Whatever talks to the tracking device (a device callback, a replay of a
//! recorded session) pushes `SensorEvent`s into `SENSOR_CHANNEL`; the
//! `WheelController` is the only receiver.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use serde::{Deserialize, Serialize};

use crate::utils::tracking::Frame;

/// Channel used to receive sensor events (`SensorEvent` messages).
pub static SENSOR_CHANNEL: embassy_sync::channel::Channel<
    CriticalSectionRawMutex,
    SensorEvent,
    16,
> = embassy_sync::channel::Channel::new();

/// Device lifecycle and frame events.
///
/// Serialized as JSON with tag `"ev"`; a frame event carries the frame's
/// fields inline, e.g. `{"ev":"frame","id":7,"hands":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ev", rename_all = "snake_case")]
pub enum SensorEvent {
    /// Tracking device attached.
    Connect,
    /// Tracking device detached.
    Disconnect,
    /// A new tracking frame.
    Frame(Frame),
    /// The sensor session is over.
    Exit,
}

impl SensorEvent {
    /// Parse one line of a recorded session.
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
