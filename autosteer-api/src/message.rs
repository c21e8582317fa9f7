use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ProtocolError, Result};

/// `4` is the engine.io "message" packet, `2` the socket.io "event" packet.
pub const EVENT_PREFIX: &str = "42";

pub const TELEMETRY_EVENT: &str = "telemetry";
pub const STEER_EVENT: &str = "steer";
pub const MANUAL_EVENT: &str = "manual";

/// A decoded `42[...]` text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Event frame carrying `[name, data]`
    Event { name: String, data: Value },
    /// Event frame without usable data, the simulator is in manual mode
    Empty,
}

impl Frame {
    pub fn parse(text: &str) -> Result<Self> {
        if text.len() <= EVENT_PREFIX.len() || !text.starts_with(EVENT_PREFIX) {
            return Err(ProtocolError::NotAnEvent);
        }

        let Some(payload) = event_payload(text) else {
            return Ok(Frame::Empty);
        };

        let mut items = match serde_json::from_str::<Value>(payload)? {
            Value::Array(items) => items.into_iter(),
            _ => return Err(ProtocolError::MissingEventName),
        };

        let name = match items.next() {
            Some(Value::String(name)) => name,
            _ => return Err(ProtocolError::MissingEventName),
        };
        let data = items.next().unwrap_or(Value::Null);

        Ok(Frame::Event { name, data })
    }
}

/// Slice between the first `[` and the last `]`, or `None` when the frame
/// mentions `null` anywhere or has no brackets.
fn event_payload(text: &str) -> Option<&str> {
    if text.contains("null") {
        return None;
    }

    let start = text.find('[')?;
    let end = text.rfind(']')?;

    (start < end).then(|| &text[start..=end])
}

/// Per-tick readings sent by the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    /// Cross-track error
    pub cte: f64,
    pub speed: f64,
    /// Current steering angle in degrees
    pub steering_angle: f64,
}

impl Telemetry {
    /// Reads the telemetry object. Fields arrive as decimal strings from the
    /// simulator; plain JSON numbers are accepted as well.
    pub fn from_value(data: &Value) -> Result<Self> {
        Ok(Self {
            cte: number_field(data, "cte")?,
            speed: number_field(data, "speed")?,
            steering_angle: number_field(data, "steering_angle")?,
        })
    }
}

fn number_field(data: &Value, field: &'static str) -> Result<f64> {
    let value = match data.get(field) {
        None | Some(Value::Null) => return Err(ProtocolError::MissingField(field)),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ProtocolError::InvalidNumber { field })?,
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or(ProtocolError::InvalidNumber { field })?,
        Some(_) => return Err(ProtocolError::InvalidNumber { field }),
    };

    if !value.is_finite() {
        return Err(ProtocolError::NonFinite { field, value });
    }

    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteerCommand {
    /// Normalized steering input in `[-1, 1]`
    pub steering_angle: f64,
    pub throttle: f64,
}

/// Frames the server sends back to the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServerEvent {
    Steer(SteerCommand),
    /// Hand control back to the simulator's manual mode
    Manual,
}

impl ServerEvent {
    pub fn encode(&self) -> String {
        let payload = match self {
            ServerEvent::Steer(command) => json!([
                STEER_EVENT,
                {
                    "steering_angle": command.steering_angle,
                    "throttle": command.throttle,
                }
            ]),
            ServerEvent::Manual => json!([MANUAL_EVENT, {}]),
        };

        format!("{EVENT_PREFIX}{payload}")
    }
}
