#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Frame is not a socket.io event (`42` prefix)
    #[error("Frame is not an event message")]
    NotAnEvent,

    #[error("Malformed event payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Event payload has no event name")]
    MissingEventName,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a number")]
    InvalidNumber { field: &'static str },

    /// Parsed to infinity or NaN
    #[error("Field {field} is not finite: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

pub type Result<T> = core::result::Result<T, ProtocolError>;
