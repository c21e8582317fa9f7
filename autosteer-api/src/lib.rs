pub mod error;
pub mod message;

pub use error::{ProtocolError, Result};
pub use message::*;
