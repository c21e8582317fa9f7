mod registry;
mod session;
mod websocket;

pub use registry::*;
pub use session::*;
pub use websocket::*;
