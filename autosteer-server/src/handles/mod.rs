pub mod index_handle;
pub mod session_handle;

pub use index_handle::*;
pub use session_handle::*;
