pub mod buffers;
pub mod error;
pub mod glutils;
pub mod logging;
pub mod math;
pub mod shaders;
pub mod system;

pub use error::{BackendError, Result};
