//! Platform abstraction layer
//!
//! Everything that touches the backing store lives here: the [`Transport`]
//! seam the parameter store talks to, a Flash adapter, and mock backends.

pub mod error;
pub mod flash_transport;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result, StorageError};
pub use flash_transport::FlashTransport;
pub use traits::{FlashInterface, FnTransport, Transport};
