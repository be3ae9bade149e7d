//! Platform abstraction traits
//!
//! This module defines the traits that backing-store implementations must provide.

pub mod flash;
pub mod transport;

// Re-export trait interfaces
pub use flash::FlashInterface;
pub use transport::{FnTransport, Transport};
