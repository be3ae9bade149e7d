//! Mock backing stores for testing
//!
//! In-memory EEPROM and Flash implementations used by unit tests and by
//! host-side integration tests without hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod eeprom;
mod flash;

pub use eeprom::MockEeprom;
pub use flash::MockFlash;
