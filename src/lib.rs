#![cfg_attr(not(test), no_std)]

//! nvparam - Redundant parameter persistence for EEPROM and Flash
//!
//! Stores a fixed set of typed entries (8/16/32-bit integers and byte arrays)
//! as checksummed, double-copy records behind a small header, restores them
//! on boot and rewrites only what changed.
//!
//! The crate is `no_std` and allocation-free. Storage access goes through
//! the [`platform::Transport`] trait, so any EEPROM driver or the provided
//! Flash emulation can back a store.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Platform abstraction layer (transports, Flash interface, mocks)
pub mod platform;

// Parameter store and logging
pub mod core;
