//! Core storage functionality
//!
//! Target-independent logic: the parameter store and the logging macros it
//! reports through.

pub mod logging;
pub mod parameters;
