//! Parameter store error types
//!
//! An `Err` from `load`, `sync` or `sync_entry` is the fatal outcome: the
//! operation stopped and later entries were not touched.

use crate::platform::PlatformError;
use core::fmt;

/// Result type for parameter store operations
pub type Result<T> = core::result::Result<T, StoreError>;

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Transport read or write failed
    Platform(PlatformError),
    /// Record read back after a write did not match what was written
    VerifyFailed {
        /// Registration index of the entry
        index: usize,
    },
    /// Header read back after a write did not match the entry count
    HeaderVerifyFailed,
    /// Error handler vetoed continuation
    Aborted {
        /// Registration index of the entry
        index: usize,
    },
    /// Handle does not belong to this registry
    UnknownEntry,
    /// Value kind or array length does not match the entry
    TypeMismatch,
    /// Array entry is empty or exceeds the record buffer
    InvalidEntry,
    /// Registry already holds the maximum number of entries
    RegistryFull,
    /// `mem_start` is not below `mem_end`
    InvalidRange,
    /// Header plus records do not fit in `[mem_start, mem_end)`
    LayoutOverflow {
        /// First address past the last record
        required_end: u64,
        /// Configured end of the region
        mem_end: u32,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Platform(e) => write!(f, "transport failure: {}", e),
            StoreError::VerifyFailed { index } => {
                write!(f, "entry {} failed write verification", index)
            }
            StoreError::HeaderVerifyFailed => write!(f, "header failed write verification"),
            StoreError::Aborted { index } => write!(f, "aborted by error handler at entry {}", index),
            StoreError::UnknownEntry => write!(f, "unknown entry handle"),
            StoreError::TypeMismatch => write!(f, "value does not match entry type"),
            StoreError::InvalidEntry => write!(f, "invalid entry size"),
            StoreError::RegistryFull => write!(f, "entry registry full"),
            StoreError::InvalidRange => write!(f, "mem_start must be below mem_end"),
            StoreError::LayoutOverflow {
                required_end,
                mem_end,
            } => write!(
                f,
                "layout ends at {:#x}, past mem_end {:#x}",
                required_end, mem_end
            ),
        }
    }
}

impl From<PlatformError> for StoreError {
    fn from(e: PlatformError) -> Self {
        StoreError::Platform(e)
    }
}
