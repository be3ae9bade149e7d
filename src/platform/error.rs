//! Platform error types
//!
//! This module defines error types for backing-store operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All transport implementations map their driver-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// Backing store operation failed
    Storage(StorageError),
    /// Invalid configuration provided
    InvalidConfig,
}

/// Backing-store errors (EEPROM or Flash)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Erase operation failed
    EraseFailed,
    /// Write operation failed
    WriteFailed,
    /// Read operation failed
    ReadFailed,
    /// Invalid address (out of bounds or protected region)
    InvalidAddress,
    /// Region is not aligned to the erase unit
    Unaligned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::EraseFailed => write!(f, "erase failed"),
            StorageError::WriteFailed => write!(f, "write failed"),
            StorageError::ReadFailed => write!(f, "read failed"),
            StorageError::InvalidAddress => write!(f, "invalid address"),
            StorageError::Unaligned => write!(f, "unaligned region"),
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Storage(e) => write!(f, "Storage error: {}", e),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

impl From<StorageError> for PlatformError {
    fn from(error: StorageError) -> Self {
        PlatformError::Storage(error)
    }
}
