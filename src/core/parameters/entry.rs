//! Entry types
//!
//! An entry is one persisted variable: its kind, its encoded size, the live
//! value and the default it falls back to when storage is unusable.

use super::config::MAX_ARRAY_LEN;
use super::error::{Result, StoreError};

/// Array payload (raw bytes, stored unmodified)
pub type ArrayBytes = heapless::Vec<u8, MAX_ARRAY_LEN>;

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    /// Unsigned 8-bit
    U8,
    /// Signed 8-bit
    I8,
    /// Unsigned 16-bit
    U16,
    /// Signed 16-bit
    I16,
    /// Unsigned 32-bit
    U32,
    /// Signed 32-bit
    I32,
    /// Fixed-length byte array
    Array,
}

impl EntryKind {
    /// Encoded payload size for scalar kinds, `None` for arrays
    pub const fn scalar_size(self) -> Option<usize> {
        match self {
            EntryKind::U8 | EntryKind::I8 => Some(1),
            EntryKind::U16 | EntryKind::I16 => Some(2),
            EntryKind::U32 | EntryKind::I32 => Some(4),
            EntryKind::Array => None,
        }
    }
}

/// Entry value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unsigned 8-bit
    U8(u8),
    /// Signed 8-bit
    I8(i8),
    /// Unsigned 16-bit
    U16(u16),
    /// Signed 16-bit
    I16(i16),
    /// Unsigned 32-bit
    U32(u32),
    /// Signed 32-bit
    I32(i32),
    /// Byte array
    Array(ArrayBytes),
}

impl Value {
    /// Build an array value from a slice
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidEntry` if `bytes` is longer than
    /// [`MAX_ARRAY_LEN`].
    pub fn array(bytes: &[u8]) -> Result<Self> {
        ArrayBytes::from_slice(bytes)
            .map(Value::Array)
            .map_err(|_| StoreError::InvalidEntry)
    }

    /// Get the value's kind
    pub fn kind(&self) -> EntryKind {
        match self {
            Value::U8(_) => EntryKind::U8,
            Value::I8(_) => EntryKind::I8,
            Value::U16(_) => EntryKind::U16,
            Value::I16(_) => EntryKind::I16,
            Value::U32(_) => EntryKind::U32,
            Value::I32(_) => EntryKind::I32,
            Value::Array(_) => EntryKind::Array,
        }
    }

    /// Encoded payload size in bytes
    pub fn size(&self) -> usize {
        match self {
            Value::Array(bytes) => bytes.len(),
            scalar => scalar.kind().scalar_size().unwrap_or(0),
        }
    }

    /// Get value as u8
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Value::U8(v) => Some(*v),
            _ => None,
        }
    }

    /// Get value as i8
    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Value::I8(v) => Some(*v),
            _ => None,
        }
    }

    /// Get value as u16
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Value::U16(v) => Some(*v),
            _ => None,
        }
    }

    /// Get value as i16
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Value::I16(v) => Some(*v),
            _ => None,
        }
    }

    /// Get value as u32
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get value as i32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get array bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Array(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }
}

/// Opaque handle returned by registration
///
/// Wraps the entry's registration index, which is also its position in
/// the on-storage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryHandle(pub(crate) u16);

impl EntryHandle {
    /// Registration index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Registered entry (definition and current value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry kind
    kind: EntryKind,
    /// Payload size in bytes (fixed at registration)
    size: usize,
    /// Current value
    value: Value,
    /// Fallback value
    default: Value,
}

impl Entry {
    /// Create an entry whose live value starts at `default`
    ///
    /// Scalar sizes come from the kind; array sizes from the default's length.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidEntry` for an empty array.
    pub fn new(default: Value) -> Result<Self> {
        let kind = default.kind();
        let size = match kind.scalar_size() {
            Some(size) => size,
            None => default.size(),
        };
        if size == 0 {
            return Err(StoreError::InvalidEntry);
        }
        Ok(Self {
            kind,
            size,
            value: default.clone(),
            default,
        })
    }

    /// Entry kind
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Payload size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// On-storage record length: checksum byte plus two payload copies
    pub fn record_len(&self) -> usize {
        1 + 2 * self.size
    }

    /// Current value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Fallback value
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Replace the current value
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TypeMismatch` if the kind differs or an array's
    /// length differs from the registered size.
    pub fn set(&mut self, value: Value) -> Result<()> {
        if value.kind() != self.kind || value.size() != self.size {
            return Err(StoreError::TypeMismatch);
        }
        self.value = value;
        Ok(())
    }

    /// Restore the default value
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    /// Store a value already known to match this entry
    pub(crate) fn restore(&mut self, value: Value) {
        debug_assert_eq!(value.kind(), self.kind);
        self.value = value;
    }
}
