//! On-storage record format
//!
//! One record per entry:
//!
//! ```text
//! [checksum: 1][copy A: size][copy B: size]
//! ```
//!
//! The checksum covers both copies. A record is intact only when the
//! checksum matches and the copies are byte-identical.

use super::checksum::Checksum;
use super::config::MAX_RECORD_LEN;
use super::entry::{EntryKind, Value};
use super::wire;

/// Encoded record, built in a buffer owned by the caller's stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    bytes: heapless::Vec<u8, MAX_RECORD_LEN>,
}

impl Record {
    /// Encode `value` into a checksummed, redundant record
    pub fn encode<C: Checksum + ?Sized>(value: &Value, checksum: &C) -> Self {
        let size = value.size();
        let mut bytes: heapless::Vec<u8, MAX_RECORD_LEN> = heapless::Vec::new();
        // Entry registration caps size at MAX_ARRAY_LEN
        bytes.resize(1 + 2 * size, 0).ok();

        let (copy_a, copy_b) = bytes[1..].split_at_mut(size);
        wire::to_wire(value, copy_a);
        copy_b.copy_from_slice(copy_a);
        let crc = checksum.checksum(&bytes[1..]);
        bytes[0] = crc;

        Self { bytes }
    }

    /// Raw record bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Record length
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the record is empty (never true for a registered entry)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Check a raw record read from storage
///
/// Both conditions must hold: the checksum over the payload matches the
/// stored byte, and copy A equals copy B.
pub fn is_intact<C: Checksum + ?Sized>(raw: &[u8], checksum: &C) -> bool {
    let Some((&stored, payload)) = raw.split_first() else {
        return false;
    };
    if payload.len() % 2 != 0 {
        return false;
    }
    let (copy_a, copy_b) = payload.split_at(payload.len() / 2);
    checksum.checksum(payload) == stored && copy_a == copy_b
}

/// Decode copy A of an intact raw record
pub fn decode(kind: EntryKind, raw: &[u8]) -> Option<Value> {
    let size = raw.len().checked_sub(1)? / 2;
    wire::from_wire(kind, raw.get(1..1 + size)?)
}
