//! Wire byte order
//!
//! Multi-byte scalars are stored big-endian regardless of the host's native
//! order; single bytes and arrays are stored as-is. Encoding and decoding
//! both go through this module so the two directions cannot drift apart.

use super::entry::{ArrayBytes, EntryKind, Value};

/// Write `value` in wire order into `out`
///
/// `out` must be exactly `value.size()` bytes long.
pub fn to_wire(value: &Value, out: &mut [u8]) {
    match value {
        Value::U8(v) => out.copy_from_slice(&[*v]),
        Value::I8(v) => out.copy_from_slice(&v.to_be_bytes()),
        Value::U16(v) => out.copy_from_slice(&v.to_be_bytes()),
        Value::I16(v) => out.copy_from_slice(&v.to_be_bytes()),
        Value::U32(v) => out.copy_from_slice(&v.to_be_bytes()),
        Value::I32(v) => out.copy_from_slice(&v.to_be_bytes()),
        Value::Array(bytes) => out.copy_from_slice(bytes),
    }
}

/// Read a value of `kind` from wire-order `bytes`
///
/// Returns `None` if `bytes` has the wrong length for a scalar kind or is
/// too long for an array.
pub fn from_wire(kind: EntryKind, bytes: &[u8]) -> Option<Value> {
    let value = match kind {
        EntryKind::U8 => Value::U8(u8::from_be_bytes(bytes.try_into().ok()?)),
        EntryKind::I8 => Value::I8(i8::from_be_bytes(bytes.try_into().ok()?)),
        EntryKind::U16 => Value::U16(u16::from_be_bytes(bytes.try_into().ok()?)),
        EntryKind::I16 => Value::I16(i16::from_be_bytes(bytes.try_into().ok()?)),
        EntryKind::U32 => Value::U32(u32::from_be_bytes(bytes.try_into().ok()?)),
        EntryKind::I32 => Value::I32(i32::from_be_bytes(bytes.try_into().ok()?)),
        EntryKind::Array => Value::Array(ArrayBytes::from_slice(bytes).ok()?),
    };
    Some(value)
}
