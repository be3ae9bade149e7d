//! Record checksum
//!
//! Each record carries a single checksum byte computed over both payload
//! copies. The algorithm is pluggable through [`Checksum`]; [`Crc8`] is the
//! stock implementation.

use crc::{Crc, CRC_8_SMBUS};

/// CRC-8 algorithm (SMBus, polynomial 0x07)
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Single-byte checksum over an arbitrary byte range
pub trait Checksum {
    /// Compute the checksum of `data`
    fn checksum(&self, data: &[u8]) -> u8;
}

impl<F> Checksum for F
where
    F: Fn(&[u8]) -> u8,
{
    fn checksum(&self, data: &[u8]) -> u8 {
        self(data)
    }
}

/// CRC-8/SMBUS checksum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc8;

impl Checksum for Crc8 {
    fn checksum(&self, data: &[u8]) -> u8 {
        calculate_crc8(data)
    }
}

/// Calculate CRC-8 checksum of data
///
/// # Example
///
/// ```
/// use nvparam::core::parameters::checksum::calculate_crc8;
///
/// assert_eq!(calculate_crc8(b"123456789"), 0xF4);
/// ```
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

/// Validate data against a CRC-8 checksum
pub fn validate_crc8(data: &[u8], expected_crc: u8) -> bool {
    calculate_crc8(data) == expected_crc
}
