//! Flash interface trait
//!
//! Raw NOR-flash access. Parameter records are rewritten in place, so flash
//! needs [`FlashTransport`](crate::platform::FlashTransport) on top of this
//! trait before it can serve as a [`Transport`](super::Transport).

use crate::platform::Result;

/// Flash interface trait
///
/// # Flash Characteristics
///
/// - Flash is organized in erase blocks (typically 4 KB)
/// - Erase operations set all bytes to 0xFF
/// - Write operations can only change bits from 1→0
///
/// # Safety Invariants
///
/// - Only one owner per Flash instance (no concurrent access)
/// - Implementations must refuse to erase or write protected regions
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidAddress` if the range is out of bounds.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`
    ///
    /// The target region must have been erased first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidAddress` for protected or out-of-bounds ranges.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address`
    ///
    /// Both `address` and `size` must be multiples of [`block_size`](Self::block_size).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unaligned` for misaligned regions and
    /// `StorageError::InvalidAddress` for protected or out-of-bounds ones.
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Minimum erasable unit size in bytes
    fn block_size(&self) -> u32;

    /// Total Flash capacity in bytes
    fn capacity(&self) -> u32;
}
