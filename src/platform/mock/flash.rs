//! Mock Flash implementation for testing
//!
//! In-memory NOR flash with erase-before-write semantics.

use crate::platform::{error::StorageError, traits::FlashInterface, Result};
use std::vec::Vec;

/// Flash block size (4 KB)
const BLOCK_SIZE: u32 = 4096;

/// Default capacity (4 MB)
const FLASH_CAPACITY: u32 = 4 * 1024 * 1024;

/// Protected firmware region (first 256 KB)
const FIRMWARE_SIZE: u32 = 0x40000;

/// Mock Flash implementation
///
/// Supports:
/// - Read/write/erase with 1→0-only programming
/// - Erase count tracking per block
/// - Power-loss simulation (next write lands only half its bytes)
/// - Corruption injection
#[derive(Debug)]
pub struct MockFlash {
    /// Flash contents (0xFF when erased)
    storage: Vec<u8>,
    /// Erase count per block
    erase_counts: Vec<u32>,
    /// Start of the writable region
    writable_start: u32,
    /// Next write is cut short
    power_loss: bool,
}

impl MockFlash {
    /// Create a 4 MB mock with the first 256 KB write-protected
    pub fn new() -> Self {
        Self::with_layout(FLASH_CAPACITY, FIRMWARE_SIZE)
    }

    /// Create a mock of `capacity` bytes, writable from `writable_start`
    ///
    /// `capacity` is rounded down to a whole number of blocks.
    pub fn with_layout(capacity: u32, writable_start: u32) -> Self {
        let capacity = capacity - capacity % BLOCK_SIZE;
        Self {
            storage: std::vec![0xFF; capacity as usize],
            erase_counts: std::vec![0; (capacity / BLOCK_SIZE) as usize],
            writable_start,
            power_loss: false,
        }
    }

    /// Get Flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        self.storage[address as usize..address as usize + len].to_vec()
    }

    /// XOR `mask` into the byte at `address`, bypassing Flash semantics
    pub fn inject_corruption(&mut self, address: u32, mask: u8) {
        self.storage[address as usize] ^= mask;
    }

    /// Number of times the block containing `address` was erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / BLOCK_SIZE) as usize]
    }

    /// Total erase count across all blocks
    pub fn get_total_erase_count(&self) -> u32 {
        self.erase_counts.iter().sum()
    }

    /// Cut the next write short, as if power failed halfway through
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }

    fn check_range(&self, address: u32, len: usize) -> Result<()> {
        let end = address as usize + len;
        if end > self.storage.len() {
            return Err(StorageError::InvalidAddress.into());
        }
        Ok(())
    }

    fn check_writable(&self, address: u32, len: usize) -> Result<()> {
        if address < self.writable_start {
            return Err(StorageError::InvalidAddress.into());
        }
        self.check_range(address, len)
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        self.check_range(address, buf.len())?;
        let start = address as usize;
        buf.copy_from_slice(&self.storage[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        self.check_writable(address, data.len())?;

        let len = if self.power_loss {
            self.power_loss = false;
            data.len() / 2
        } else {
            data.len()
        };

        let start = address as usize;
        for (cell, byte) in self.storage[start..start + len].iter_mut().zip(data) {
            *cell &= *byte;
        }
        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if address % BLOCK_SIZE != 0 || size % BLOCK_SIZE != 0 {
            return Err(StorageError::Unaligned.into());
        }
        self.check_writable(address, size as usize)?;

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);
        let first = (address / BLOCK_SIZE) as usize;
        for count in &mut self.erase_counts[first..first + (size / BLOCK_SIZE) as usize] {
            *count += 1;
        }
        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        self.storage.len() as u32
    }
}
