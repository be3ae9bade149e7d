//! Mock EEPROM implementation for testing
//!
//! Byte-addressable backing store implementing [`Transport`] directly, with
//! fault injection for exercising the load and sync error paths.

use crate::platform::{error::StorageError, traits::Transport, Result};
use std::vec::Vec;

/// Mock EEPROM implementation
///
/// Fresh memory reads as 0xFF. Faults are armed per call count:
/// - `fail_reads(n)`: the next `n` loads return `ReadFailed`
/// - `fail_writes(n)`: the next `n` saves return `WriteFailed`
/// - `drop_writes(n)`: the next `n` saves report success but store a
///   corrupted copy of the data, so read-back verification fails
#[derive(Debug)]
pub struct MockEeprom {
    /// Memory contents
    memory: Vec<u8>,
    /// Successful load calls
    reads: usize,
    /// Save calls that reached memory
    writes: usize,
    /// Log of (address, len) for every load call
    read_log: Vec<(u32, usize)>,
    pending_read_failures: usize,
    pending_write_failures: usize,
    pending_dropped_writes: usize,
}

impl MockEeprom {
    /// Create an erased EEPROM of `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            memory: std::vec![0xFF; size],
            reads: 0,
            writes: 0,
            read_log: Vec::new(),
            pending_read_failures: 0,
            pending_write_failures: 0,
            pending_dropped_writes: 0,
        }
    }

    /// Get memory contents (for test verification)
    pub fn contents(&self, address: u32, len: usize) -> &[u8] {
        &self.memory[address as usize..address as usize + len]
    }

    /// Overwrite memory directly, bypassing counters and faults
    pub fn poke(&mut self, address: u32, data: &[u8]) {
        let start = address as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
    }

    /// XOR `mask` into the byte at `address`
    pub fn inject_corruption(&mut self, address: u32, mask: u8) {
        self.memory[address as usize] ^= mask;
    }

    /// Number of successful loads
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Number of saves that reached memory (including dropped ones)
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Addresses and lengths of every load, in order
    pub fn read_log(&self) -> &[(u32, usize)] {
        &self.read_log
    }

    /// Reset read/write counters and the read log
    pub fn reset_counters(&mut self) {
        self.reads = 0;
        self.writes = 0;
        self.read_log.clear();
    }

    /// Fail the next `count` loads
    pub fn fail_reads(&mut self, count: usize) {
        self.pending_read_failures = count;
    }

    /// Fail the next `count` saves
    pub fn fail_writes(&mut self, count: usize) {
        self.pending_write_failures = count;
    }

    /// Silently corrupt the next `count` saves
    pub fn drop_writes(&mut self, count: usize) {
        self.pending_dropped_writes = count;
    }

    fn check_range(&self, address: u32, len: usize) -> Result<()> {
        if address as usize + len > self.memory.len() {
            return Err(StorageError::InvalidAddress.into());
        }
        Ok(())
    }
}

impl Transport for MockEeprom {
    fn load(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        self.read_log.push((address, buf.len()));
        if self.pending_read_failures > 0 {
            self.pending_read_failures -= 1;
            return Err(StorageError::ReadFailed.into());
        }
        self.check_range(address, buf.len())?;

        let start = address as usize;
        buf.copy_from_slice(&self.memory[start..start + buf.len()]);
        self.reads += 1;
        Ok(())
    }

    fn save(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if self.pending_write_failures > 0 {
            self.pending_write_failures -= 1;
            return Err(StorageError::WriteFailed.into());
        }
        self.check_range(address, data.len())?;

        let start = address as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
        if self.pending_dropped_writes > 0 && !data.is_empty() {
            self.pending_dropped_writes -= 1;
            self.memory[start + data.len() - 1] ^= 0x01;
        }
        self.writes += 1;
        Ok(())
    }
}
