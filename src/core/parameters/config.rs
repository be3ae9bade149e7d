//! Store configuration and layout constants

use super::error::{Result, StoreError};

/// Size of the entry-count header (big-endian u16)
pub const HEADER_LEN: usize = 2;

/// Maximum number of registered entries
pub const MAX_ENTRIES: usize = 64;

/// Maximum array entry size in bytes
pub const MAX_ARRAY_LEN: usize = 256;

/// Longest possible record: checksum plus two copies of the largest payload
pub const MAX_RECORD_LEN: usize = 1 + 2 * MAX_ARRAY_LEN;

/// Address range of the parameter region on the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoreConfig {
    /// Address of the header (first byte of the region)
    pub mem_start: u32,
    /// First address past the region
    pub mem_end: u32,
}

impl StoreConfig {
    /// Create a configuration for `[mem_start, mem_end)`
    pub const fn new(mem_start: u32, mem_end: u32) -> Self {
        Self { mem_start, mem_end }
    }

    /// Region size in bytes
    pub const fn capacity(&self) -> u32 {
        self.mem_end.saturating_sub(self.mem_start)
    }

    /// Check that a layout of `layout_len` bytes fits the region
    pub fn check_layout(&self, layout_len: u64) -> Result<()> {
        if self.mem_start >= self.mem_end {
            return Err(StoreError::InvalidRange);
        }
        let required_end = self.mem_start as u64 + layout_len;
        if required_end > self.mem_end as u64 {
            return Err(StoreError::LayoutOverflow {
                required_end,
                mem_end: self.mem_end,
            });
        }
        Ok(())
    }
}
