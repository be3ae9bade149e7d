//! Byte-granular transport over erase-before-write Flash
//!
//! Parameter records are small and rewritten in place, which raw NOR flash
//! cannot do. [`FlashTransport`] emulates an EEPROM on top of a
//! [`FlashInterface`]: each write is split per erase block, and a block is
//! only erased when the new bytes need a 0→1 transition.

use crate::platform::error::{PlatformError, StorageError};
use crate::platform::traits::{FlashInterface, Transport};
use crate::platform::Result;

/// Largest erase block this transport can buffer
pub const MAX_SECTOR_SIZE: usize = 4096;

/// EEPROM emulation over a Flash device
///
/// Rewriting bytes in place costs one erase of the containing block, unless
/// the new bytes only clear bits.
pub struct FlashTransport<F: FlashInterface> {
    /// Flash device
    flash: F,
    /// Number of block erases issued
    erases: u32,
}

impl<F: FlashInterface> FlashTransport<F> {
    /// Wrap a Flash device
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if the device's erase block is
    /// zero or larger than [`MAX_SECTOR_SIZE`].
    pub fn new(flash: F) -> Result<Self> {
        let block = flash.block_size() as usize;
        if block == 0 || block > MAX_SECTOR_SIZE {
            return Err(PlatformError::InvalidConfig);
        }
        Ok(Self { flash, erases: 0 })
    }

    /// Number of erase cycles this transport has issued
    pub fn erase_count(&self) -> u32 {
        self.erases
    }

    /// Get Flash interface reference (for testing)
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Release the Flash device
    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Program `chunk` at `address`, which lies inside the block starting at `base`
    fn program_block(&mut self, base: u32, address: u32, chunk: &[u8]) -> Result<()> {
        let block = self.flash.block_size();
        let mut sector = [0u8; MAX_SECTOR_SIZE];
        let sector = &mut sector[..block as usize];
        self.flash.read(base, sector)?;

        let offset = (address - base) as usize;
        let target = &mut sector[offset..offset + chunk.len()];
        if target == chunk {
            return Ok(());
        }

        // Programming can only clear bits
        let needs_erase = target.iter().zip(chunk).any(|(old, new)| old & new != *new);
        if !needs_erase {
            return self.flash.write(address, chunk);
        }

        target.copy_from_slice(chunk);
        self.flash.erase(base, block)?;
        self.erases += 1;
        crate::log_trace!("flash: erased block {} for rewrite", base);
        self.flash.write(base, sector)
    }
}

impl<F: FlashInterface> Transport for FlashTransport<F> {
    fn load(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        self.flash.read(address, buf)
    }

    fn save(&mut self, address: u32, data: &[u8]) -> Result<()> {
        let end = u32::try_from(data.len())
            .ok()
            .and_then(|len| address.checked_add(len))
            .ok_or(StorageError::InvalidAddress)?;
        if end > self.flash.capacity() {
            return Err(StorageError::InvalidAddress.into());
        }

        let block = self.flash.block_size();
        let mut cursor = address;
        while cursor < end {
            let base = cursor - cursor % block;
            let chunk_end = end.min(base.saturating_add(block));
            let chunk = &data[(cursor - address) as usize..(chunk_end - address) as usize];
            self.program_block(base, cursor, chunk)?;
            cursor = chunk_end;
        }
        Ok(())
    }
}
