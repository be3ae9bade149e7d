//! Storage transport trait
//!
//! The parameter store never touches hardware directly. Every header and
//! record access goes through a [`Transport`], a flat byte-addressable
//! read/write pair over the backing store.

use crate::platform::Result;

/// Flat-address byte transport over a backing store (EEPROM, emulated EEPROM, Flash)
///
/// Writes must be byte-granular: after `save(address, data)` succeeds, a
/// `load` of the same range is expected to return `data`. The store verifies
/// this by reading back every record it writes.
pub trait Transport {
    /// Read `buf.len()` bytes starting at `address`
    fn load(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`
    fn save(&mut self, address: u32, data: &[u8]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn load(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        (**self).load(address, buf)
    }

    fn save(&mut self, address: u32, data: &[u8]) -> Result<()> {
        (**self).save(address, data)
    }
}

/// Transport built from a pair of closures
///
/// Convenient when the driver is exposed as plain read/write functions.
///
/// # Example
///
/// ```
/// use nvparam::platform::{FnTransport, Transport};
///
/// let eeprom = [0xFFu8; 64];
/// let mut shadow = [0u8; 64];
/// let mut transport = FnTransport::new(
///     |address: u32, buf: &mut [u8]| {
///         let start = address as usize;
///         buf.copy_from_slice(&eeprom[start..start + buf.len()]);
///         Ok(())
///     },
///     |address: u32, data: &[u8]| {
///         let start = address as usize;
///         shadow[start..start + data.len()].copy_from_slice(data);
///         Ok(())
///     },
/// );
///
/// let mut buf = [0u8; 2];
/// transport.load(0, &mut buf).unwrap();
/// assert_eq!(buf, [0xFF, 0xFF]);
/// ```
pub struct FnTransport<L, S> {
    load: L,
    save: S,
}

impl<L, S> FnTransport<L, S>
where
    L: FnMut(u32, &mut [u8]) -> Result<()>,
    S: FnMut(u32, &[u8]) -> Result<()>,
{
    /// Create a transport from a load and a save function
    pub fn new(load: L, save: S) -> Self {
        Self { load, save }
    }
}

impl<L, S> Transport for FnTransport<L, S>
where
    L: FnMut(u32, &mut [u8]) -> Result<()>,
    S: FnMut(u32, &[u8]) -> Result<()>,
{
    fn load(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        (self.load)(address, buf)
    }

    fn save(&mut self, address: u32, data: &[u8]) -> Result<()> {
        (self.save)(address, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::{PlatformError, StorageError};

    #[test]
    fn test_fn_transport_forwards_calls() {
        let mut memory = [0u8; 16];
        let mut saves = 0;
        {
            let mem = core::cell::RefCell::new(&mut memory);
            let mut transport = FnTransport::new(
                |address: u32, buf: &mut [u8]| {
                    let start = address as usize;
                    buf.copy_from_slice(&mem.borrow()[start..start + buf.len()]);
                    Ok(())
                },
                |address: u32, data: &[u8]| {
                    let start = address as usize;
                    mem.borrow_mut()[start..start + data.len()].copy_from_slice(data);
                    saves += 1;
                    Ok(())
                },
            );

            transport.save(4, &[1, 2, 3]).unwrap();
            let mut buf = [0u8; 3];
            transport.load(4, &mut buf).unwrap();
            assert_eq!(buf, [1, 2, 3]);
        }
        assert_eq!(saves, 1);
        assert_eq!(&memory[4..7], &[1, 2, 3]);
    }

    #[test]
    fn test_fn_transport_propagates_errors() {
        let mut transport = FnTransport::new(
            |_: u32, _: &mut [u8]| Err(StorageError::ReadFailed.into()),
            |_: u32, _: &[u8]| Ok(()),
        );

        let mut buf = [0u8; 1];
        assert_eq!(
            transport.load(0, &mut buf),
            Err(PlatformError::Storage(StorageError::ReadFailed))
        );
    }
}
