//! Parameter store
//!
//! Ties a registry to its backing store. The load path lives in
//! [`validator`](super::validator), the sync path in
//! [`reconciler`](super::reconciler).

use super::checksum::Checksum;
use super::config::StoreConfig;
use super::entry::{Entry, EntryHandle, Value};
use super::error::{Result, StoreError};
use super::handler::ErrorHandler;
use super::registry::EntryRegistry;
use crate::platform::Transport;

/// Redundant parameter store over a [`Transport`]
///
/// # Example
///
/// ```
/// use nvparam::core::parameters::{
///     Crc8, EntryRegistry, IgnoreErrors, LoadStatus, ParamStore, StoreConfig, Value,
/// };
/// use nvparam::platform::FnTransport;
///
/// let mut registry = EntryRegistry::new();
/// let speed = registry.register(Value::U16(1500)).unwrap();
///
/// let memory = core::cell::RefCell::new([0xFFu8; 64]);
/// let transport = FnTransport::new(
///     |address: u32, buf: &mut [u8]| {
///         let start = address as usize;
///         buf.copy_from_slice(&memory.borrow()[start..start + buf.len()]);
///         Ok(())
///     },
///     |address: u32, data: &[u8]| {
///         let start = address as usize;
///         memory.borrow_mut()[start..start + data.len()].copy_from_slice(data);
///         Ok(())
///     },
/// );
///
/// let mut store =
///     ParamStore::new(StoreConfig::new(0, 64), registry, transport, Crc8, IgnoreErrors).unwrap();
///
/// // Blank memory: header does not match, defaults are applied
/// assert_eq!(store.load().unwrap().status, LoadStatus::Invalid);
///
/// store.set(speed, Value::U16(1600)).unwrap();
/// store.sync().unwrap();
/// assert_eq!(&memory.borrow()[..7], &[0x00, 0x01, 0x4B, 0x06, 0x40, 0x06, 0x40]);
/// ```
pub struct ParamStore<T, C, H> {
    /// Region on the backing store
    pub(super) config: StoreConfig,
    /// Registered entries and their live values
    pub(super) registry: EntryRegistry,
    /// Backing store access
    pub(super) transport: T,
    /// Record checksum
    pub(super) checksum: C,
    /// Recovery notifications
    pub(super) handler: H,
}

impl<T, C, H> ParamStore<T, C, H>
where
    T: Transport,
    C: Checksum,
    H: ErrorHandler,
{
    /// Assemble a store
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidRange` if `mem_start >= mem_end`
    /// - `StoreError::LayoutOverflow` if the header and all records do not
    ///   fit in `[mem_start, mem_end)`
    pub fn new(
        config: StoreConfig,
        registry: EntryRegistry,
        transport: T,
        checksum: C,
        handler: H,
    ) -> Result<Self> {
        config.check_layout(registry.layout_len())?;
        Ok(Self {
            config,
            registry,
            transport,
            checksum,
            handler,
        })
    }

    /// Current value of an entry
    pub fn value(&self, handle: EntryHandle) -> Option<&Value> {
        self.registry.get(handle).map(Entry::value)
    }

    /// Update an entry's live value (not persisted until sync)
    ///
    /// # Errors
    ///
    /// - `StoreError::UnknownEntry` if the handle is not registered
    /// - `StoreError::TypeMismatch` if the value does not fit the entry
    pub fn set(&mut self, handle: EntryHandle, value: Value) -> Result<()> {
        self.registry
            .get_mut(handle)
            .ok_or(StoreError::UnknownEntry)?
            .set(value)
    }

    /// Restore an entry's default value (not persisted until sync)
    pub fn reset_to_default(&mut self, handle: EntryHandle) -> Result<()> {
        self.registry
            .get_mut(handle)
            .ok_or(StoreError::UnknownEntry)?
            .reset();
        Ok(())
    }

    /// Absolute address of an entry's record
    pub fn address_of(&self, handle: EntryHandle) -> Option<u32> {
        self.registry
            .offset_of(handle)
            .map(|offset| self.config.mem_start + offset)
    }

    /// Bytes used by the header and all records
    pub fn layout_len(&self) -> u64 {
        self.registry.layout_len()
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Registered entries
    pub fn registry(&self) -> &EntryRegistry {
        &self.registry
    }

    /// Get transport reference (for testing)
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport
    pub fn into_transport(self) -> T {
        self.transport
    }
}
