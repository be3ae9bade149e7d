//! Entry registry
//!
//! The ordered list of persisted entries. Registration order is the storage
//! layout: entry *i* lives right after the header and the records of entries
//! `0..i`, so reordering or resizing entries invalidates stored data.

use super::config::{HEADER_LEN, MAX_ENTRIES};
use super::entry::{Entry, EntryHandle, Value};
use super::error::{Result, StoreError};

/// Ordered entry registry
#[derive(Debug, Clone, Default)]
pub struct EntryRegistry {
    /// Entries in registration order
    entries: heapless::Vec<Entry, MAX_ENTRIES>,
}

impl EntryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Register an entry whose live value starts at `default`
    ///
    /// Scalar sizes are derived from the value's kind; an array's size is the
    /// length of its default and never changes afterwards.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidEntry` for an empty array
    /// - `StoreError::RegistryFull` once [`MAX_ENTRIES`] are registered
    pub fn register(&mut self, default: Value) -> Result<EntryHandle> {
        let entry = Entry::new(default)?;
        let handle = EntryHandle(self.entries.len() as u16);
        self.entries
            .push(entry)
            .map_err(|_| StoreError::RegistryFull)?;
        Ok(handle)
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get entry by handle
    pub fn get(&self, handle: EntryHandle) -> Option<&Entry> {
        self.entries.get(handle.index())
    }

    /// Get mutable entry by handle
    pub fn get_mut(&mut self, handle: EntryHandle) -> Option<&mut Entry> {
        self.entries.get_mut(handle.index())
    }

    /// Iterate over (handle, entry) pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (EntryHandle, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (EntryHandle(index as u16), entry))
    }

    /// Offset of an entry's record from the start of the region
    pub fn offset_of(&self, handle: EntryHandle) -> Option<u32> {
        if handle.index() >= self.entries.len() {
            return None;
        }
        let preceding: usize = self.entries[..handle.index()]
            .iter()
            .map(Entry::record_len)
            .sum();
        Some((HEADER_LEN + preceding) as u32)
    }

    /// Total bytes used by the header and every record
    pub fn layout_len(&self) -> u64 {
        let records: u64 = self.entries.iter().map(|e| e.record_len() as u64).sum();
        HEADER_LEN as u64 + records
    }

    /// Header bytes: the entry count, big-endian
    pub fn header(&self) -> [u8; HEADER_LEN] {
        (self.entries.len() as u16).to_be_bytes()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }
}
