//! Load path
//!
//! Reads the header and every record, restores intact values and falls back
//! to defaults for anything that fails validation.

use core::ops::ControlFlow;

use super::checksum::Checksum;
use super::config::{HEADER_LEN, MAX_RECORD_LEN};
use super::entry::EntryHandle;
use super::error::{Result, StoreError};
use super::handler::ErrorHandler;
use super::record;
use super::status::{EntryState, LoadReport, LoadStatus};
use super::store::ParamStore;
use crate::platform::Transport;

impl<T, C, H> ParamStore<T, C, H>
where
    T: Transport,
    C: Checksum,
    H: ErrorHandler,
{
    /// Populate every entry's live value from storage
    ///
    /// - Header count differs from the registry: every entry is reset to
    ///   its default without reading any record (`LoadStatus::Invalid`).
    /// - A record fails its checksum or its copies differ: the error handler
    ///   is notified, the entry takes its default (`LoadStatus::Recovered`).
    ///
    /// # Errors
    ///
    /// - `StoreError::Platform` on any read failure (reads are not retried)
    /// - `StoreError::Aborted` if the error handler breaks
    pub fn load(&mut self) -> Result<LoadReport> {
        let mut header = [0u8; HEADER_LEN];
        self.transport.load(self.config.mem_start, &mut header)?;
        let stored_count = u16::from_be_bytes(header);

        let mut report = LoadReport {
            status: LoadStatus::Ok,
            entries: heapless::Vec::new(),
        };

        if stored_count as usize != self.registry.len() {
            crate::log_warn!(
                "params: header count {} != {} registered, applying defaults",
                stored_count,
                self.registry.len()
            );
            for entry in self.registry.entries_mut() {
                entry.reset();
                report.entries.push(EntryState::Reset).ok();
            }
            report.status = LoadStatus::Invalid;
            return Ok(report);
        }

        let mut scratch = [0u8; MAX_RECORD_LEN];
        let mut address = self.config.mem_start + HEADER_LEN as u32;
        for (index, entry) in self.registry.entries_mut().iter_mut().enumerate() {
            let raw = &mut scratch[..entry.record_len()];
            self.transport.load(address, raw)?;

            let decoded = if record::is_intact(raw, &self.checksum) {
                record::decode(entry.kind(), raw)
            } else {
                None
            };

            let state = match decoded {
                Some(value) => {
                    entry.restore(value);
                    EntryState::Restored
                }
                None => {
                    crate::log_warn!("params: entry {} corrupt at {}", index, address);
                    let handle = EntryHandle(index as u16);
                    if let ControlFlow::Break(()) = self.handler.notify(handle, entry) {
                        crate::log_error!("params: load aborted at entry {}", index);
                        return Err(StoreError::Aborted { index });
                    }
                    entry.reset();
                    report.status = LoadStatus::Recovered;
                    EntryState::Defaulted
                }
            };
            report.entries.push(state).ok();
            address += entry.record_len() as u32;
        }

        crate::log_debug!("params: loaded {} entries", report.entries.len());
        Ok(report)
    }
}
