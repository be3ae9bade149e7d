//! Sync path
//!
//! Brings storage in line with the live values. A record is only written when
//! its stored bytes differ from the encoded candidate, and every write is
//! read back before it counts.

use super::checksum::Checksum;
use super::config::{HEADER_LEN, MAX_RECORD_LEN};
use super::entry::EntryHandle;
use super::error::{Result, StoreError};
use super::handler::ErrorHandler;
use super::record::{self, Record};
use super::status::{EntryOutcome, SyncReport};
use super::store::ParamStore;
use crate::platform::Transport;

impl<T, C, H> ParamStore<T, C, H>
where
    T: Transport,
    C: Checksum,
    H: ErrorHandler,
{
    /// Persist the header and every entry, in registration order
    ///
    /// Each entry gets one retry. A damaged record is simply rewritten;
    /// corruption is reported to the error handler by `load`, not here.
    ///
    /// # Errors
    ///
    /// - `StoreError::Platform` if the header cannot be read or written
    /// - `StoreError::HeaderVerifyFailed` if the header does not read back
    /// - the second failure of an entry (`VerifyFailed` or `Platform`);
    ///   later entries are left untouched
    pub fn sync(&mut self) -> Result<SyncReport> {
        let header_written = self.ensure_header()?;

        let mut report = SyncReport {
            entries: heapless::Vec::new(),
            retries: 0,
            header_written,
        };

        let mut address = self.config.mem_start + HEADER_LEN as u32;
        for index in 0..self.registry.len() {
            let outcome = match self.reconcile_at(address, index) {
                Ok(outcome) => outcome,
                Err(_) => {
                    crate::log_warn!("params: entry {} sync failed, retrying", index);
                    report.retries += 1;
                    match self.reconcile_at(address, index) {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            crate::log_error!("params: entry {} sync failed twice", index);
                            return Err(err);
                        }
                    }
                }
            };

            report.entries.push(outcome).ok();
            address += self.record_len_at(index) as u32;
        }

        // Block-rewriting transports can take the header down with a record
        if report.records_written() > 0 && self.ensure_header()? {
            crate::log_warn!("params: header lost during sync, rewritten");
            report.header_written = true;
        }

        crate::log_debug!(
            "params: sync wrote {} of {} records",
            report.records_written(),
            report.entries.len()
        );
        Ok(report)
    }

    /// Persist one entry without retrying
    ///
    /// After a write the header is checked and restored if it does not hold
    /// the registered entry count, so the record just written is loadable.
    ///
    /// # Errors
    ///
    /// - `StoreError::UnknownEntry` if the handle is not registered
    /// - `StoreError::VerifyFailed` or `StoreError::Platform` on failure
    /// - `StoreError::HeaderVerifyFailed` if a restored header does not read back
    pub fn sync_entry(&mut self, handle: EntryHandle) -> Result<EntryOutcome> {
        let address = self.address_of(handle).ok_or(StoreError::UnknownEntry)?;

        let outcome = self.reconcile_at(address, handle.index())?;
        if outcome.wrote() {
            self.ensure_header()?;
        }
        Ok(outcome)
    }

    /// Write the header if it differs from the registered count; returns
    /// whether it was written
    fn ensure_header(&mut self) -> Result<bool> {
        let expected = self.registry.header();
        let mut stored = [0u8; HEADER_LEN];
        self.transport.load(self.config.mem_start, &mut stored)?;
        if stored == expected {
            return Ok(false);
        }

        crate::log_info!(
            "params: writing header for {} entries",
            self.registry.len()
        );
        self.transport.save(self.config.mem_start, &expected)?;
        self.transport.load(self.config.mem_start, &mut stored)?;
        if stored != expected {
            return Err(StoreError::HeaderVerifyFailed);
        }
        Ok(true)
    }

    /// Single-entry protocol: read, compare, write, read back
    fn reconcile_at(&mut self, address: u32, index: usize) -> Result<EntryOutcome> {
        let candidate = match self.registry.get(EntryHandle(index as u16)) {
            Some(entry) => Record::encode(entry.value(), &self.checksum),
            None => return Err(StoreError::UnknownEntry),
        };

        let mut scratch = [0u8; MAX_RECORD_LEN];
        let stored = &mut scratch[..candidate.len()];
        self.transport.load(address, stored)?;

        if record::is_intact(stored, &self.checksum) && stored[..] == *candidate.as_bytes() {
            return Ok(EntryOutcome::Idle);
        }

        self.transport.save(address, candidate.as_bytes())?;
        self.transport.load(address, stored)?;
        if stored[..] != *candidate.as_bytes() {
            crate::log_warn!("params: entry {} read-back mismatch at {}", index, address);
            return Err(StoreError::VerifyFailed { index });
        }
        Ok(EntryOutcome::Written)
    }

    fn record_len_at(&self, index: usize) -> usize {
        self.registry
            .get(EntryHandle(index as u16))
            .map_or(0, |entry| entry.record_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ops::ControlFlow;
    use crate::core::parameters::checksum::Crc8;
    use crate::core::parameters::config::StoreConfig;
    use crate::core::parameters::entry::{Entry, Value};
    use crate::core::parameters::handler::IgnoreErrors;
    use crate::core::parameters::registry::EntryRegistry;
    use crate::core::parameters::status::LoadStatus;
    use crate::platform::mock::{MockEeprom, MockFlash};
    use crate::platform::{FlashTransport, PlatformError, StorageError};

    const BASE: u32 = 0x10;

    fn registry(defaults: &[Value]) -> EntryRegistry {
        let mut registry = EntryRegistry::new();
        for value in defaults {
            registry.register(value.clone()).unwrap();
        }
        registry
    }

    /// EEPROM holding a valid image of the given values
    fn image(values: &[Value]) -> MockEeprom {
        let mut eeprom = MockEeprom::new(128);
        eeprom.poke(BASE, &(values.len() as u16).to_be_bytes());
        let mut address = BASE + 2;
        for value in values {
            let record = Record::encode(value, &Crc8);
            eeprom.poke(address, record.as_bytes());
            address += record.len() as u32;
        }
        eeprom.reset_counters();
        eeprom
    }

    fn store<H: ErrorHandler>(
        values: &[Value],
        eeprom: MockEeprom,
        handler: H,
    ) -> ParamStore<MockEeprom, Crc8, H> {
        ParamStore::new(
            StoreConfig::new(BASE, 128),
            registry(values),
            eeprom,
            Crc8,
            handler,
        )
        .unwrap()
    }

    #[test]
    fn test_changed_value_writes_one_record() {
        let values = [Value::U16(0x1234)];
        let mut store = store(&values, image(&values), IgnoreErrors);
        store.set(EntryHandle(0), Value::U16(0x1235)).unwrap();

        let report = store.sync().unwrap();

        assert_eq!(report.entries.as_slice(), &[EntryOutcome::Written]);
        assert!(!report.header_written);
        let eeprom = store.transport_mut();
        assert_eq!(eeprom.write_count(), 1);
        assert_eq!(
            eeprom.contents(BASE, 7),
            &[0x00, 0x01, 0x9C, 0x12, 0x35, 0x12, 0x35]
        );
    }

    #[test]
    fn test_second_sync_is_idle() {
        let values = [Value::U16(0x1234)];
        let mut store = store(&values, image(&values), IgnoreErrors);
        store.set(EntryHandle(0), Value::U16(0x1235)).unwrap();
        store.sync().unwrap();
        store.transport_mut().reset_counters();

        let report = store.sync().unwrap();

        assert!(report.is_idle());
        assert_eq!(report.entries.as_slice(), &[EntryOutcome::Idle]);
        assert_eq!(store.transport_mut().write_count(), 0);
    }

    #[test]
    fn test_first_sync_on_blank_store() {
        let values = [Value::U8(1), Value::I32(-2), Value::array(b"abc").unwrap()];
        let mut store = store(&values, MockEeprom::new(128), IgnoreErrors);

        let report = store.sync().unwrap();

        assert!(report.header_written);
        assert_eq!(report.records_written(), 3);
        assert_eq!(store.transport_mut().write_count(), 4);

        assert_eq!(store.load().unwrap().status, LoadStatus::Ok);
    }

    #[test]
    fn test_sync_then_load_round_trips_every_kind() {
        let values = [
            Value::U8(0xAB),
            Value::I8(-7),
            Value::U16(0xBEEF),
            Value::I16(-12345),
            Value::U32(0xDEAD_BEEF),
            Value::I32(i32::MIN),
            Value::array(&[9, 8, 7]).unwrap(),
        ];
        let defaults = [
            Value::U8(0),
            Value::I8(0),
            Value::U16(0),
            Value::I16(0),
            Value::U32(0),
            Value::I32(0),
            Value::array(&[0, 0, 0]).unwrap(),
        ];
        let mut writer = store(&defaults, MockEeprom::new(128), IgnoreErrors);
        for (index, value) in values.iter().enumerate() {
            writer.set(EntryHandle(index as u16), value.clone()).unwrap();
        }
        writer.sync().unwrap();

        let mut reader = store(&defaults, writer.into_transport(), IgnoreErrors);
        assert_eq!(reader.load().unwrap().status, LoadStatus::Ok);
        for (index, value) in values.iter().enumerate() {
            assert_eq!(reader.value(EntryHandle(index as u16)), Some(value));
        }
    }

    #[test]
    fn test_dropped_write_is_retried() {
        let values = [Value::U16(0x1234)];
        let mut eeprom = image(&values);
        eeprom.drop_writes(1);
        let mut store = store(&values, eeprom, IgnoreErrors);
        store.set(EntryHandle(0), Value::U16(0x1235)).unwrap();

        let report = store.sync().unwrap();

        assert_eq!(report.retries, 1);
        assert_eq!(report.entries.as_slice(), &[EntryOutcome::Written]);
        assert_eq!(store.transport_mut().write_count(), 2);
        assert_eq!(
            store.transport_mut().contents(BASE + 2, 5),
            &[0x9C, 0x12, 0x35, 0x12, 0x35]
        );
    }

    #[test]
    fn test_failed_save_is_retried() {
        let values = [Value::U8(1), Value::U8(2)];
        let mut eeprom = image(&values);
        eeprom.fail_writes(1);
        let mut store = store(&values, eeprom, IgnoreErrors);
        store.set(EntryHandle(0), Value::U8(3)).unwrap();

        let report = store.sync().unwrap();

        assert_eq!(report.retries, 1);
        assert_eq!(
            report.entries.as_slice(),
            &[EntryOutcome::Written, EntryOutcome::Idle]
        );
    }

    #[test]
    fn test_second_failure_aborts_and_leaves_later_entries() {
        let values = [Value::U8(1), Value::U8(2)];
        let mut eeprom = image(&values);
        eeprom.drop_writes(2);
        let mut store = store(&values, eeprom, IgnoreErrors);
        store.set(EntryHandle(0), Value::U8(3)).unwrap();
        store.set(EntryHandle(1), Value::U8(4)).unwrap();

        assert_eq!(store.sync(), Err(StoreError::VerifyFailed { index: 0 }));

        let eeprom = store.transport_mut();
        assert_eq!(eeprom.write_count(), 2);
        let untouched = Record::encode(&Value::U8(2), &Crc8);
        assert_eq!(eeprom.contents(BASE + 5, 3), untouched.as_bytes());
    }

    #[test]
    fn test_header_write_failure_is_fatal() {
        let values = [Value::U8(1)];
        let mut eeprom = MockEeprom::new(64);
        eeprom.fail_writes(1);
        let mut store = store(&values, eeprom, IgnoreErrors);

        assert_eq!(
            store.sync(),
            Err(StoreError::Platform(PlatformError::Storage(
                StorageError::WriteFailed
            )))
        );
    }

    #[test]
    fn test_header_read_back_mismatch_is_fatal() {
        let values = [Value::U8(1)];
        let mut eeprom = MockEeprom::new(64);
        eeprom.drop_writes(1);
        let mut store = store(&values, eeprom, IgnoreErrors);

        assert_eq!(store.sync(), Err(StoreError::HeaderVerifyFailed));
        // No record was attempted
        assert_eq!(store.transport_mut().write_count(), 1);
    }

    #[test]
    fn test_corrupt_record_is_rewritten_without_notifying() {
        let values = [Value::U8(1), Value::U16(0x1234)];
        let mut eeprom = image(&values);
        // Copy B of the u16 record
        eeprom.inject_corruption(BASE + 5 + 3, 0x80);
        let mut notified = 0;
        let mut store = store(&values, eeprom, |_: EntryHandle, _: &Entry| {
            notified += 1;
            ControlFlow::Continue(())
        });

        assert_eq!(store.load().unwrap().status, LoadStatus::Recovered);
        let report = store.sync().unwrap();

        assert_eq!(
            report.entries.as_slice(),
            &[EntryOutcome::Idle, EntryOutcome::Written]
        );
        assert_eq!(store.transport_mut().write_count(), 1);
        assert_eq!(store.load().unwrap().status, LoadStatus::Ok);
        drop(store);
        // Only the first load saw the corruption
        assert_eq!(notified, 1);
    }

    #[test]
    fn test_vetoing_handler_does_not_block_sync() {
        let values = [Value::U8(1), Value::U8(2)];
        let mut eeprom = image(&values);
        eeprom.inject_corruption(BASE + 3, 0x01);
        let mut store = store(&values, eeprom, |_: EntryHandle, _: &Entry| {
            ControlFlow::Break(())
        });
        store.set(EntryHandle(1), Value::U8(9)).unwrap();

        let report = store.sync().unwrap();

        assert_eq!(
            report.entries.as_slice(),
            &[EntryOutcome::Written, EntryOutcome::Written]
        );
        assert_eq!(store.load().unwrap().status, LoadStatus::Ok);
        assert_eq!(store.value(EntryHandle(1)), Some(&Value::U8(9)));
    }

    #[test]
    fn test_sync_entry_writes_only_that_entry() {
        let values = [Value::U8(1), Value::U32(2)];
        let mut store = store(&values, image(&values), IgnoreErrors);
        store.set(EntryHandle(0), Value::U8(5)).unwrap();
        store.set(EntryHandle(1), Value::U32(6)).unwrap();

        assert_eq!(
            store.sync_entry(EntryHandle(1)),
            Ok(EntryOutcome::Written)
        );
        assert_eq!(store.sync_entry(EntryHandle(1)), Ok(EntryOutcome::Idle));

        let eeprom = store.transport_mut();
        assert_eq!(eeprom.write_count(), 1);
        let stale = Record::encode(&Value::U8(1), &Crc8);
        assert_eq!(eeprom.contents(BASE + 2, 3), stale.as_bytes());
    }

    #[test]
    fn test_sync_entry_does_not_retry() {
        let values = [Value::U8(1)];
        let mut eeprom = image(&values);
        eeprom.drop_writes(1);
        let mut store = store(&values, eeprom, IgnoreErrors);
        store.set(EntryHandle(0), Value::U8(2)).unwrap();

        assert_eq!(
            store.sync_entry(EntryHandle(0)),
            Err(StoreError::VerifyFailed { index: 0 })
        );
        assert_eq!(store.transport_mut().write_count(), 1);
    }

    #[test]
    fn test_sync_entry_restores_missing_header() {
        let values = [Value::U16(0x1234)];
        let mut store = store(&values, MockEeprom::new(128), IgnoreErrors);
        store.set(EntryHandle(0), Value::U16(0x1235)).unwrap();

        assert_eq!(store.sync_entry(EntryHandle(0)), Ok(EntryOutcome::Written));

        let eeprom = store.transport_mut();
        assert_eq!(eeprom.write_count(), 2);
        assert_eq!(
            eeprom.contents(BASE, 7),
            &[0x00, 0x01, 0x9C, 0x12, 0x35, 0x12, 0x35]
        );
        assert_eq!(store.load().unwrap().status, LoadStatus::Ok);
    }

    #[test]
    fn test_sync_entry_unknown_handle() {
        let values = [Value::U8(1)];
        let mut store = store(&values, image(&values), IgnoreErrors);

        assert_eq!(
            store.sync_entry(EntryHandle(3)),
            Err(StoreError::UnknownEntry)
        );
        assert_eq!(store.transport_mut().write_count(), 0);
    }

    #[test]
    fn test_power_loss_on_flash_leaves_store_loadable() {
        // Second half of a 4 KB block, so a torn sector write loses the region
        let start = 0x040000 + 3000;
        let mut registry = EntryRegistry::new();
        let speed = registry.register(Value::U16(0x1234)).unwrap();
        let transport = FlashTransport::new(MockFlash::new()).unwrap();
        let mut store = ParamStore::new(
            StoreConfig::new(start, start + 64),
            registry,
            transport,
            Crc8,
            IgnoreErrors,
        )
        .unwrap();
        store.sync().unwrap();

        store.set(speed, Value::U16(0x1235)).unwrap();
        store.transport_mut().flash_mut().simulate_power_loss();
        let report = store.sync().unwrap();

        assert_eq!(report.retries, 1);
        assert_eq!(report.entries.as_slice(), &[EntryOutcome::Written]);
        // The torn block write also took the header; sync put it back
        assert!(report.header_written);
        assert_eq!(store.transport_mut().erase_count(), 1);

        assert_eq!(store.load().unwrap().status, LoadStatus::Ok);
        assert_eq!(store.value(speed), Some(&Value::U16(0x1235)));
        assert!(store.sync().unwrap().is_idle());
    }
}
