//! Load and sync outcomes
//!
//! Fatal failures are reported as `Err(StoreError)`. Everything the store
//! recovered from locally ends up in one of these reports.

use super::config::MAX_ENTRIES;

/// Aggregate load result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadStatus {
    /// Every record was intact
    Ok,
    /// Header valid, at least one entry fell back to its default
    Recovered,
    /// Header count did not match the registry; every entry was defaulted
    Invalid,
}

/// What load did with one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryState {
    /// Value decoded from an intact record
    Restored,
    /// Record was corrupt; value set to the default
    Defaulted,
    /// Schema mismatch; value set to the default without reading the record
    Reset,
}

/// Result of a completed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Aggregate status
    pub status: LoadStatus,
    /// Per-entry states in registration order
    pub entries: heapless::Vec<EntryState, MAX_ENTRIES>,
}

impl LoadReport {
    /// Number of entries that fell back to their default
    pub fn defaulted(&self) -> usize {
        self.entries
            .iter()
            .filter(|state| **state != EntryState::Restored)
            .count()
    }
}

/// Result of reconciling one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryOutcome {
    /// Stored record already matched; nothing written
    Idle,
    /// Record rewritten and verified
    Written,
}

impl EntryOutcome {
    /// Whether this outcome issued a write
    pub fn wrote(self) -> bool {
        !matches!(self, EntryOutcome::Idle)
    }
}

/// Result of a completed sync
///
/// Every entry ended up idle or written and verified; anything else is an
/// `Err` from `sync`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Per-entry outcomes in registration order
    pub entries: heapless::Vec<EntryOutcome, MAX_ENTRIES>,
    /// Entries that needed their second attempt
    pub retries: usize,
    /// Whether the header was rewritten (at the start or after a record
    /// write disturbed it)
    pub header_written: bool,
}

impl SyncReport {
    /// Number of entry records written
    pub fn records_written(&self) -> usize {
        self.entries.iter().filter(|outcome| outcome.wrote()).count()
    }

    /// True when nothing at all was written
    pub fn is_idle(&self) -> bool {
        !self.header_written && self.records_written() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_report_defaulted() {
        let report = LoadReport {
            status: LoadStatus::Recovered,
            entries: heapless::Vec::from_slice(&[
                EntryState::Restored,
                EntryState::Defaulted,
                EntryState::Restored,
            ])
            .unwrap(),
        };
        assert_eq!(report.defaulted(), 1);
    }

    #[test]
    fn test_sync_report_counts() {
        let report = SyncReport {
            entries: heapless::Vec::from_slice(&[
                EntryOutcome::Idle,
                EntryOutcome::Written,
                EntryOutcome::Idle,
            ])
            .unwrap(),
            retries: 0,
            header_written: false,
        };
        assert_eq!(report.records_written(), 1);
        assert!(!report.is_idle());

        let idle = SyncReport {
            entries: heapless::Vec::from_slice(&[EntryOutcome::Idle]).unwrap(),
            retries: 0,
            header_written: false,
        };
        assert!(idle.is_idle());
    }
}
