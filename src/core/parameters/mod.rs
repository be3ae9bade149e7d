//! Redundant parameter storage
//!
//! Persists a fixed, ordered set of typed entries to a byte-addressable
//! backing store. Every entry is written as a checksummed record holding two
//! copies of its value, and a 2-byte header records how many entries the
//! stored layout was written for.
//!
//! - [`registry`]: entry registration and the derived layout
//! - [`store`]: the [`ParamStore`] tying registry, transport, checksum and
//!   error handler together
//! - [`validator`]: `load`, restoring live values from storage
//! - [`reconciler`]: `sync` and `sync_entry`, writing only what changed

pub mod checksum;
pub mod config;
pub mod entry;
pub mod error;
pub mod handler;
pub mod reconciler;
pub mod record;
pub mod registry;
pub mod status;
pub mod store;
pub mod validator;
pub mod wire;

// Re-export commonly used types
pub use checksum::{calculate_crc8, validate_crc8, Checksum, Crc8};
pub use config::{StoreConfig, HEADER_LEN, MAX_ARRAY_LEN, MAX_ENTRIES, MAX_RECORD_LEN};
pub use entry::{ArrayBytes, Entry, EntryHandle, EntryKind, Value};
pub use error::{Result, StoreError};
pub use handler::{ErrorHandler, IgnoreErrors};
pub use record::Record;
pub use registry::EntryRegistry;
pub use status::{EntryOutcome, EntryState, LoadReport, LoadStatus, SyncReport};
pub use store::ParamStore;
