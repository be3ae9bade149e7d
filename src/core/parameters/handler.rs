//! Error handler hook
//!
//! `load` calls the handler for every record that fails validation, before
//! the entry falls back to its default. Returning `ControlFlow::Break` turns
//! that recovery into a fatal abort.

use core::ops::ControlFlow;

use super::entry::{Entry, EntryHandle};

/// Receives recovered-entry notifications
pub trait ErrorHandler {
    /// Called once per recovered entry; `Break` aborts the operation
    fn notify(&mut self, handle: EntryHandle, entry: &Entry) -> ControlFlow<()>;
}

impl<F> ErrorHandler for F
where
    F: FnMut(EntryHandle, &Entry) -> ControlFlow<()>,
{
    fn notify(&mut self, handle: EntryHandle, entry: &Entry) -> ControlFlow<()> {
        self(handle, entry)
    }
}

/// Handler that lets every recovery continue
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreErrors;

impl ErrorHandler for IgnoreErrors {
    fn notify(&mut self, _handle: EntryHandle, _entry: &Entry) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
