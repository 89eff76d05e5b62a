//! Readers opened by the parser itself.

use std::io::{BufRead, BufReader, Read};

use tracing::debug;

use super::InputProvider;
use crate::error::{FlatpackError, Stage};

struct TrackedReader {
    id: String,
    reader: BufReader<Box<dyn Read + Send>>,
}

/// Ordered list of readers the parser must release.
///
/// Readers are closed in registration order, each exactly once. Anything
/// still registered when the list is dropped is closed then.
#[derive(Default)]
pub(crate) struct CloseList {
    readers: Vec<TrackedReader>,
}

impl CloseList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Open `provider` and register the stream. Returns its slot.
    pub(crate) fn open(&mut self, provider: &dyn InputProvider) -> Result<usize, FlatpackError> {
        let reader = provider
            .open()
            .map_err(|e| FlatpackError::io(Stage::Open, provider.id(), e))?;
        debug!(source = provider.id(), "opened reader");
        Ok(self.register(provider.id(), reader))
    }

    pub(crate) fn register(&mut self, id: impl Into<String>, reader: Box<dyn Read + Send>) -> usize {
        self.readers.push(TrackedReader {
            id: id.into(),
            reader: BufReader::new(reader),
        });
        self.readers.len() - 1
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut dyn BufRead> {
        self.readers
            .get_mut(slot)
            .map(|t| &mut t.reader as &mut dyn BufRead)
    }

    /// Drop every registered reader in registration order.
    pub(crate) fn close_all(&mut self) -> usize {
        let count = self.readers.len();
        for tracked in self.readers.drain(..) {
            let TrackedReader { id, reader } = tracked;
            drop(reader);
            debug!(source = %id, "closed reader");
        }
        count
    }
}

impl Drop for CloseList {
    fn drop(&mut self) {
        self.close_all();
    }
}
