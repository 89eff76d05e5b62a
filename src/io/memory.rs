//! In-memory source.

use std::io::{self, Cursor, Read};
use std::sync::Arc;

use tracing::debug;

use super::InputProvider;

/// In-memory text or bytes used as a source.
///
/// The bytes are shared, so every `open` (for example after a parser reset)
/// reads the same content from the start without copying it.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    data: Arc<[u8]>,
}

impl InMemorySource {
    /// Create a new in-memory source with the given data.
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            data: Arc::from(data),
        }
    }

    /// Create a new in-memory source from a string.
    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl InputProvider for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        debug!(source = %self.id, bytes = self.data.len(), "opened in-memory source");
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }
}
