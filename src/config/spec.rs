//! Source specification.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use crate::io::InputProvider;

/// Where a parser pulls its lines from.
pub enum SourceSpec {
    /// Opened by the parser and released by it when the parse ends
    Provider(Arc<dyn InputProvider>),
    /// Supplied already open by the caller; the parser never closes it
    Reader {
        id: String,
        reader: Box<dyn Read + Send>,
    },
}

impl SourceSpec {
    /// Identifier used in logs and error messages.
    pub fn id(&self) -> &str {
        match self {
            SourceSpec::Provider(p) => p.id(),
            SourceSpec::Reader { id, .. } => id,
        }
    }

    /// Whether the parser owns the reader it will read from.
    pub fn is_tracked(&self) -> bool {
        matches!(self, SourceSpec::Provider(_))
    }
}

impl fmt::Debug for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Provider(p) => f.debug_tuple("Provider").field(p).finish(),
            SourceSpec::Reader { id, .. } => f.debug_struct("Reader").field("id", id).finish(),
        }
    }
}
