//! Column descriptors.

use serde::Deserialize;

/// Externally supplied description of one column.
///
/// This is what a schema loader hands to the parser. It can be built in
/// code or deserialized from any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDef {
    /// Column name as declared
    pub name: String,
    /// Width in bytes (fixed-width layouts)
    #[serde(default)]
    pub width: Option<usize>,
    /// Opaque format hint, passed through untouched
    #[serde(default)]
    pub format: Option<String>,
}

impl ColumnDef {
    /// Create a column definition with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: None,
            format: None,
        }
    }

    /// Create a fixed-width column definition.
    pub fn fixed(name: impl Into<String>, width: usize) -> Self {
        Self::new(name).with_width(width)
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl From<&str> for ColumnDef {
    fn from(name: &str) -> Self {
        ColumnDef::new(name)
    }
}

impl From<String> for ColumnDef {
    fn from(name: String) -> Self {
        ColumnDef::new(name)
    }
}

/// A column as registered in [`MetaData`](super::MetaData).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetaData {
    pub(super) name: String,
    pub(super) index: usize,
    pub(super) width: Option<usize>,
    pub(super) format: Option<String>,
    pub(super) key: String,
}

impl ColumnMetaData {
    /// Registered name, including any duplicate suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 0-based position in the column sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Normalized key used for name lookups.
    pub fn key(&self) -> &str {
        &self.key
    }
}
