//! Append-only log of row-level anomalies.

use serde::Serialize;

use super::{DataError, Severity};

/// Ordered collection of [`DataError`]s raised during one parse.
///
/// Entries keep the order they were raised in, which is also source line
/// order. When the log is created with warnings suppressed, severity-1
/// entries are dropped on the way in and never stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorLog {
    entries: Vec<DataError>,
    #[serde(skip)]
    suppress_warnings: bool,
}

impl ErrorLog {
    /// Create an empty log.
    pub fn new(suppress_warnings: bool) -> Self {
        Self {
            entries: Vec::new(),
            suppress_warnings,
        }
    }

    /// Append an error. Returns `false` when it was filtered out.
    pub(crate) fn record(&mut self, error: DataError) -> bool {
        if error.severity() == Severity::Warning && self.suppress_warnings {
            return false;
        }
        self.entries.push(error);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataError> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether severity-1 entries are being filtered.
    pub fn suppresses_warnings(&self) -> bool {
        self.suppress_warnings
    }

    /// Entries at or above `min`, in raise order.
    pub fn at_least(&self, min: Severity) -> impl Iterator<Item = &DataError> + '_ {
        self.entries.iter().filter(move |e| e.severity() >= min)
    }

    /// True if any entry is at or above `min`.
    ///
    /// Callers that reject a whole file on errors typically ask for
    /// `Severity::Error`.
    pub fn has_at_least(&self, min: Severity) -> bool {
        self.entries.iter().any(|e| e.severity() >= min)
    }

    /// Number of entries with exactly this severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity() == severity)
            .count()
    }

    pub fn for_line(&self, line_no: usize) -> impl Iterator<Item = &DataError> + '_ {
        self.entries.iter().filter(move |e| e.line_no() == line_no)
    }

    /// True if any entry was raised on `line_no`.
    pub fn is_error_line(&self, line_no: usize) -> bool {
        self.entries.iter().any(|e| e.line_no() == line_no)
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a DataError;
    type IntoIter = std::slice::Iter<'a, DataError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
