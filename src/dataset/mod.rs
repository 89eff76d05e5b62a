//! The materialized result of a parse.

use std::sync::Arc;

use crate::error::{ErrorLog, LookupError, Severity};
use crate::metadata::MetaData;

mod stream;

pub use stream::StreamingDataSet;

/// One parsed row, aligned to the metadata column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line_no: usize,
    values: Vec<Option<String>>,
    raw: Option<String>,
}

impl Row {
    pub(crate) fn new(line_no: usize, values: Vec<Option<String>>, raw: Option<String>) -> Self {
        Self {
            line_no,
            values,
            raw,
        }
    }

    /// 1-based source line the row came from.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Values in column order. `None` marks a value stored as absent.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn raw_data(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

/// A row viewed through the metadata it was parsed with.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    row: &'a Row,
    metadata: &'a MetaData,
}

impl<'a> Record<'a> {
    pub(crate) fn new(row: &'a Row, metadata: &'a MetaData) -> Self {
        Self { row, metadata }
    }

    /// Value of the named column.
    ///
    /// `Ok(None)` means the value is absent by design (empty strings stored
    /// as null); an unknown name is an `Err`.
    pub fn get(&self, column: &str) -> Result<Option<&'a str>, LookupError> {
        let index = self.metadata.index_of(column)?;
        self.get_by_index(index)
    }

    pub fn get_by_index(&self, index: usize) -> Result<Option<&'a str>, LookupError> {
        let values = &self.row.values;
        values
            .get(index)
            .map(Option::as_deref)
            .ok_or(LookupError::ColumnIndexOutOfRange {
                index,
                len: values.len(),
            })
    }

    /// Value of the named column, with absent values read as `""`.
    pub fn get_or_empty(&self, column: &str) -> Result<&'a str, LookupError> {
        Ok(self.get(column)?.unwrap_or(""))
    }

    pub fn contains(&self, column: &str) -> bool {
        self.metadata.contains(column)
    }

    pub fn line_no(&self) -> usize {
        self.row.line_no
    }

    pub fn raw_data(&self) -> Option<&'a str> {
        self.row.raw.as_deref()
    }

    pub fn values(&self) -> &'a [Option<String>] {
        &self.row.values
    }

    pub fn len(&self) -> usize {
        self.row.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.values.is_empty()
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }
}

/// Parsed rows plus the errors raised while parsing them.
///
/// The metadata is shared with the parser that produced the table. Once
/// returned, a `DataSet` has no mutating API.
#[derive(Debug, Clone)]
pub struct DataSet {
    metadata: Arc<MetaData>,
    rows: Vec<Row>,
    errors: ErrorLog,
}

impl DataSet {
    pub(crate) fn from_parts(metadata: Arc<MetaData>, rows: Vec<Row>, errors: ErrorLog) -> Self {
        Self {
            metadata,
            rows,
            errors,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|r| Record::new(r, &self.metadata))
    }

    pub fn records(&self) -> Records<'_> {
        Records {
            rows: self.rows.iter(),
            metadata: &self.metadata,
        }
    }

    /// Value at `row` in the named column.
    pub fn get(&self, row: usize, column: &str) -> Result<Option<&str>, LookupError> {
        self.checked_record(row)?.get(column)
    }

    pub fn get_by_index(&self, row: usize, column: usize) -> Result<Option<&str>, LookupError> {
        self.checked_record(row)?.get_by_index(column)
    }

    fn checked_record(&self, row: usize) -> Result<Record<'_>, LookupError> {
        self.record(row).ok_or(LookupError::RowOutOfRange {
            index: row,
            len: self.rows.len(),
        })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.metadata.column_names()
    }

    pub fn metadata(&self) -> &Arc<MetaData> {
        &self.metadata
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    /// True if any recorded error is at or above `min`.
    pub fn has_errors_at_least(&self, min: Severity) -> bool {
        self.errors.has_at_least(min)
    }
}

/// Iterator over the records of a [`DataSet`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rows: std::slice::Iter<'a, Row>,
    metadata: &'a MetaData,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|r| Record::new(r, self.metadata))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

impl<'a> IntoIterator for &'a DataSet {
    type Item = Record<'a>;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}
