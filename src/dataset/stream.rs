//! Pull-based, single-pass view over a parsed table.

use std::sync::Arc;

use crate::error::ErrorLog;
use crate::metadata::MetaData;

use super::{DataSet, Record};

/// Hands out the rows of an already parsed [`DataSet`] one at a time.
///
/// The cursor only moves forward. To walk the rows again, take the table
/// back with [`into_dataset`](Self::into_dataset) and wrap it anew.
#[derive(Debug, Clone)]
pub struct StreamingDataSet {
    dataset: DataSet,
    cursor: usize,
}

impl StreamingDataSet {
    pub fn new(dataset: DataSet) -> Self {
        Self { dataset, cursor: 0 }
    }

    /// Advance to the next record, or `None` once every row was handed out.
    pub fn next_record(&mut self) -> Option<Record<'_>> {
        let index = self.cursor;
        if index >= self.dataset.len() {
            return None;
        }
        self.cursor += 1;
        self.dataset.record(index)
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.dataset.len()
    }

    pub fn remaining(&self) -> usize {
        self.dataset.len() - self.cursor
    }

    /// Rows handed out so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn errors(&self) -> &ErrorLog {
        self.dataset.errors()
    }

    pub fn metadata(&self) -> &Arc<MetaData> {
        self.dataset.metadata()
    }

    pub fn into_dataset(self) -> DataSet {
        self.dataset
    }
}

impl From<DataSet> for StreamingDataSet {
    fn from(dataset: DataSet) -> Self {
        Self::new(dataset)
    }
}
