//! Fixed-width row decoding.

use crate::error::FlatpackError;
use crate::metadata::MetaData;

use super::{DecodeOutcome, WhitespacePolicy};

/// Slices lines by the byte widths declared on each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedWidthDecoder;

impl FixedWidthDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, line: &str, metadata: &MetaData, ws: WhitespacePolicy) -> DecodeOutcome {
        if line.trim().is_empty() {
            return DecodeOutcome::Empty;
        }

        let mut fields = Vec::with_capacity(metadata.len());
        let mut pos = 0usize;

        for col in metadata.columns() {
            if pos >= line.len() {
                return DecodeOutcome::TooFew(fields);
            }
            let width = col.width().unwrap_or(0);
            let want = pos.saturating_add(width);
            let end = want.min(line.len());
            if !line.is_char_boundary(end) {
                return DecodeOutcome::BadSegment {
                    column: col.index(),
                    fields,
                };
            }
            fields.push(ws.apply(&line[pos..end]));
            if end < want {
                // line ended inside this column
                return DecodeOutcome::TooFew(fields);
            }
            pos = end;
        }

        if pos < line.len() {
            fields.push(ws.apply(&line[pos..]));
            return DecodeOutcome::TooMany(fields);
        }
        DecodeOutcome::Fields(fields)
    }

    pub(crate) fn validate(&self, metadata: &MetaData) -> Result<(), FlatpackError> {
        for col in metadata.columns() {
            match col.width() {
                Some(w) if w > 0 => {}
                _ => {
                    return Err(FlatpackError::configuration(format!(
                        "fixed-width column '{}' has no width",
                        col.name()
                    )));
                }
            }
        }
        Ok(())
    }
}
