//! Delimited (separator-based) row decoding.

use crate::error::FlatpackError;

use super::{DecodeOutcome, HeaderPolicy, WhitespacePolicy};

/// Splits lines on a single-byte delimiter, honoring an optional text
/// qualifier around fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedDecoder {
    pub delimiter: u8,
    /// Quote byte wrapping fields that contain the delimiter
    pub qualifier: Option<u8>,
    pub header: HeaderPolicy,
}

impl Default for DelimitedDecoder {
    fn default() -> Self {
        Self {
            delimiter: b',',
            qualifier: Some(b'"'),
            header: HeaderPolicy::FirstLine,
        }
    }
}

impl DelimitedDecoder {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    pub fn with_qualifier(mut self, qualifier: Option<u8>) -> Self {
        self.qualifier = qualifier;
        self
    }

    pub fn with_header(mut self, header: HeaderPolicy) -> Self {
        self.header = header;
        self
    }

    /// Split a line into raw fields, qualifiers removed.
    ///
    /// Configures a fresh csv reader on every call.
    pub fn split(&self, line: &str) -> Vec<String> {
        Tokenizer::new(self).split(line)
    }

    pub fn decode(&self, line: &str, expected: usize, ws: WhitespacePolicy) -> DecodeOutcome {
        self.decode_with(&mut Tokenizer::new(self), line, expected, ws)
    }

    pub(crate) fn decode_with(
        &self,
        tokenizer: &mut Tokenizer,
        line: &str,
        expected: usize,
        ws: WhitespacePolicy,
    ) -> DecodeOutcome {
        if line.trim().is_empty() {
            return DecodeOutcome::Empty;
        }

        let fields: Vec<String> = tokenizer.split(line).iter().map(|f| ws.apply(f)).collect();
        if fields.iter().all(|f| f.trim().is_empty()) {
            return DecodeOutcome::Empty;
        }

        match fields.len() {
            n if n < expected => DecodeOutcome::TooFew(fields),
            n if n > expected => DecodeOutcome::TooMany(fields),
            _ => DecodeOutcome::Fields(fields),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), FlatpackError> {
        if matches!(self.delimiter, b'\n' | b'\r') {
            return Err(FlatpackError::configuration(
                "delimiter cannot be a line terminator",
            ));
        }
        if let Some(q) = self.qualifier {
            if q == self.delimiter {
                return Err(FlatpackError::configuration(format!(
                    "delimiter and qualifier are both '{}'",
                    q as char
                )));
            }
            if matches!(q, b'\n' | b'\r') {
                return Err(FlatpackError::configuration(
                    "qualifier cannot be a line terminator",
                ));
            }
        }
        Ok(())
    }
}

/// csv tokenizer configured once for a decoder and reused line after line.
#[derive(Debug)]
pub(crate) struct Tokenizer {
    builder: csv::ReaderBuilder,
    record: csv::StringRecord,
    delimiter: u8,
}

impl Tokenizer {
    pub(crate) fn new(decoder: &DelimitedDecoder) -> Self {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(decoder.delimiter)
            // lines arrive already split on '\n'; a lone '\r' is field data
            .terminator(csv::Terminator::Any(b'\n'))
            .quoting(decoder.qualifier.is_some())
            .quote(decoder.qualifier.unwrap_or(b'"'));
        Self {
            builder,
            record: csv::StringRecord::new(),
            delimiter: decoder.delimiter,
        }
    }

    pub(crate) fn split(&mut self, line: &str) -> Vec<String> {
        let mut rdr = self.builder.from_reader(line.as_bytes());
        match rdr.read_record(&mut self.record) {
            Ok(true) => self.record.iter().map(str::to_string).collect(),
            Ok(false) => Vec::new(),
            // csv only fails here on malformed quoting; fall back to a plain split
            Err(_) => line
                .split(self.delimiter as char)
                .map(str::to_string)
                .collect(),
        }
    }
}
