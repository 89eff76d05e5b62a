//! Row decoders for the supported flat-file layouts.
//!
//! This module provides:
//! - `FormatKind`: the layout family of a file
//! - `RowDecoder`: a closed set of decoders behind one `decode` contract
//! - `DecodeOutcome`: what a decoder made of one line
//! - `WhitespacePolicy` / `HeaderPolicy`: per-field and per-file settings

use std::fmt;

use crate::error::FlatpackError;
use crate::metadata::MetaData;

mod delimited;
mod fixed_width;

pub use delimited::DelimitedDecoder;
use delimited::Tokenizer;
pub use fixed_width::FixedWidthDecoder;

/// Layout family of a flat file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Fields separated by a delimiter byte
    Delimited,
    /// Fields sliced by declared byte widths
    FixedWidth,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Delimited => write!(f, "delimited"),
            FormatKind::FixedWidth => write!(f, "fixed-width"),
        }
    }
}

impl FormatKind {
    /// Parse a format kind from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "delimited" | "csv" | "dsv" => Some(FormatKind::Delimited),
            "fixed" | "fixed-width" | "fixed_width" | "fixedwidth" => Some(FormatKind::FixedWidth),
            _ => None,
        }
    }
}

/// Whether the first line of the file is a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Every line is data
    None,
    /// The first non-empty line is a header. It supplies the column names
    /// when none were given, and is skipped otherwise.
    #[default]
    FirstLine,
}

/// Leading/trailing whitespace handling applied to every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitespacePolicy {
    pub preserve_leading: bool,
    pub preserve_trailing: bool,
}

impl Default for WhitespacePolicy {
    fn default() -> Self {
        Self {
            preserve_leading: true,
            preserve_trailing: false,
        }
    }
}

impl WhitespacePolicy {
    pub fn apply(&self, field: &str) -> String {
        let mut s = field;
        if !self.preserve_leading {
            s = s.trim_start();
        }
        if !self.preserve_trailing {
            s = s.trim_end();
        }
        s.to_string()
    }
}

/// Result of decoding one line against the bound columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Blank line, or every field is whitespace only
    Empty,
    /// Exactly one value per column
    Fields(Vec<String>),
    /// The line ran out before every column was filled
    TooFew(Vec<String>),
    /// More data than columns; the vector holds all of it
    TooMany(Vec<String>),
    /// The segment for `column` could not be sliced out of the line.
    /// `fields` holds the columns decoded before it.
    BadSegment { column: usize, fields: Vec<String> },
}

/// The decoder for a file, chosen once when the parser is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDecoder {
    Delimited(DelimitedDecoder),
    FixedWidth(FixedWidthDecoder),
}

impl RowDecoder {
    pub fn kind(&self) -> FormatKind {
        match self {
            RowDecoder::Delimited(_) => FormatKind::Delimited,
            RowDecoder::FixedWidth(_) => FormatKind::FixedWidth,
        }
    }

    /// Decode one line (without its terminator).
    pub fn decode(&self, line: &str, metadata: &MetaData, ws: WhitespacePolicy) -> DecodeOutcome {
        match self {
            RowDecoder::Delimited(d) => d.decode(line, metadata.len(), ws),
            RowDecoder::FixedWidth(d) => d.decode(line, metadata, ws),
        }
    }

    pub fn header_policy(&self) -> HeaderPolicy {
        match self {
            RowDecoder::Delimited(d) => d.header,
            RowDecoder::FixedWidth(_) => HeaderPolicy::None,
        }
    }

    /// Column names read from a header line.
    pub fn header_fields(&self, line: &str) -> Vec<String> {
        match self {
            RowDecoder::Delimited(d) => d
                .split(line)
                .into_iter()
                .map(|f| f.trim().to_string())
                .collect(),
            RowDecoder::FixedWidth(_) => line.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Check the decoder settings against the bound columns.
    pub(crate) fn validate(&self, metadata: &MetaData) -> Result<(), FlatpackError> {
        match self {
            RowDecoder::Delimited(d) => d.validate(),
            RowDecoder::FixedWidth(d) => d.validate(metadata),
        }
    }
}

/// A [`RowDecoder`] prepared for the lines of one source.
///
/// Delimited layouts keep one configured tokenizer for the whole parse.
#[derive(Debug)]
pub(crate) struct LineDecoder<'d> {
    decoder: &'d RowDecoder,
    tokenizer: Option<Tokenizer>,
}

impl<'d> LineDecoder<'d> {
    pub(crate) fn new(decoder: &'d RowDecoder) -> Self {
        let tokenizer = match decoder {
            RowDecoder::Delimited(d) => Some(Tokenizer::new(d)),
            RowDecoder::FixedWidth(_) => None,
        };
        Self { decoder, tokenizer }
    }

    pub(crate) fn decode(
        &mut self,
        line: &str,
        metadata: &MetaData,
        ws: WhitespacePolicy,
    ) -> DecodeOutcome {
        match (self.decoder, &mut self.tokenizer) {
            (RowDecoder::Delimited(d), Some(t)) => d.decode_with(t, line, metadata.len(), ws),
            (decoder, _) => decoder.decode(line, metadata, ws),
        }
    }

    pub(crate) fn header_fields(&mut self, line: &str) -> Vec<String> {
        match &mut self.tokenizer {
            Some(t) => t.split(line).iter().map(|f| f.trim().to_string()).collect(),
            None => self.decoder.header_fields(line),
        }
    }
}

impl Default for RowDecoder {
    fn default() -> Self {
        RowDecoder::Delimited(DelimitedDecoder::default())
    }
}
