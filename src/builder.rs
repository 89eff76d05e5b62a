//! Builder for creating Parser instances.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ParserOptions, SevereRowPolicy, SourceSpec};
use crate::engine::Parser;
use crate::error::FlatpackError;
use crate::format::{
    DelimitedDecoder, FixedWidthDecoder, FormatKind, HeaderPolicy, RowDecoder,
};
use crate::io::{FileInput, InMemorySource, InputProvider, StdinInput};
use crate::metadata::ColumnDef;

/// Collects the layout, columns, options and source for a [`Parser`].
///
/// Everything is fixed when [`build`](Self::build) is called; the parser
/// offers no way to change it afterwards.
#[derive(Debug)]
pub struct ParserBuilder {
    options: ParserOptions,
    decoder: RowDecoder,
    columns: Vec<ColumnDef>,
    source: Option<SourceSpec>,
}

impl ParserBuilder {
    pub fn new(decoder: RowDecoder) -> Self {
        Self {
            options: ParserOptions::default(),
            decoder,
            columns: Vec::new(),
            source: None,
        }
    }

    /// Delimited layout with the given separator, `"` qualifier and a
    /// header line.
    pub fn delimited(delimiter: u8) -> Self {
        Self::new(RowDecoder::Delimited(DelimitedDecoder::new(delimiter)))
    }

    /// Comma-separated layout.
    pub fn csv() -> Self {
        Self::delimited(b',')
    }

    pub fn fixed_width() -> Self {
        Self::new(RowDecoder::FixedWidth(FixedWidthDecoder::new()))
    }

    pub fn for_format(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Delimited => Self::csv(),
            FormatKind::FixedWidth => Self::fixed_width(),
        }
    }

    /// Change the delimiter. No effect on fixed-width layouts.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        if let RowDecoder::Delimited(d) = &mut self.decoder {
            d.delimiter = delimiter;
        }
        self
    }

    /// Change or remove the text qualifier. No effect on fixed-width layouts.
    pub fn qualifier(mut self, qualifier: Option<u8>) -> Self {
        if let RowDecoder::Delimited(d) = &mut self.decoder {
            d.qualifier = qualifier;
        }
        self
    }

    /// Set the header policy. Fixed-width layouts never have a header.
    pub fn header(mut self, header: HeaderPolicy) -> Self {
        if let RowDecoder::Delimited(d) = &mut self.decoder {
            d.header = header;
        }
        self
    }

    pub fn column(mut self, column: impl Into<ColumnDef>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnDef>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Replace the whole option set.
    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn handling_short_lines(mut self, value: bool) -> Self {
        self.options.handling_short_lines = value;
        self
    }

    pub fn ignore_extra_columns(mut self, value: bool) -> Self {
        self.options.ignore_extra_columns = value;
        self
    }

    pub fn preserve_leading_whitespace(mut self, value: bool) -> Self {
        self.options.preserve_leading_whitespace = value;
        self
    }

    pub fn preserve_trailing_whitespace(mut self, value: bool) -> Self {
        self.options.preserve_trailing_whitespace = value;
        self
    }

    pub fn column_names_case_sensitive(mut self, value: bool) -> Self {
        self.options.column_names_case_sensitive = value;
        self
    }

    pub fn ignore_parse_warnings(mut self, value: bool) -> Self {
        self.options.ignore_parse_warnings = value;
        self
    }

    pub fn null_empty_strings(mut self, value: bool) -> Self {
        self.options.null_empty_strings = value;
        self
    }

    pub fn flag_empty_rows(mut self, value: bool) -> Self {
        self.options.flag_empty_rows = value;
        self
    }

    pub fn store_raw_data_to_data_error(mut self, value: bool) -> Self {
        self.options.store_raw_data_to_data_error = value;
        self
    }

    pub fn store_raw_data_to_data_set(mut self, value: bool) -> Self {
        self.options.store_raw_data_to_data_set = value;
        self
    }

    pub fn add_suffix_to_duplicate_column_names(mut self, value: bool) -> Self {
        self.options.add_suffix_to_duplicate_column_names = value;
        self
    }

    pub fn data_file_table(mut self, table: impl Into<String>) -> Self {
        self.options.data_file_table = table.into();
        self
    }

    pub fn data_structure_table(mut self, table: impl Into<String>) -> Self {
        self.options.data_structure_table = table.into();
        self
    }

    pub fn severe_rows(mut self, policy: SevereRowPolicy) -> Self {
        self.options.severe_rows = policy;
        self
    }

    /// Read from a file the parser opens and closes itself.
    pub fn source_path(self, path: impl Into<PathBuf>) -> Self {
        self.source_provider(Arc::new(FileInput::new(path)))
    }

    pub fn source_text(self, text: impl Into<String>) -> Self {
        self.source_provider(Arc::new(InMemorySource::from_string("<text>", text)))
    }

    pub fn source_bytes(self, bytes: Vec<u8>) -> Self {
        self.source_provider(Arc::new(InMemorySource::new("<bytes>", bytes)))
    }

    pub fn source_stdin(self) -> Self {
        self.source_provider(Arc::new(StdinInput::new()))
    }

    pub fn source_provider(mut self, provider: Arc<dyn InputProvider>) -> Self {
        self.source = Some(SourceSpec::Provider(provider));
        self
    }

    /// Read from an already open reader. The parser never closes it; get
    /// it back with [`Parser::take_caller_reader`].
    pub fn source_reader<R>(mut self, id: impl Into<String>, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        self.source = Some(SourceSpec::Reader {
            id: id.into(),
            reader: Box::new(reader),
        });
        self
    }

    pub fn build(self) -> Result<Parser, FlatpackError> {
        let source = self
            .source
            .ok_or_else(|| FlatpackError::configuration("no source given"))?;
        Ok(Parser::new(self.options, self.decoder, self.columns, source))
    }
}

impl Default for ParserBuilder {
    fn default() -> Self {
        ParserBuilder::csv()
    }
}
