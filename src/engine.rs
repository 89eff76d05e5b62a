//! The parse engine: drives a source line by line through a row decoder.

use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{ParserOptions, SevereRowPolicy, SourceSpec};
use crate::dataset::{DataSet, Row, StreamingDataSet};
use crate::error::{DataError, ErrorLog, FlatpackError, Severity, Stage};
use crate::format::{DecodeOutcome, FormatKind, HeaderPolicy, LineDecoder, RowDecoder};
use crate::io::{CloseList, InputProvider};
use crate::metadata::{ColumnDef, MetaData};

/// A reader handed over by the caller. It is never closed by the parser.
struct CallerReader {
    id: String,
    reader: BufReader<Box<dyn Read + Send>>,
    consumed: bool,
}

/// Metadata-driven flat-file parser.
///
/// A parser is built once with [`ParserBuilder`](crate::ParserBuilder) and
/// parses one source into one [`DataSet`]. Options are fixed at
/// construction.
pub struct Parser {
    options: ParserOptions,
    decoder: RowDecoder,
    columns: Vec<ColumnDef>,
    provider: Option<Arc<dyn InputProvider>>,
    caller: Option<CallerReader>,
    metadata: Option<Arc<MetaData>>,
    readers_to_close: CloseList,
    active: Option<usize>,
    initialised: bool,
}

impl Parser {
    /// Create a new parser.
    pub fn new(
        options: ParserOptions,
        decoder: RowDecoder,
        columns: Vec<ColumnDef>,
        source: SourceSpec,
    ) -> Self {
        debug!(source = source.id(), tracked = source.is_tracked(), "creating parser");
        let (provider, caller) = match source {
            SourceSpec::Provider(p) => (Some(p), None),
            SourceSpec::Reader { id, reader } => (
                None,
                Some(CallerReader {
                    id,
                    reader: BufReader::new(reader),
                    consumed: false,
                }),
            ),
        };
        Self {
            options,
            decoder,
            columns,
            provider,
            caller,
            metadata: None,
            readers_to_close: CloseList::new(),
            active: None,
            initialised: false,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn format(&self) -> FormatKind {
        self.decoder.kind()
    }

    pub fn decoder(&self) -> &RowDecoder {
        &self.decoder
    }

    /// Registry bound by the last parse, if any.
    pub fn metadata(&self) -> Option<&Arc<MetaData>> {
        self.metadata.as_ref()
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn source_id(&self) -> &str {
        match (&self.provider, &self.caller) {
            (Some(p), _) => p.id(),
            (None, Some(c)) => &c.id,
            (None, None) => "",
        }
    }

    /// Parse the whole source into a table.
    ///
    /// The first call validates the configuration, opens the source and
    /// binds the column metadata. Calling again without [`reset`](Self::reset)
    /// yields an empty table carrying one severe "source already consumed"
    /// error.
    pub fn parse(&mut self) -> Result<DataSet, FlatpackError> {
        if !self.initialised {
            if let Err(e) = self.init() {
                self.close_readers();
                return Err(e);
            }
        }
        let result = self.do_parse();
        self.close_readers();
        result
    }

    /// Parse eagerly and wrap the table in a pull-based view.
    pub fn parse_as_stream(&mut self) -> Result<StreamingDataSet, FlatpackError> {
        self.parse().map(StreamingDataSet::new)
    }

    /// Allow the next `parse` to start over.
    ///
    /// Provider-backed sources are reopened from the beginning. A reader
    /// supplied by the caller cannot be rewound and stays consumed.
    pub fn reset(&mut self) {
        self.close_readers();
        self.initialised = false;
        self.metadata = None;
    }

    /// Hand a caller-supplied reader back.
    pub fn take_caller_reader(&mut self) -> Option<Box<dyn Read + Send>> {
        self.caller.take().map(|c| c.reader.into_inner())
    }

    fn init(&mut self) -> Result<(), FlatpackError> {
        if self.columns.is_empty() {
            if self.decoder.header_policy() == HeaderPolicy::None {
                return Err(FlatpackError::MissingMetadata);
            }
            self.decoder.validate(&MetaData::default())?;
        } else {
            let md = MetaData::new(self.columns.iter().cloned(), self.options.name_rules())?;
            self.decoder.validate(&md)?;
            debug!(columns = md.len(), format = %self.decoder.kind(), "bound column metadata");
            self.metadata = Some(Arc::new(md));
        }

        if let Some(provider) = &self.provider {
            let slot = self.readers_to_close.open(provider.as_ref())?;
            self.active = Some(slot);
        }

        self.initialised = true;
        Ok(())
    }

    fn do_parse(&mut self) -> Result<DataSet, FlatpackError> {
        let Self {
            options,
            decoder,
            caller,
            metadata,
            readers_to_close,
            active,
            provider,
            ..
        } = self;

        let tracked = match *active {
            Some(slot) => readers_to_close.get_mut(slot),
            None => None,
        };
        let (id, reader): (&str, &mut dyn BufRead) = match (tracked, caller) {
            (Some(reader), _) => (provider.as_ref().map_or("", |p| p.id()), reader),
            (None, Some(c)) if !c.consumed => {
                c.consumed = true;
                (c.id.as_str(), &mut c.reader as &mut dyn BufRead)
            }
            _ => return Ok(exhausted(options, metadata.as_ref())),
        };

        debug!(source = id, "parsing");
        let mut lines = LineReader::new(id, reader);
        let table = RowAssembler::new(options, decoder).run(&mut lines, metadata)?;
        info!(
            source = id,
            rows = table.len(),
            errors = table.errors().len(),
            lines = lines.line_no,
            "parse complete"
        );
        Ok(table)
    }

    fn close_readers(&mut self) {
        self.active = None;
        self.readers_to_close.close_all();
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("source", &self.source_id())
            .field("format", &self.decoder.kind())
            .field("options", &self.options)
            .field("initialised", &self.initialised)
            .finish()
    }
}

fn exhausted(options: &ParserOptions, metadata: Option<&Arc<MetaData>>) -> DataSet {
    let mut errors = ErrorLog::new(options.ignore_parse_warnings);
    errors.record(DataError::new(
        "source already consumed; reset the parser to parse again",
        0,
        Severity::Severe,
    ));
    let metadata = metadata.cloned().unwrap_or_default();
    DataSet::from_parts(metadata, Vec::new(), errors)
}

/// Pulls terminator-stripped lines and counts them.
struct LineReader<'r> {
    id: &'r str,
    reader: &'r mut dyn BufRead,
    buf: Vec<u8>,
    line_no: usize,
}

impl<'r> LineReader<'r> {
    fn new(id: &'r str, reader: &'r mut dyn BufRead) -> Self {
        Self {
            id,
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, FlatpackError> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| FlatpackError::io(Stage::Read, self.id, e))?;
        if n == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        let line = match std::str::from_utf8(&self.buf) {
            Ok(s) => s.to_owned(),
            Err(_) => {
                warn!(source = self.id, line = self.line_no, "invalid UTF-8, decoding lossily");
                String::from_utf8_lossy(&self.buf).into_owned()
            }
        };
        Ok(Some(line))
    }
}

/// Turns decode outcomes into rows and errors according to the options.
struct RowAssembler<'a> {
    options: &'a ParserOptions,
    decoder: LineDecoder<'a>,
    header: HeaderPolicy,
    rows: Vec<Row>,
    errors: ErrorLog,
}

impl<'a> RowAssembler<'a> {
    fn new(options: &'a ParserOptions, decoder: &'a RowDecoder) -> Self {
        Self {
            options,
            decoder: LineDecoder::new(decoder),
            header: decoder.header_policy(),
            rows: Vec::new(),
            errors: ErrorLog::new(options.ignore_parse_warnings),
        }
    }

    fn run(
        mut self,
        lines: &mut LineReader<'_>,
        metadata: &mut Option<Arc<MetaData>>,
    ) -> Result<DataSet, FlatpackError> {
        let ws = self.options.whitespace();
        let mut header_pending = self.header == HeaderPolicy::FirstLine;

        while let Some(line) = lines.next_line()? {
            let line_no = lines.line_no;

            if header_pending && !line.trim().is_empty() {
                header_pending = false;
                if metadata.is_some() {
                    debug!(line = line_no, "skipping header line");
                } else {
                    let names = self.decoder.header_fields(&line);
                    let md = MetaData::new(names, self.options.name_rules())?;
                    debug!(columns = md.len(), "column metadata read from header");
                    *metadata = Some(Arc::new(md));
                }
                continue;
            }

            let Some(md) = metadata.as_deref() else {
                // blank lines ahead of the header
                self.assemble(DecodeOutcome::Empty, &line, line_no, &MetaData::default());
                continue;
            };
            let outcome = self.decoder.decode(&line, md, ws);
            self.assemble(outcome, &line, line_no, md);
        }

        let metadata = metadata.clone().unwrap_or_default();
        Ok(DataSet::from_parts(metadata, self.rows, self.errors))
    }

    fn assemble(&mut self, outcome: DecodeOutcome, line: &str, line_no: usize, md: &MetaData) {
        let expected = md.len();
        match outcome {
            DecodeOutcome::Empty => {
                if self.options.flag_empty_rows {
                    self.raise(DataError::new("empty row", line_no, Severity::Warning), line);
                } else {
                    debug!(line = line_no, "skipping empty row");
                }
            }
            DecodeOutcome::Fields(fields) => self.push_row(fields, line, line_no, expected),
            DecodeOutcome::TooFew(fields) => {
                if self.options.handling_short_lines {
                    self.push_row(fields, line, line_no, expected);
                    return;
                }
                let got = fields.len();
                let mut err = DataError::new(
                    format!("line too short: {got} of {expected} columns present"),
                    line_no,
                    Severity::Severe,
                );
                if let (Some(value), Some(col)) =
                    (fields.last(), got.checked_sub(1).and_then(|i| md.column(i)))
                {
                    err = err.with_last_column(col.name(), Some(value.as_str()));
                }
                self.raise(err, line);
                if self.options.severe_rows == SevereRowPolicy::Placeholder {
                    self.push_row(fields, line, line_no, expected);
                }
            }
            DecodeOutcome::TooMany(fields) => {
                if !self.options.ignore_extra_columns {
                    let err = DataError::new(
                        format!(
                            "too many columns: expected {expected}, got {}",
                            fields.len()
                        ),
                        line_no,
                        Severity::Error,
                    );
                    self.raise(err, line);
                }
                self.push_row(fields, line, line_no, expected);
            }
            DecodeOutcome::BadSegment { column, fields } => {
                let name = md.column(column).map_or("?", |c| c.name());
                let err = DataError::new(
                    format!("column '{name}' does not end on a character boundary"),
                    line_no,
                    Severity::Severe,
                );
                self.raise(err, line);
                if self.options.severe_rows == SevereRowPolicy::Placeholder {
                    self.push_partial_row(fields, line, line_no, expected);
                }
            }
        }
    }

    /// Store a row, padding missing trailing values with empty strings.
    fn push_row(&mut self, mut fields: Vec<String>, line: &str, line_no: usize, expected: usize) {
        fields.resize(expected, String::new());
        let values = self.values(fields);
        self.store(values, line, line_no);
    }

    /// Store a row whose trailing columns could not be decoded; they are absent.
    fn push_partial_row(&mut self, fields: Vec<String>, line: &str, line_no: usize, expected: usize) {
        let mut values = self.values(fields);
        values.resize(expected, None);
        self.store(values, line, line_no);
    }

    fn values(&self, fields: Vec<String>) -> Vec<Option<String>> {
        let null_empty = self.options.null_empty_strings;
        fields
            .into_iter()
            .map(|v| if null_empty && v.is_empty() { None } else { Some(v) })
            .collect()
    }

    fn store(&mut self, values: Vec<Option<String>>, line: &str, line_no: usize) {
        let raw = self
            .options
            .store_raw_data_to_data_set
            .then(|| line.to_string());
        self.rows.push(Row::new(line_no, values, raw));
    }

    fn raise(&mut self, error: DataError, line: &str) {
        let error = if self.options.store_raw_data_to_data_error {
            error.with_raw_data(Some(line))
        } else {
            error
        };
        if error.severity() == Severity::Severe {
            warn!(line = error.line_no(), "{}", error.description());
        }
        self.errors.record(error);
    }
}
