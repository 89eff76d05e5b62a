//! # flatpack
//!
//! A metadata-driven parser for delimited and fixed-width flat files.
//!
//! ## Overview
//!
//! flatpack provides:
//! - **Metadata-driven parsing**: column definitions are supplied by the caller
//!   (or read from a header line), never inferred from the data
//! - **Two layouts**: delimited (with an optional text qualifier) and fixed-width
//! - **Forgiving rows**: malformed rows become `DataError`s with a severity
//!   (1 warning, 2 error, 3 severe) instead of aborting the parse
//! - **Parse once, consume many ways**: a materialized `DataSet` or a
//!   pull-based `StreamingDataSet` over it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flatpack::{ParserBuilder, Severity};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut parser = ParserBuilder::csv()
//!         .columns(["ACCOUNT", "AMOUNT"])
//!         .handling_short_lines(true)
//!         .source_path("payments.csv")
//!         .build()?;
//!
//!     let table = parser.parse()?;
//!     if table.has_errors_at_least(Severity::Error) {
//!         for e in table.errors().at_least(Severity::Error) {
//!             eprintln!("{e}");
//!         }
//!     }
//!     for record in table.records() {
//!         println!("{:?}", record.get("amount")?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `json` - load `ParserOptions` from JSON documents
//! - `yaml` - load `ParserOptions` from YAML documents
//! - `miette` - Pretty error reporting with miette
//!
//! ## Row handling
//!
//! Each line goes through the row decoder and then through these rules:
//! - an empty row is skipped; with `flag_empty_rows` it raises a warning.
//!   This check runs before the short-line check.
//! - a short row is padded when `handling_short_lines` is set, otherwise it
//!   raises a severe error and is omitted (or padded, per `severe_rows`)
//! - a long row is truncated; unless `ignore_extra_columns` is set it also
//!   raises an error
//! - with `null_empty_strings`, zero-length values are stored as `None`
//!
//! Only a failure to open or read the source, or a contradictory
//! configuration, ends a parse with `Err`.

// Core modules
pub mod builder;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod format;
pub mod io;
pub mod metadata;

// Re-exports for convenience
pub use builder::ParserBuilder;
pub use config::{ParserOptions, SevereRowPolicy, SourceSpec};
pub use dataset::{DataSet, Record, Records, Row, StreamingDataSet};
pub use engine::Parser;
pub use error::{DataError, ErrorLog, FlatpackError, LookupError, Severity, Stage};
pub use format::{
    DecodeOutcome, DelimitedDecoder, FixedWidthDecoder, FormatKind, HeaderPolicy, RowDecoder,
    WhitespacePolicy,
};
pub use io::{FileInput, InMemorySource, InputProvider, StdinInput};
pub use metadata::{ColumnDef, ColumnMetaData, MetaData, NameRules};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::FlatpackDiagnostic;
