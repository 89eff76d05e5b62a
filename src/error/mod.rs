//! Error types for flatpack parsing.
//!
//! This module provides:
//! - `FlatpackError`: fatal failures that abort a parse
//! - `Stage`: Indicates where a fatal failure occurred
//! - `LookupError`: failed column/row lookups against a parsed table
//! - `Severity` / `DataError`: row-level anomalies recorded during a parse
//! - `ErrorLog`: the ordered collection of `DataError`s

use std::fmt;

use serde::Serialize;
use thiserror::Error;

mod log;

pub use log::ErrorLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Validating options and format settings
    Configure,
    /// Error while opening the source
    Open,
    /// Error while pulling lines from an open source
    Read,
    /// Building the column registry
    BindMetadata,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Configure => write!(f, "Configure"),
            Stage::Open => write!(f, "Open"),
            Stage::Read => write!(f, "Read"),
            Stage::BindMetadata => write!(f, "BindMetadata"),
        }
    }
}

/// A failure that aborts the whole parse.
///
/// Malformed rows never produce one of these; they end up in the
/// [`ErrorLog`] of the returned table instead.
#[derive(Debug, Error)]
pub enum FlatpackError {
    /// The source could not be opened or read
    #[error("[{stage}] {target}: {source}")]
    Io {
        stage: Stage,
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Two columns normalize to the same lookup key and suffixing is off
    #[error("duplicate column name '{name}' at positions {first} and {second}")]
    DuplicateColumn {
        name: String,
        first: usize,
        second: usize,
    },

    /// Options and format settings contradict each other
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No columns were supplied and no header line is available
    #[error("no column metadata: supply column definitions or read them from a header line")]
    MissingMetadata,

    /// An options document could not be deserialized
    #[error("invalid options document: {0}")]
    Options(String),
}

impl FlatpackError {
    pub(crate) fn io(stage: Stage, target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            stage,
            target: target.into(),
            source,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Stage at which the failure happened.
    pub fn stage(&self) -> Stage {
        match self {
            FlatpackError::Io { stage, .. } => *stage,
            FlatpackError::DuplicateColumn { .. } | FlatpackError::MissingMetadata => {
                Stage::BindMetadata
            }
            FlatpackError::Configuration(_) | FlatpackError::Options(_) => Stage::Configure,
        }
    }
}

/// A lookup against metadata or a parsed table that did not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column index {index} out of range ({len} columns)")]
    ColumnIndexOutOfRange { index: usize, len: usize },

    #[error("row {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}

/// Ordinal severity of a row-level anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Severity {
    /// Recoverable anomaly; may be suppressed entirely
    Warning = 1,
    /// Row shape deviates beyond tolerance; the row is still kept
    Error = 2,
    /// Row could not be decoded meaningfully
    Severe = 3,
}

impl Severity {
    /// Numeric level: 1, 2 or 3.
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            3 => Some(Severity::Severe),
            _ => None,
        }
    }
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> Self {
        s.level()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Severe => write!(f, "severe"),
        }
    }
}

/// A row-level anomaly raised while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataError {
    description: String,
    line_no: usize,
    severity: Severity,
    raw_data: Option<String>,
    last_column: Option<String>,
    last_value: Option<String>,
}

impl DataError {
    pub(crate) fn new(description: impl Into<String>, line_no: usize, severity: Severity) -> Self {
        Self {
            description: description.into(),
            line_no,
            severity,
            raw_data: None,
            last_column: None,
            last_value: None,
        }
    }

    pub(crate) fn with_raw_data(mut self, raw: Option<&str>) -> Self {
        self.raw_data = raw.map(str::to_owned);
        self
    }

    pub(crate) fn with_last_column(mut self, name: &str, value: Option<&str>) -> Self {
        self.last_column = Some(name.to_owned());
        self.last_value = value.map(str::to_owned);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 1-based physical line number the anomaly was raised on.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Original line text, when raw capture into errors is enabled.
    pub fn raw_data(&self) -> Option<&str> {
        self.raw_data.as_deref()
    }

    /// Name of the last column decoded before a short line ran out.
    pub fn last_column(&self) -> Option<&str> {
        self.last_column.as_deref()
    }

    pub fn last_value(&self) -> Option<&str> {
        self.last_value.as_deref()
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} [{}]: {}",
            self.line_no, self.severity, self.description
        )?;
        if let Some(col) = &self.last_column {
            write!(f, " (last column '{}'", col)?;
            if let Some(v) = &self.last_value {
                write!(f, " = '{}'", v)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
