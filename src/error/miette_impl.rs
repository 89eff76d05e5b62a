//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity as MietteSeverity};
use thiserror::Error;

use super::{DataError, FlatpackError, Severity};

/// A diagnostic wrapper for parse failures compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct FlatpackDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: MietteSeverity,
}

impl From<FlatpackError> for FlatpackDiagnostic {
    fn from(e: FlatpackError) -> Self {
        let help = match &e {
            FlatpackError::Io { .. } => "Check that the source exists and is readable",
            FlatpackError::DuplicateColumn { .. } => {
                "Rename the column or enable add_suffix_to_duplicate_column_names"
            }
            FlatpackError::Configuration(_) => "Check the delimiter, qualifier and column widths",
            FlatpackError::MissingMetadata => "Supply columns or use HeaderPolicy::FirstLine",
            FlatpackError::Options(_) => "Check the option names and value types",
        };
        FlatpackDiagnostic {
            message: format!("[{}] parse aborted", e.stage()),
            source: Some(Box::new(e)),
            help: Some(help.into()),
            severity: MietteSeverity::Error,
        }
    }
}

impl From<&DataError> for FlatpackDiagnostic {
    fn from(e: &DataError) -> Self {
        let severity = match e.severity() {
            Severity::Warning => MietteSeverity::Warning,
            Severity::Error | Severity::Severe => MietteSeverity::Error,
        };
        FlatpackDiagnostic {
            message: e.to_string(),
            source: None,
            help: e.raw_data().map(|raw| format!("raw line: {raw}")),
            severity,
        }
    }
}

impl From<FlatpackError> for miette::Report {
    fn from(e: FlatpackError) -> Self {
        miette::Report::new(FlatpackDiagnostic::from(e))
    }
}
