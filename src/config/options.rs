//! Parser options.

use serde::Deserialize;

#[cfg(any(feature = "json", feature = "yaml"))]
use crate::error::FlatpackError;
use crate::format::WhitespacePolicy;
use crate::metadata::NameRules;

/// What to do with a row that raised a severity-3 error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SevereRowPolicy {
    /// Leave the row out of the table
    #[default]
    Omit,
    /// Keep the row, padding missing values
    Placeholder,
}

impl SevereRowPolicy {
    /// Parse a policy from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "omit" => Some(SevereRowPolicy::Omit),
            "placeholder" => Some(SevereRowPolicy::Placeholder),
            _ => None,
        }
    }
}

/// Row-level parsing options.
///
/// Built once (directly, through [`ParserBuilder`](crate::ParserBuilder),
/// or deserialized from a document) and then moved into the
/// [`Parser`](crate::Parser). The parser never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Pad rows with too few fields instead of flagging them severe
    pub handling_short_lines: bool,
    /// Drop extra fields instead of raising an error
    pub ignore_extra_columns: bool,
    pub preserve_leading_whitespace: bool,
    pub preserve_trailing_whitespace: bool,
    pub column_names_case_sensitive: bool,
    /// Drop severity-1 errors before they reach the log
    pub ignore_parse_warnings: bool,
    /// Store zero-length values as absent
    pub null_empty_strings: bool,
    /// Record a warning for each empty row instead of skipping silently
    pub flag_empty_rows: bool,
    pub store_raw_data_to_data_error: bool,
    pub store_raw_data_to_data_set: bool,
    pub add_suffix_to_duplicate_column_names: bool,
    /// Label for database-backed descriptors; passed through
    pub data_file_table: String,
    /// Label for database-backed descriptors; passed through
    pub data_structure_table: String,
    pub severe_rows: SevereRowPolicy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            handling_short_lines: false,
            ignore_extra_columns: false,
            preserve_leading_whitespace: true,
            preserve_trailing_whitespace: false,
            column_names_case_sensitive: false,
            ignore_parse_warnings: false,
            null_empty_strings: false,
            flag_empty_rows: false,
            store_raw_data_to_data_error: false,
            store_raw_data_to_data_set: false,
            add_suffix_to_duplicate_column_names: false,
            data_file_table: "DATAFILE".to_string(),
            data_structure_table: "DATASTRUCTURE".to_string(),
            severe_rows: SevereRowPolicy::Omit,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn whitespace(&self) -> WhitespacePolicy {
        WhitespacePolicy {
            preserve_leading: self.preserve_leading_whitespace,
            preserve_trailing: self.preserve_trailing_whitespace,
        }
    }

    pub fn name_rules(&self) -> NameRules {
        NameRules::new(
            self.column_names_case_sensitive,
            self.add_suffix_to_duplicate_column_names,
        )
    }

    /// Load options from a JSON document. Missing keys keep their defaults.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, FlatpackError> {
        serde_json::from_str(s).map_err(|e| FlatpackError::Options(e.to_string()))
    }

    /// Load options from a YAML document. Missing keys keep their defaults.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, FlatpackError> {
        serde_yaml::from_str(s).map_err(|e| FlatpackError::Options(e.to_string()))
    }
}
