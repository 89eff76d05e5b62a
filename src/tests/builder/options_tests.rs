//! Tests for ParserOptions defaults and loading.

use crate::config::{ParserOptions, SevereRowPolicy};
use crate::format::WhitespacePolicy;

#[test]
fn defaults() {
    let o = ParserOptions::default();

    assert!(o.preserve_leading_whitespace);
    assert!(!o.preserve_trailing_whitespace);
    assert!(!o.handling_short_lines);
    assert!(!o.column_names_case_sensitive);
    assert_eq!(o.data_file_table, "DATAFILE");
    assert_eq!(o.data_structure_table, "DATASTRUCTURE");
    assert_eq!(o.severe_rows, SevereRowPolicy::Omit);
    assert_eq!(o.whitespace(), WhitespacePolicy::default());
}

#[test]
fn derived_policies_follow_flags() {
    let o = ParserOptions {
        column_names_case_sensitive: true,
        add_suffix_to_duplicate_column_names: true,
        preserve_leading_whitespace: false,
        ..ParserOptions::default()
    };

    let rules = o.name_rules();
    assert!(rules.case_sensitive);
    assert!(rules.add_suffix);
    assert!(!o.whitespace().preserve_leading);
}

#[test]
fn severe_row_policy_from_str() {
    assert_eq!(
        SevereRowPolicy::from_str("Placeholder"),
        Some(SevereRowPolicy::Placeholder)
    );
    assert_eq!(SevereRowPolicy::from_str("omit"), Some(SevereRowPolicy::Omit));
    assert_eq!(SevereRowPolicy::from_str("drop"), None);
}

#[test]
fn partial_documents_keep_defaults() {
    let json = r#"{"handling_short_lines": true, "severe_rows": "placeholder"}"#;
    let o: ParserOptions = serde_json::from_str(json).expect("valid options");

    assert!(o.handling_short_lines);
    assert_eq!(o.severe_rows, SevereRowPolicy::Placeholder);
    assert!(o.preserve_leading_whitespace);
    assert_eq!(o.data_file_table, "DATAFILE");
}

#[cfg(feature = "json")]
#[test]
fn from_json_str_reports_bad_documents() {
    use crate::error::FlatpackError;

    let o = ParserOptions::from_json_str(r#"{"null_empty_strings": true}"#).expect("valid");
    assert!(o.null_empty_strings);

    let err = ParserOptions::from_json_str(r#"{"null_empty_strings": "yes"}"#).unwrap_err();
    assert!(matches!(err, FlatpackError::Options(_)));
}

#[cfg(feature = "yaml")]
#[test]
fn from_yaml_str_loads_options() {
    let yaml = "ignore_extra_columns: true\ndata_file_table: FILES\n";
    let o = ParserOptions::from_yaml_str(yaml).expect("valid");

    assert!(o.ignore_extra_columns);
    assert_eq!(o.data_file_table, "FILES");
    assert!(!o.handling_short_lines);
}
