//! Tests for severities and the error log.

use crate::error::{DataError, ErrorLog, FlatpackError, Severity, Stage};

fn sample_log() -> ErrorLog {
    let mut log = ErrorLog::new(false);
    log.record(DataError::new("empty row", 2, Severity::Warning));
    log.record(DataError::new("too many columns", 4, Severity::Error));
    log.record(DataError::new("line too short", 7, Severity::Severe));
    log.record(DataError::new("empty row", 9, Severity::Warning));
    log
}

#[test]
fn severities_are_ordered_by_level() {
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Severe);
    assert_eq!(Severity::Severe.level(), 3);
    assert_eq!(Severity::from_level(2), Some(Severity::Error));
    assert_eq!(Severity::from_level(0), None);
    assert_eq!(Severity::from_level(4), None);
}

#[test]
fn log_keeps_raise_order() {
    let log = sample_log();
    let lines: Vec<usize> = log.iter().map(DataError::line_no).collect();
    assert_eq!(lines, vec![2, 4, 7, 9]);
}

#[test]
fn at_least_filters_by_severity() {
    let log = sample_log();

    assert_eq!(log.at_least(Severity::Warning).count(), 4);
    let serious: Vec<&str> = log
        .at_least(Severity::Error)
        .map(DataError::description)
        .collect();
    assert_eq!(serious, vec!["too many columns", "line too short"]);

    assert!(log.has_at_least(Severity::Severe));
    assert_eq!(log.count(Severity::Warning), 2);
    assert_eq!(log.count(Severity::Severe), 1);
}

#[test]
fn warnings_only_log_has_no_errors() {
    let mut log = ErrorLog::new(false);
    log.record(DataError::new("empty row", 1, Severity::Warning));

    assert!(!log.has_at_least(Severity::Error));
    assert!(log.has_at_least(Severity::Warning));
}

#[test]
fn suppressed_warnings_are_never_stored() {
    let mut log = ErrorLog::new(true);

    assert!(!log.record(DataError::new("empty row", 1, Severity::Warning)));
    assert!(log.record(DataError::new("too many columns", 2, Severity::Error)));

    assert_eq!(log.len(), 1);
    assert!(log.suppresses_warnings());
    assert_eq!(log.count(Severity::Warning), 0);
}

#[test]
fn error_lines_are_queryable() {
    let log = sample_log();

    assert!(log.is_error_line(4));
    assert!(!log.is_error_line(5));
    assert_eq!(log.for_line(7).count(), 1);
    assert_eq!((&log).into_iter().count(), 4);
}

#[test]
fn data_error_display_names_last_column() {
    let err = DataError::new("line too short: 1 of 2 columns present", 3, Severity::Severe)
        .with_last_column("A", Some("4"));

    assert_eq!(
        err.to_string(),
        "line 3 [severe]: line too short: 1 of 2 columns present (last column 'A' = '4')"
    );
    assert_eq!(
        DataError::new("empty row", 5, Severity::Warning).to_string(),
        "line 5 [warning]: empty row"
    );
}

#[test]
fn data_error_serializes_severity_as_level() {
    let err = DataError::new("too many columns", 2, Severity::Error).with_raw_data(Some("1,2,3"));
    let value = serde_json::to_value(&err).expect("serialize");

    assert_eq!(value["severity"], 2);
    assert_eq!(value["line_no"], 2);
    assert_eq!(value["raw_data"], "1,2,3");
    assert!(value["last_column"].is_null());
}

#[test]
fn fatal_errors_report_their_stage() {
    let io = FlatpackError::io(
        Stage::Open,
        "data.txt",
        std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    );
    assert_eq!(io.stage(), Stage::Open);
    assert!(io.to_string().contains("data.txt"));

    assert_eq!(FlatpackError::MissingMetadata.stage(), Stage::BindMetadata);
    assert_eq!(
        FlatpackError::configuration("bad").stage(),
        Stage::Configure
    );
}
