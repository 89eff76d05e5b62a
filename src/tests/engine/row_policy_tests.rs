//! Tests for the per-row option rules.

use crate::config::SevereRowPolicy;
use crate::error::Severity;
use crate::{DataSet, ParserBuilder};

fn parse(builder: ParserBuilder) -> DataSet {
    builder
        .build()
        .expect("build should succeed")
        .parse()
        .expect("parse should succeed")
}

fn severities(ds: &DataSet) -> Vec<(usize, Severity)> {
    ds.errors()
        .iter()
        .map(|e| (e.line_no(), e.severity()))
        .collect()
}

#[test]
fn empty_row_is_not_a_short_line() {
    // blank and whitespace-only rows must not be flagged as severe
    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B"])
            .source_text("A,B\n1,2\n\n , \n3,4\n"),
    );

    assert_eq!(ds.len(), 2);
    assert!(ds.errors().is_empty());
    assert_eq!(ds.rows()[1].line_no(), 5);
}

#[test]
fn flagged_empty_rows_raise_warnings() {
    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B"])
            .flag_empty_rows(true)
            .source_text("A,B\n1,2\n\n3,4\n"),
    );

    assert_eq!(ds.len(), 2);
    assert_eq!(severities(&ds), vec![(3, Severity::Warning)]);
    assert!(!ds.has_errors_at_least(Severity::Error));
}

#[test]
fn ignore_parse_warnings_drops_only_warnings() {
    let text = "A,B\n\n1\n1,2,3\n";
    let builder = || {
        ParserBuilder::csv()
            .columns(["A", "B"])
            .flag_empty_rows(true)
            .source_text(text)
    };

    let noisy = parse(builder());
    assert_eq!(
        severities(&noisy),
        vec![
            (2, Severity::Warning),
            (3, Severity::Severe),
            (4, Severity::Error)
        ]
    );

    let quiet = parse(builder().ignore_parse_warnings(true));
    assert_eq!(
        severities(&quiet),
        vec![(3, Severity::Severe), (4, Severity::Error)]
    );
    assert_eq!(quiet.errors().count(Severity::Warning), 0);
}

#[test]
fn null_empty_strings_stores_absent_values() {
    let text = "A,B,C\n1,,3\n";

    let ds = parse(ParserBuilder::csv().columns(["A", "B", "C"]).source_text(text));
    assert_eq!(ds.get(0, "B"), Ok(Some("")));

    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B", "C"])
            .null_empty_strings(true)
            .source_text(text),
    );
    assert_eq!(ds.get(0, "B"), Ok(None));
    assert_eq!(ds.record(0).expect("row").get_or_empty("b"), Ok(""));
}

#[test]
fn padded_values_follow_null_empty_strings() {
    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B"])
            .handling_short_lines(true)
            .null_empty_strings(true)
            .source_text("A,B\n4\n"),
    );

    assert_eq!(ds.rows()[0].values(), &[Some("4".to_string()), None]);
}

#[test]
fn raw_data_is_captured_on_request() {
    let text = "A,B\n1,2,3\n4\n";

    let plain = parse(ParserBuilder::csv().columns(["A", "B"]).source_text(text));
    assert_eq!(plain.rows()[0].raw_data(), None);
    assert!(plain.errors().iter().all(|e| e.raw_data().is_none()));

    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B"])
            .store_raw_data_to_data_set(true)
            .store_raw_data_to_data_error(true)
            .source_text(text),
    );
    assert_eq!(ds.record(0).and_then(|r| r.raw_data()), Some("1,2,3"));
    let raws: Vec<_> = ds.errors().iter().map(|e| e.raw_data()).collect();
    assert_eq!(raws, vec![Some("1,2,3"), Some("4")]);
}

#[test]
fn severe_rows_can_be_kept_as_placeholders() {
    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B"])
            .severe_rows(SevereRowPolicy::Placeholder)
            .source_text("A,B\n4\n5,6\n"),
    );

    assert_eq!(ds.len(), 2);
    assert_eq!(ds.get(0, "A"), Ok(Some("4")));
    assert_eq!(ds.get(0, "B"), Ok(Some("")));
    assert_eq!(ds.errors().count(Severity::Severe), 1);
    assert!(ds.errors().is_error_line(2));
}

#[test]
fn whitespace_options_apply_to_every_field() {
    let text = "A,B\n  x  ,  y  \n";

    let ds = parse(ParserBuilder::csv().columns(["A", "B"]).source_text(text));
    assert_eq!(ds.get(0, "A"), Ok(Some("  x")));

    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B"])
            .preserve_leading_whitespace(false)
            .source_text(text),
    );
    assert_eq!(ds.get(0, "B"), Ok(Some("y")));

    let ds = parse(
        ParserBuilder::csv()
            .columns(["A", "B"])
            .preserve_trailing_whitespace(true)
            .source_text(text),
    );
    assert_eq!(ds.get(0, "B"), Ok(Some("  y  ")));
}
