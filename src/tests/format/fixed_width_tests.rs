//! Tests for fixed-width row decoding.

use crate::format::{DecodeOutcome, FixedWidthDecoder, RowDecoder, WhitespacePolicy};
use crate::metadata::{ColumnDef, MetaData, NameRules};

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn layout() -> MetaData {
    MetaData::new(
        [
            ColumnDef::fixed("ID", 3),
            ColumnDef::fixed("NAME", 5),
            ColumnDef::fixed("AMT", 4),
        ],
        NameRules::default(),
    )
    .expect("layout")
}

fn decode(line: &str) -> DecodeOutcome {
    FixedWidthDecoder::new().decode(line, &layout(), WhitespacePolicy::default())
}

#[test]
fn slices_exact_lines() {
    assert_eq!(
        decode("001Alice0042"),
        DecodeOutcome::Fields(strings(&["001", "Alice", "0042"]))
    );
    // trailing padding is stripped by default
    assert_eq!(
        decode("002Bob  0010"),
        DecodeOutcome::Fields(strings(&["002", "Bob", "0010"]))
    );
}

#[test]
fn short_line_keeps_partial_column() {
    assert_eq!(
        decode("003Carl"),
        DecodeOutcome::TooFew(strings(&["003", "Carl"]))
    );
    assert_eq!(decode("004"), DecodeOutcome::TooFew(strings(&["004"])));
}

#[test]
fn long_line_keeps_remainder() {
    assert_eq!(
        decode("005Dave 0001XYZ"),
        DecodeOutcome::TooMany(strings(&["005", "Dave", "0001", "XYZ"]))
    );
}

#[test]
fn blank_line_is_empty() {
    assert_eq!(decode(""), DecodeOutcome::Empty);
    assert_eq!(decode("            "), DecodeOutcome::Empty);
}

#[test]
fn split_multibyte_character_is_a_bad_segment() {
    let md = MetaData::new(
        [ColumnDef::fixed("A", 1), ColumnDef::fixed("B", 2)],
        NameRules::default(),
    )
    .expect("layout");
    let d = FixedWidthDecoder::new();

    // 'é' is two bytes; a one-byte column cuts it in half
    assert_eq!(
        d.decode("éab", &md, WhitespacePolicy::default()),
        DecodeOutcome::BadSegment {
            column: 0,
            fields: Vec::new()
        }
    );
    // widths line up with the character
    let md = MetaData::new(
        [ColumnDef::fixed("A", 2), ColumnDef::fixed("B", 2)],
        NameRules::default(),
    )
    .expect("layout");
    assert_eq!(
        d.decode("éab", &md, WhitespacePolicy::default()),
        DecodeOutcome::Fields(strings(&["é", "ab"]))
    );
}

#[test]
fn validate_requires_widths() {
    let d = RowDecoder::FixedWidth(FixedWidthDecoder::new());
    assert!(d.validate(&layout()).is_ok());

    let missing = MetaData::new(
        [ColumnDef::fixed("ID", 3), ColumnDef::new("NAME")],
        NameRules::default(),
    )
    .expect("layout");
    let err = d.validate(&missing).unwrap_err();
    assert!(err.to_string().contains("NAME"));

    let zero = MetaData::new([ColumnDef::fixed("ID", 0)], NameRules::default()).expect("layout");
    assert!(d.validate(&zero).is_err());
}

#[test]
fn oversized_width_reads_to_end_of_line() {
    let md = MetaData::new(
        [ColumnDef::fixed("A", 1), ColumnDef::fixed("B", usize::MAX)],
        NameRules::default(),
    )
    .expect("layout");
    assert!(RowDecoder::FixedWidth(FixedWidthDecoder::new()).validate(&md).is_ok());

    assert_eq!(
        FixedWidthDecoder::new().decode("ab", &md, WhitespacePolicy::default()),
        DecodeOutcome::TooFew(strings(&["a", "b"]))
    );
}
