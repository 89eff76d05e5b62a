//! Tests for the pull-based view.

use crate::{ParserBuilder, StreamingDataSet};

fn stream(text: &str) -> StreamingDataSet {
    ParserBuilder::csv()
        .columns(["V"])
        .flag_empty_rows(true)
        .source_text(text)
        .build()
        .expect("build")
        .parse_as_stream()
        .expect("parse")
}

#[test]
fn next_record_advances_until_exhausted() {
    let mut s = stream("V\n1\n2\n");

    assert!(s.has_next());
    assert_eq!(s.remaining(), 2);
    assert_eq!(
        s.next_record().and_then(|r| r.get("v").ok().flatten()),
        Some("1")
    );
    assert_eq!(s.position(), 1);
    assert_eq!(
        s.next_record().and_then(|r| r.get("v").ok().flatten()),
        Some("2")
    );
    assert!(!s.has_next());
    assert!(s.next_record().is_none());
    assert!(s.next_record().is_none());
    assert_eq!(s.position(), 2);
}

#[test]
fn errors_are_visible_before_iteration() {
    let s = stream("V\n1\n\n2\n");

    assert_eq!(s.errors().len(), 1);
    assert_eq!(s.metadata().len(), 1);
    assert_eq!(s.remaining(), 2);
}

#[test]
fn rewrapping_the_table_starts_over() {
    let mut s = stream("V\n1\n2\n3\n");
    while s.next_record().is_some() {}

    let table = s.into_dataset();
    assert_eq!(table.len(), 3);

    let mut again = StreamingDataSet::from(table);
    assert_eq!(again.remaining(), 3);
    assert_eq!(again.next_record().map(|r| r.line_no()), Some(2));
}
