//! # Trace Parsing Tests
//!
//! Covers the line grammar (`<R|W|I> <hex addr>`, comments, blank lines), the
//! error cases with their line numbers, and loading from readers and files.

use std::io::{Cursor, Write};

use hdm_core::common::TraceError;
use hdm_core::sim::trace::{self, TraceOp, TraceRecord};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

#[rstest]
#[case("R 0x1000", TraceOp::Read, 0x1000)]
#[case("w 0X20", TraceOp::Write, 0x20)]
#[case("I ff", TraceOp::Invalidate, 0xff)]
#[case("  R\t0x80000040  ", TraceOp::Read, 0x8000_0040)]
#[case("W 0x40 # store", TraceOp::Write, 0x40)]
fn parses_valid_records(#[case] line: &str, #[case] op: TraceOp, #[case] addr: u64) {
    assert_eq!(
        trace::parse_line(1, line).unwrap(),
        Some(TraceRecord::new(op, addr))
    );
}

#[rstest]
#[case("")]
#[case("    ")]
#[case("# header")]
#[case("   # indented comment")]
fn skips_blank_and_comment_lines(#[case] line: &str) {
    assert_eq!(trace::parse_line(1, line).unwrap(), None);
}

#[test]
fn unknown_op_reports_line() {
    let err = trace::parse_line(7, "X 0x10").unwrap_err();
    assert!(matches!(err, TraceError::UnknownOp { line: 7, ref op } if op == "X"));
    assert_eq!(err.to_string(), "line 7: unknown operation `X`");
}

#[test]
fn bad_address_reports_token() {
    let err = trace::parse_line(3, "R 0xZZ").unwrap_err();
    assert!(matches!(err, TraceError::BadAddress { line: 3, ref addr } if addr == "0xZZ"));
}

#[test]
fn missing_address_is_error() {
    let err = trace::parse_line(2, "W").unwrap_err();
    assert!(matches!(err, TraceError::MissingAddress { line: 2 }));
}

#[test]
fn trailing_field_is_error() {
    let err = trace::parse_line(4, "R 0x10 0x20").unwrap_err();
    assert!(matches!(err, TraceError::TrailingField { line: 4, ref extra } if extra == "0x20"));
}

#[test]
fn read_trace_numbers_lines_from_one() {
    let text = "# warmup\nR 0x0\n\nW 0x40\nQ 0x80\n";
    let err = trace::read_trace(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, TraceError::UnknownOp { line: 5, .. }));
}

#[test]
fn read_trace_collects_records_in_order() {
    let text = "R 0x0\n# comment\nW 0x40\nI 0x0\n";
    let records = trace::read_trace(Cursor::new(text)).unwrap();
    assert_eq!(
        records,
        vec![
            TraceRecord::new(TraceOp::Read, 0x0),
            TraceRecord::new(TraceOp::Write, 0x40),
            TraceRecord::new(TraceOp::Invalidate, 0x0),
        ]
    );
}

#[test]
fn load_trace_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "R 0x1000").unwrap();
    writeln!(file, "W 0x1040").unwrap();
    file.flush().unwrap();

    let records = trace::load_trace(file.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1], TraceRecord::new(TraceOp::Write, 0x1040));
}

#[test]
fn load_missing_trace_is_io_error() {
    let err = trace::load_trace("/nonexistent/hdm/trace.txt").unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}
