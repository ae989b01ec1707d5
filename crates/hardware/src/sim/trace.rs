//! Memory trace format.
//!
//! One record per line: an operation followed by a hexadecimal address.
//!
//! ```text
//! # comment
//! R 0x80001000
//! W 80001040      # the 0x prefix is optional
//! I 0x80001000
//! ```
//!
//! Operations are `R` (read), `W` (write) and `I` (invalidate), in either
//! case. Blank lines and anything after `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::TraceError;

/// Operation of a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    /// Load from the address.
    Read,
    /// Store to the address.
    Write,
    /// Drop the line holding the address.
    Invalidate,
}

/// A single trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// What to do.
    pub op: TraceOp,
    /// Byte address.
    pub addr: u64,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(op: TraceOp, addr: u64) -> Self {
        Self { op, addr }
    }
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - 1-based line number, used in error messages.
/// * `text` - Raw line contents.
///
/// # Returns
///
/// `Ok(None)` for blank and comment-only lines.
///
/// # Errors
///
/// Returns a [`TraceError`] describing the first malformed field.
pub fn parse_line(line: usize, text: &str) -> Result<Option<TraceRecord>, TraceError> {
    let body = text.split_once('#').map_or(text, |(before, _)| before);
    let mut fields = body.split_whitespace();
    let Some(op_field) = fields.next() else {
        return Ok(None);
    };

    let op = match op_field {
        "R" | "r" => TraceOp::Read,
        "W" | "w" => TraceOp::Write,
        "I" | "i" => TraceOp::Invalidate,
        other => {
            return Err(TraceError::UnknownOp {
                line,
                op: other.to_string(),
            });
        }
    };

    let addr_field = fields.next().ok_or(TraceError::MissingAddress { line })?;
    let digits = addr_field
        .strip_prefix("0x")
        .or_else(|| addr_field.strip_prefix("0X"))
        .unwrap_or(addr_field);
    let addr = u64::from_str_radix(digits, 16).map_err(|_| TraceError::BadAddress {
        line,
        addr: addr_field.to_string(),
    })?;

    if let Some(extra) = fields.next() {
        return Err(TraceError::TrailingField {
            line,
            extra: extra.to_string(),
        });
    }

    Ok(Some(TraceRecord { op, addr }))
}

/// Reads every record from `reader`.
///
/// # Errors
///
/// Stops at the first I/O or parse error.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    for (idx, text) in reader.lines().enumerate() {
        if let Some(record) = parse_line(idx + 1, &text?)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Opens and reads a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened, otherwise the
/// errors of [`read_trace`].
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, TraceError> {
    let file = File::open(path)?;
    read_trace(BufReader::new(file))
}
