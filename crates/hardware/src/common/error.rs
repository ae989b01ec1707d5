//! Recoverable error types.
//!
//! Contract violations inside the replacement policy (for example an empty
//! candidate set) are programming errors and panic. Malformed configuration
//! and trace input is reported through the enums below.

use std::io;

use thiserror::Error;

/// Errors produced while building or validating a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Associativity must be at least one way.
    #[error("cache must have at least one way")]
    ZeroWays,

    /// Line size must be a non-zero power of two.
    #[error("line size must be a non-zero power of two, got {0} bytes")]
    BadLineSize(usize),

    /// Total size must hold a whole number of sets.
    #[error("cache size {size} is not a non-zero multiple of line_bytes * ways ({set_bytes})")]
    BadGeometry {
        /// Configured total size in bytes.
        size: usize,
        /// Bytes covered by one set (`line_bytes * ways`), saturated at
        /// `usize::MAX` when the product overflows.
        set_bytes: usize,
    },

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] io::Error),
}

/// Errors produced while reading a memory trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace source could not be read.
    #[error("cannot read trace: {0}")]
    Io(#[from] io::Error),

    /// The operation field is not one of `R`, `W` or `I`.
    #[error("line {line}: unknown operation `{op}`")]
    UnknownOp {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        op: String,
    },

    /// The address field is not a hexadecimal number.
    #[error("line {line}: bad address `{addr}`")]
    BadAddress {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        addr: String,
    },

    /// The record has no address field.
    #[error("line {line}: missing address")]
    MissingAddress {
        /// 1-based line number.
        line: usize,
    },

    /// The record has more than two fields.
    #[error("line {line}: unexpected trailing field `{extra}`")]
    TrailingField {
        /// 1-based line number.
        line: usize,
        /// First extra token.
        extra: String,
    },
}
