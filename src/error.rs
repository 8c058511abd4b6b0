//! Error types for CSV linting
//!
//! Two tiers are kept apart here:
//! - [`CsvError`] is what a single tokenizer pull can fail with. Its
//!   [`CsvError::Syntax`] arm becomes a [`Fault`](crate::types::Fault) in the report.
//! - [`LintError`] is fatal. The run produced no lint verdict.

use crate::types::Fault;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Result type for lint operations
pub type Result<T> = std::result::Result<T, LintError>;

/// Fatal errors that abort a lint run
#[derive(Debug, Error)]
pub enum LintError {
    /// Delimiter or comment marker cannot be used
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Input file could not be opened
    #[error("Failed to open {}: {source}", .path.display())]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input stream failed while records were being read.
    ///
    /// Carries whatever was collected before the failure.
    #[error("Failed to read input after {records} records: {source}")]
    ReadError {
        source: std::io::Error,
        records: u64,
        faults: Vec<Fault>,
    },
}

/// Why the tokenizer could not produce the next record
#[derive(Debug, Error)]
pub enum CsvError {
    /// Malformed CSV. Terminal for the stream.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Underlying reader failed
    #[error("Failed to read line: {0}")]
    Io(#[from] std::io::Error),
}

/// Classification of a tokenizer-level syntax failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SyntaxErrorKind {
    /// `"` inside an unquoted field
    BareQuote,
    /// Closing `"` not followed by a delimiter or end of line
    StrayQuote,
    /// Input ended inside a quoted field
    UnterminatedQuote,
}

impl SyntaxErrorKind {
    /// Short human readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            SyntaxErrorKind::BareQuote => "bare \" in non-quoted field",
            SyntaxErrorKind::StrayQuote => "extraneous \" in quoted field",
            SyntaxErrorKind::UnterminatedQuote => "missing closing \" in quoted field",
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// A syntax failure with its position in the input
///
/// Lines are physical, 1-based. `column` counts characters, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Line on which the record started
    pub start_line: u64,
    /// Line on which the error was detected
    pub line: u64,
    pub column: usize,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line != self.line {
            write!(f, "record on line {}; ", self.start_line)?;
        }
        write!(
            f,
            "parse error on line {}, column {}: {}",
            self.line, self.column, self.kind
        )
    }
}

impl std::error::Error for SyntaxError {}
