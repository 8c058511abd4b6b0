//! # csvlint
//!
//! Streaming structural linter for CSV files (a relaxed RFC 4180 profile).
//!
//! The first record is taken as the header. Every later record must have the
//! same number of fields; each one that does not is reported and scanning
//! continues. Malformed quoting stops the scan with a single fault.
//!
//! ## Module Organization
//!
//! - [`csv`] - Configuration and the quote-aware record parser
//! - [`csv_reader`] - Streaming tokenizer over any [`std::io::Read`]
//! - [`validator`] - Header/width checking and fault collection
//! - [`types`] - Records, faults and reports
//! - [`error`] - Error types
//!
//! ## Quick Start
//!
//! ```
//! use csvlint::{LintConfig, Outcome, Validator};
//!
//! let data = "id,name\n1,Alice\n2\n3,\"Bob, Jr.\"\n";
//! let report = Validator::new(LintConfig::csv())?.validate(data.as_bytes())?;
//!
//! assert_eq!(report.outcome(), Outcome::Invalid);
//! assert_eq!(report.records, 3);
//! for fault in &report.faults {
//!     println!("{}", fault); // Record #2: wrong number of fields (expected 2, found 1)
//! }
//! # Ok::<(), csvlint::LintError>(())
//! ```
//!
//! ## Features
//!
//! - `serde` - Serialize reports and (de)serialize [`LintConfig`]
//! - `cli` - Build the `csvlint` command line tool

pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod types;
pub mod validator;

pub use csv::{CsvParser, LintConfig};
pub use csv_reader::CsvReader;
pub use error::{CsvError, LintError, Result, SyntaxError, SyntaxErrorKind};
pub use types::{Fault, FaultKind, Outcome, Record, Report};
pub use validator::{validate, Validator};
