//! Structural validation of CSV input
//!
//! The first record is the header and fixes the expected width. Every later
//! record with a different width is reported and scanning continues. A syntax
//! error is reported once and stops the scan. I/O failures are not faults and
//! abort the run with [`LintError::ReadError`].

use crate::csv::LintConfig;
use crate::csv_reader::CsvReader;
use crate::error::{CsvError, LintError, Result};
use crate::types::{Fault, Record, Report};
use log::{debug, trace};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV structure validator
///
/// # Examples
///
/// ```
/// use csvlint::{LintConfig, Outcome, Validator};
///
/// let validator = Validator::new(LintConfig::csv())?;
/// let report = validator.validate("a,b,c\n1,2,3\n4,5\n".as_bytes())?;
///
/// assert_eq!(report.records, 2);
/// assert_eq!(report.outcome(), Outcome::Invalid);
/// assert_eq!(report.faults[0].to_string(), "Record #2: wrong number of fields (expected 3, found 2)");
/// # Ok::<(), csvlint::LintError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    config: LintConfig,
}

impl Validator {
    /// Create a validator, rejecting unusable delimiter/comment settings
    pub fn new(config: LintConfig) -> Result<Self> {
        config.check()?;
        Ok(Validator { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Open `path` and validate its contents
    pub fn validate_path<P: AsRef<Path>>(&self, path: P) -> Result<Report> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LintError::OpenError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Reading file {}", path.display());
        self.validate(file)
    }

    /// Validate everything readable from `reader`
    pub fn validate<R: Read>(&self, reader: R) -> Result<Report> {
        let mut reader = CsvReader::from_reader(reader).config(self.config);
        let mut record = Record::new();
        let mut report = Report::default();
        let mut expected: Option<usize> = None;

        loop {
            match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    let Some(width) = expected else {
                        debug!("Header has {} fields", record.len());
                        expected = Some(record.len());
                        continue;
                    };

                    report.records += 1;
                    if record.len() != width {
                        let fault = Fault::field_count(report.records, &record, width);
                        trace!("{}", fault);
                        report.faults.push(fault);
                    }
                }
                Err(CsvError::Syntax(err)) => {
                    let number = if expected.is_some() {
                        report.records + 1
                    } else {
                        0
                    };
                    let fault = Fault::syntax(number, err);
                    debug!("Halting at {}", fault);
                    report.faults.push(fault);
                    report.halted = true;
                    break;
                }
                Err(CsvError::Io(source)) => {
                    return Err(LintError::ReadError {
                        source,
                        records: report.records,
                        faults: report.faults,
                    });
                }
            }
        }

        debug!(
            "Scanned {} records on {} lines, {} faults",
            report.records,
            reader.line_number(),
            report.faults.len()
        );
        Ok(report)
    }
}

/// Validate `reader` with an explicit delimiter, comment marker and quote mode
///
/// ```
/// let report = csvlint::validate("a,b\n#skip\n1,2\n".as_bytes(), ',', Some('#'), false)?;
/// assert!(report.is_valid());
/// assert_eq!(report.records, 1);
/// # Ok::<(), csvlint::LintError>(())
/// ```
pub fn validate<R: Read>(
    reader: R,
    delimiter: char,
    comment: Option<char>,
    lazy_quotes: bool,
) -> Result<Report> {
    let config = LintConfig::default()
        .with_delimiter(delimiter)
        .with_comment(comment)
        .with_lazy_quotes(lazy_quotes);
    Validator::new(config)?.validate(reader)
}
