//! Type definitions for records, faults and lint reports

use crate::error::SyntaxError;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One logical CSV row after quote unescaping
///
/// Fields live back to back in a single `String`, with `ends` holding the
/// end offset of each field. [`CsvReader::read_record`](crate::CsvReader::read_record)
/// clears and refills the same `Record` on every pull, so one allocation
/// serves a whole scan. Copy the fields out (see [`Record::to_vec`]) to keep
/// them past the next pull.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    buffer: String,
    ends: Vec<usize>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `bytes` of field data and `fields` fields
    pub fn with_capacity(bytes: usize, fields: usize) -> Self {
        Record {
            buffer: String::with_capacity(bytes),
            ends: Vec::with_capacity(fields),
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Check if record has no fields
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Get field by index
    pub fn get(&self, index: usize) -> Option<&str> {
        let end = *self.ends.get(index)?;
        let start = if index == 0 { 0 } else { self.ends[index - 1] };
        Some(&self.buffer[start..end])
    }

    /// Iterate over fields in order
    pub fn iter(&self) -> Fields<'_> {
        Fields {
            record: self,
            index: 0,
        }
    }

    /// Copy fields into owned strings
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// Remove all fields, keeping the allocation
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.ends.clear();
    }

    /// Append a complete field
    pub fn push_field(&mut self, field: &str) {
        self.buffer.push_str(field);
        self.ends.push(self.buffer.len());
    }

    // Incremental building for quoted fields that arrive in pieces.

    pub(crate) fn push_str(&mut self, data: &str) {
        self.buffer.push_str(data);
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub(crate) fn end_field(&mut self) {
        self.ends.push(self.buffer.len());
    }
}

impl<S: AsRef<str>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut record = Record::new();
        for field in iter {
            record.push_field(field.as_ref());
        }
        record
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a str;
    type IntoIter = Fields<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the fields of a [`Record`]
pub struct Fields<'a> {
    record: &'a Record,
    index: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.record.get(self.index)?;
        self.index += 1;
        Some(field)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.record.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Fields<'_> {}

/// Classification of one reported fault
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum FaultKind {
    /// Record width differs from the header width. Scanning continues.
    FieldCount { expected: usize, actual: usize },
    /// Tokenizer could not read the record. Scanning stops.
    Syntax(SyntaxError),
}

impl FaultKind {
    /// Check if this fault stopped the scan
    pub fn is_halting(&self) -> bool {
        matches!(self, FaultKind::Syntax(_))
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::FieldCount { expected, actual } => write!(
                f,
                "wrong number of fields (expected {}, found {})",
                expected, actual
            ),
            FaultKind::Syntax(err) => write!(f, "{}", err),
        }
    }
}

/// One invalid record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Fault {
    /// 1-based ordinal among data records. `0` is the header.
    pub record_number: u64,
    /// Fields of the offending record. `None` when it could not be tokenized.
    pub record: Option<Vec<String>>,
    pub kind: FaultKind,
}

impl Fault {
    /// Fault for a record whose width differs from the header
    pub fn field_count(record_number: u64, record: &Record, expected: usize) -> Self {
        Fault {
            record_number,
            record: Some(record.to_vec()),
            kind: FaultKind::FieldCount {
                expected,
                actual: record.len(),
            },
        }
    }

    /// Fault for a record the tokenizer rejected
    pub fn syntax(record_number: u64, error: SyntaxError) -> Self {
        Fault {
            record_number,
            record: None,
            kind: FaultKind::Syntax(error),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record #{}: {}", self.record_number, self.kind)
    }
}

/// Result of one lint run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    /// Faults in document order
    pub faults: Vec<Fault>,
    /// Scan stopped at a syntax fault before end of input
    pub halted: bool,
    /// Data records tokenized, header excluded
    pub records: u64,
}

impl Report {
    /// Check if no faults were found
    pub fn is_valid(&self) -> bool {
        self.faults.is_empty()
    }

    /// Number of faults
    pub fn fault_count(&self) -> usize {
        self.faults.len()
    }

    /// Overall verdict
    pub fn outcome(&self) -> Outcome {
        if self.halted {
            Outcome::Halted
        } else if self.faults.is_empty() {
            Outcome::Valid
        } else {
            Outcome::Invalid
        }
    }
}

/// Overall verdict of a lint run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// Every record matched the header width
    Valid,
    /// Width faults were found, input was read to the end
    Invalid,
    /// A syntax fault stopped the scan
    Halted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Valid => write!(f, "valid"),
            Outcome::Invalid => write!(f, "invalid"),
            Outcome::Halted => write!(f, "halted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxErrorKind;

    #[test]
    fn test_record_fields() {
        let record: Record = ["a", "", "c,d"].into_iter().collect();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get(0), Some("a"));
        assert_eq!(record.get(1), Some(""));
        assert_eq!(record.get(2), Some("c,d"));
        assert_eq!(record.get(3), None);
        assert_eq!(record.to_vec(), vec!["a", "", "c,d"]);
    }

    #[test]
    fn test_record_reuse() {
        let mut record = Record::with_capacity(16, 4);
        record.push_field("x");
        record.push_field("y");
        record.clear();
        assert!(record.is_empty());

        record.push_str("he said ");
        record.push_char('"');
        record.push_str("hi");
        record.push_char('"');
        record.end_field();
        assert_eq!(record.iter().collect::<Vec<_>>(), vec![r#"he said "hi""#]);
    }

    #[test]
    fn test_empty_field_at_end() {
        let mut record = Record::new();
        record.push_field("a");
        record.end_field();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get(1), Some(""));
    }

    #[test]
    fn test_fault_display() {
        let record: Record = ["4", "5"].into_iter().collect();
        let fault = Fault::field_count(2, &record, 3);
        assert_eq!(
            fault.to_string(),
            "Record #2: wrong number of fields (expected 3, found 2)"
        );
        assert_eq!(fault.record, Some(vec!["4".to_string(), "5".to_string()]));
        assert!(!fault.kind.is_halting());

        let fault = Fault::syntax(
            1,
            SyntaxError {
                kind: SyntaxErrorKind::StrayQuote,
                start_line: 2,
                line: 2,
                column: 4,
            },
        );
        assert_eq!(
            fault.to_string(),
            "Record #1: parse error on line 2, column 4: extraneous \" in quoted field"
        );
        assert!(fault.record.is_none());
        assert!(fault.kind.is_halting());
    }

    #[test]
    fn test_outcome() {
        let mut report = Report::default();
        assert_eq!(report.outcome(), Outcome::Valid);

        report.faults.push(Fault::field_count(1, &Record::new(), 2));
        assert_eq!(report.outcome(), Outcome::Invalid);
        assert_eq!(report.fault_count(), 1);

        report.halted = true;
        assert_eq!(report.outcome(), Outcome::Halted);
    }
}
