//! Streaming CSV tokenizer
//!
//! Reads physical lines from any [`Read`] source, skips blank and comment
//! lines between records and hands the rest to [`CsvParser`].

use crate::csv::{CsvParser, LineSource, LintConfig};
use crate::error::{CsvError, LintError, Result};
use crate::types::Record;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// CSV reader with streaming capabilities
///
/// Reads records one at a time; memory use is bounded by the longest record.
/// A syntax error ends the stream: every later pull reports end of input.
///
/// # Examples
///
/// ```
/// use csvlint::CsvReader;
///
/// let data = "name,age\n# staff only\nAlice,30\n";
/// let mut reader = CsvReader::from_reader(data.as_bytes()).comment(Some('#'));
///
/// let rows: Vec<Vec<String>> = reader.rows().collect::<Result<_, _>>().unwrap();
/// assert_eq!(rows, vec![vec!["name", "age"], vec!["Alice", "30"]]);
/// ```
///
/// # Reusing one record buffer
///
/// ```
/// use csvlint::{CsvReader, Record};
///
/// let mut reader = CsvReader::from_reader("a,b\nc,d\n".as_bytes());
/// let mut record = Record::new();
/// while reader.read_record(&mut record).unwrap() {
///     assert_eq!(record.len(), 2);
/// }
/// assert_eq!(reader.row_count(), 2);
/// ```
pub struct CsvReader<R> {
    lines: LineReader<R>,
    line_buffer: String,
    row_count: u64,
    finished: bool,

    // Configuration
    config: LintConfig,
}

impl CsvReader<File> {
    /// Open CSV file with the default configuration
    ///
    /// ```no_run
    /// use csvlint::CsvReader;
    ///
    /// let reader = CsvReader::open("data.csv")?.delimiter(';');
    /// # Ok::<(), csvlint::LintError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LintError::OpenError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvReader<R> {
    /// Wrap any byte source
    pub fn from_reader(reader: R) -> Self {
        CsvReader {
            lines: LineReader::new(reader),
            line_buffer: String::with_capacity(1024),
            row_count: 0,
            finished: false,
            config: LintConfig::default(),
        }
    }

    /// Replace the whole configuration (builder pattern)
    pub fn config(mut self, config: LintConfig) -> Self {
        self.config = config;
        self
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set comment marker (builder pattern)
    pub fn comment(mut self, comment: Option<char>) -> Self {
        self.config.comment = comment;
        self
    }

    /// Set lazy quote handling (builder pattern)
    pub fn lazy_quotes(mut self, lazy: bool) -> Self {
        self.config.lazy_quotes = lazy;
        self
    }

    /// Read the next record into `record`, reusing its allocation
    ///
    /// Returns `Ok(false)` at end of input. Fields left in `record` by the
    /// previous call are discarded.
    pub fn read_record(&mut self, record: &mut Record) -> std::result::Result<bool, CsvError> {
        if self.finished {
            return Ok(false);
        }

        let parser = CsvParser::from_config(&self.config);

        // Skip blank and comment lines
        loop {
            if !self.lines.next_line(&mut self.line_buffer)? {
                self.finished = true;
                return Ok(false);
            }
            if !parser.is_skippable(&self.line_buffer) {
                break;
            }
        }

        if let Err(err) = parser.parse_record(&mut self.line_buffer, &mut self.lines, record) {
            if matches!(err, CsvError::Syntax(_)) {
                self.finished = true;
            }
            return Err(err);
        }

        self.row_count += 1;
        Ok(true)
    }

    /// Read a single row as owned fields
    ///
    /// Returns `Ok(None)` when EOF is reached.
    pub fn read_row(&mut self) -> std::result::Result<Option<Vec<String>>, CsvError> {
        let mut record = Record::new();
        if self.read_record(&mut record)? {
            Ok(Some(record.to_vec()))
        } else {
            Ok(None)
        }
    }

    /// Get iterator over rows
    pub fn rows(&mut self) -> CsvRowIterator<'_, R> {
        CsvRowIterator { reader: self }
    }

    /// Get the number of records read so far
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Physical line number of the last line consumed
    pub fn line_number(&self) -> u64 {
        self.lines.line_number
    }
}

/// Iterator over CSV rows
pub struct CsvRowIterator<'a, R> {
    reader: &'a mut CsvReader<R>,
}

impl<R: Read> Iterator for CsvRowIterator<'_, R> {
    type Item = std::result::Result<Vec<String>, CsvError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}

/// Physical line reader with `\r\n` folding
struct LineReader<R> {
    inner: BufReader<R>,
    bytes: Vec<u8>,
    line_number: u64,
}

impl<R: Read> LineReader<R> {
    fn new(reader: R) -> Self {
        LineReader {
            inner: BufReader::new(reader),
            bytes: Vec::with_capacity(1024),
            line_number: 0,
        }
    }
}

impl<R: Read> LineSource for LineReader<R> {
    fn next_line(&mut self, buf: &mut String) -> io::Result<bool> {
        self.bytes.clear();
        if self.inner.read_until(b'\n', &mut self.bytes)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;

        if self.bytes.ends_with(b"\r\n") {
            let len = self.bytes.len();
            self.bytes.truncate(len - 2);
            self.bytes.push(b'\n');
        } else if self.bytes.last() == Some(&b'\r') {
            // Lone \r right before EOF
            self.bytes.pop();
        }

        buf.clear();
        buf.push_str(&String::from_utf8_lossy(&self.bytes));
        Ok(true)
    }

    fn line_number(&self) -> u64 {
        self.line_number
    }
}
