//! CSV record parsing with RFC 4180-like behavior

use super::config::LintConfig;
use crate::error::{CsvError, SyntaxError, SyntaxErrorKind};
use crate::types::Record;
use std::io;

const QUOTE: char = '"';

/// Source of physical lines for [`CsvParser::parse_record`]
pub trait LineSource {
    /// Replace `buf` with the next physical line.
    ///
    /// The line keeps its trailing `\n` when it had one, with `\r\n` already
    /// folded to `\n`. Returns `Ok(false)` at end of input and leaves `buf`
    /// untouched.
    fn next_line(&mut self, buf: &mut String) -> io::Result<bool>;

    /// 1-based number of the line most recently returned
    fn line_number(&self) -> u64;
}

/// CSV parser turning physical lines into records
pub struct CsvParser {
    delimiter: char,
    comment: Option<char>,
    lazy_quotes: bool,
}

impl CsvParser {
    /// Create a strict parser with the given delimiter and no comment marker
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            comment: None,
            lazy_quotes: false,
        }
    }

    /// Create a parser from a lint configuration
    pub fn from_config(config: &LintConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            comment: config.comment,
            lazy_quotes: config.lazy_quotes,
        }
    }

    /// Set comment marker (builder pattern)
    pub fn comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    /// Set lazy quote handling (builder pattern)
    pub fn lazy_quotes(mut self, lazy: bool) -> Self {
        self.lazy_quotes = lazy;
        self
    }

    /// Check if a line between records is blank or a comment
    pub fn is_skippable(&self, line: &str) -> bool {
        if strip_newline(line).is_empty() {
            return true;
        }
        matches!(self.comment, Some(marker) if line.starts_with(marker))
    }

    /// Parse the first record of `text` into fields
    ///
    /// Quoted fields may span lines; anything after the first record is ignored.
    pub fn parse_line(&self, text: &str) -> Result<Vec<String>, CsvError> {
        let mut lines = StrLines::new(text);
        let mut line = String::new();
        let mut record = Record::new();
        lines.next_line(&mut line)?;
        self.parse_record(&mut line, &mut lines, &mut record)?;
        Ok(record.to_vec())
    }

    /// Parse one record starting at `line`
    ///
    /// While a quoted field stays open, further lines are pulled from
    /// `source` into `line`. `record` is cleared first.
    pub fn parse_record<S: LineSource>(
        &self,
        line: &mut String,
        source: &mut S,
        record: &mut Record,
    ) -> Result<(), CsvError> {
        record.clear();
        let start_line = source.line_number();
        let mut pos = 0;

        'fields: loop {
            if !line[pos..].starts_with(QUOTE) {
                // Unquoted field
                let rest = &line[pos..];
                let (field, next) = match rest.find(self.delimiter) {
                    Some(i) => (&rest[..i], Some(pos + i + self.delimiter.len_utf8())),
                    None => (strip_newline(rest), None),
                };

                if !self.lazy_quotes {
                    if let Some(j) = field.find(QUOTE) {
                        return Err(syntax_error(
                            SyntaxErrorKind::BareQuote,
                            start_line,
                            source.line_number(),
                            line,
                            pos + j,
                        ));
                    }
                }

                record.push_field(field);
                match next {
                    Some(next) => pos = next,
                    None => break 'fields,
                }
            } else {
                // Quoted field
                pos += QUOTE.len_utf8();
                loop {
                    match line[pos..].find(QUOTE) {
                        Some(i) => {
                            record.push_str(&line[pos..pos + i]);
                            pos += i + QUOTE.len_utf8();
                            let after = &line[pos..];
                            match after.chars().next() {
                                Some(QUOTE) => {
                                    // Escaped quote ("")
                                    record.push_char(QUOTE);
                                    pos += QUOTE.len_utf8();
                                }
                                Some(ch) if ch == self.delimiter => {
                                    record.end_field();
                                    pos += ch.len_utf8();
                                    continue 'fields;
                                }
                                _ if strip_newline(after).is_empty() => {
                                    record.end_field();
                                    break 'fields;
                                }
                                _ if self.lazy_quotes => record.push_char(QUOTE),
                                _ => {
                                    return Err(syntax_error(
                                        SyntaxErrorKind::StrayQuote,
                                        start_line,
                                        source.line_number(),
                                        line,
                                        pos - QUOTE.len_utf8(),
                                    ));
                                }
                            }
                        }
                        None if pos < line.len() => {
                            // Field continues on the next line
                            record.push_str(&line[pos..]);
                            if source.next_line(line)? {
                                pos = 0;
                            } else {
                                pos = line.len();
                            }
                        }
                        None => {
                            if !self.lazy_quotes {
                                return Err(syntax_error(
                                    SyntaxErrorKind::UnterminatedQuote,
                                    start_line,
                                    source.line_number(),
                                    line,
                                    pos,
                                ));
                            }
                            record.end_field();
                            break 'fields;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Drop one trailing `\n`
fn strip_newline(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

fn syntax_error(
    kind: SyntaxErrorKind,
    start_line: u64,
    line_number: u64,
    line: &str,
    byte_pos: usize,
) -> CsvError {
    let column = strip_newline(&line[..byte_pos]).chars().count() + 1;
    CsvError::Syntax(SyntaxError {
        kind,
        start_line,
        line: line_number,
        column,
    })
}

/// In-memory line source over a string slice
struct StrLines<'a> {
    lines: std::str::SplitInclusive<'a, char>,
    line_number: u64,
}

impl<'a> StrLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split_inclusive('\n'),
            line_number: 0,
        }
    }
}

impl LineSource for StrLines<'_> {
    fn next_line(&mut self, buf: &mut String) -> io::Result<bool> {
        match self.lines.next() {
            Some(line) => {
                buf.clear();
                buf.push_str(line);
                self.line_number += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn line_number(&self) -> u64 {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_kind(result: Result<Vec<String>, CsvError>) -> SyntaxErrorKind {
        match result {
            Err(CsvError::Syntax(err)) => err.kind,
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_simple() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line("a,b,c").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line(r#""a,b",c"#).unwrap(), vec!["a,b", "c"]);
    }

    #[test]
    fn test_escaped_quotes() {
        let parser = CsvParser::new(',');
        assert_eq!(
            parser.parse_line(r#""Say ""Hello""",world"#).unwrap(),
            vec![r#"Say "Hello""#, "world"]
        );
    }

    #[test]
    fn test_empty_fields() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line("a,,c").unwrap(), vec!["a", "", "c"]);
    }

    #[test]
    fn test_all_empty() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line(",,").unwrap(), vec!["", "", ""]);
    }

    #[test]
    fn test_quoted_with_newline() {
        let parser = CsvParser::new(',');
        assert_eq!(
            parser.parse_line("\"Line 1\nLine 2\",normal").unwrap(),
            vec!["Line 1\nLine 2", "normal"]
        );
    }

    #[test]
    fn test_only_first_record() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line("a,b\nc,d\n").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = CsvParser::new(';');
        assert_eq!(
            parser.parse_line(r#"a;"b;c";d"#).unwrap(),
            vec!["a", "b;c", "d"]
        );
    }

    #[test]
    fn test_multibyte_delimiter() {
        let parser = CsvParser::new('§');
        assert_eq!(
            parser.parse_line("ä§\"ö§ü\"§ß").unwrap(),
            vec!["ä", "ö§ü", "ß"]
        );
    }

    #[test]
    fn test_empty_line() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line("").unwrap(), vec![""]);
    }

    #[test]
    fn test_quoted_empty() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line(r#""","""#).unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_trailing_delimiter() {
        let parser = CsvParser::new(',');
        assert_eq!(parser.parse_line("a,b,\n").unwrap(), vec!["a", "b", ""]);
    }

    #[test]
    fn test_bare_quote_strict() {
        let parser = CsvParser::new(',');
        match parser.parse_line("a,b\"c,d") {
            Err(CsvError::Syntax(err)) => {
                assert_eq!(err.kind, SyntaxErrorKind::BareQuote);
                assert_eq!(err.line, 1);
                assert_eq!(err.column, 4);
            }
            other => panic!("expected bare quote, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_quote_lazy() {
        let parser = CsvParser::new(',').lazy_quotes(true);
        assert_eq!(
            parser.parse_line("a,b\"c,d").unwrap(),
            vec!["a", "b\"c", "d"]
        );
    }

    #[test]
    fn test_stray_quote_strict() {
        let parser = CsvParser::new(',');
        match parser.parse_line(r#""ab"c,d"#) {
            Err(CsvError::Syntax(err)) => {
                assert_eq!(err.kind, SyntaxErrorKind::StrayQuote);
                assert_eq!(err.column, 4);
            }
            other => panic!("expected stray quote, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_quote_lazy() {
        let parser = CsvParser::new(',').lazy_quotes(true);
        assert_eq!(
            parser.parse_line(r#""ab"c",d"#).unwrap(),
            vec![r#"ab"c"#, "d"]
        );
    }

    #[test]
    fn test_unterminated_quote_strict() {
        let parser = CsvParser::new(',');
        assert_eq!(
            syntax_kind(parser.parse_line("a,\"bc\n")),
            SyntaxErrorKind::UnterminatedQuote
        );
    }

    #[test]
    fn test_unterminated_quote_position() {
        let parser = CsvParser::new(',');
        match parser.parse_line("a,\"bc\nde") {
            Err(CsvError::Syntax(err)) => {
                assert_eq!(err.start_line, 1);
                assert_eq!(err.line, 2);
                assert_eq!(err.column, 3);
            }
            other => panic!("expected unterminated quote, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_quote_lazy() {
        let parser = CsvParser::new(',').lazy_quotes(true);
        assert_eq!(
            parser.parse_line("a,\"bc\n").unwrap(),
            vec!["a", "bc\n"]
        );
    }

    #[test]
    fn test_skippable_lines() {
        let parser = CsvParser::new(',').comment(Some('#'));
        assert!(parser.is_skippable("\n"));
        assert!(parser.is_skippable("# note\n"));
        assert!(!parser.is_skippable(" # note\n"));
        assert!(!parser.is_skippable("a,b\n"));

        let parser = CsvParser::new(',');
        assert!(!parser.is_skippable("# note\n"));
    }
}
