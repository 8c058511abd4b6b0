//! Configuration for CSV linting.

use crate::error::{LintError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for CSV linting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LintConfig {
    /// Field delimiter (default: ',')
    pub delimiter: char,
    /// Lines starting with this character are skipped (default: disabled)
    pub comment: Option<char>,
    /// Accept quotes RFC 4180 would reject (default: false)
    pub lazy_quotes: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            comment: None,
            lazy_quotes: false,
        }
    }
}

impl LintConfig {
    /// Create a CSV configuration (comma-separated).
    pub fn csv() -> Self {
        Self::default()
    }

    /// Create a TSV configuration (tab-separated).
    pub fn tsv() -> Self {
        Self {
            delimiter: '\t',
            ..Self::default()
        }
    }

    /// Create a PSV configuration (pipe-separated).
    pub fn psv() -> Self {
        Self {
            delimiter: '|',
            ..Self::default()
        }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set or disable the comment marker.
    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    /// Enable or disable lazy quote handling.
    pub fn with_lazy_quotes(mut self, lazy_quotes: bool) -> Self {
        self.lazy_quotes = lazy_quotes;
        self
    }

    /// Check if this is the plain RFC 4180 profile.
    pub fn is_strict_default(&self) -> bool {
        *self == Self::default()
    }

    /// Reject delimiter/comment combinations the tokenizer cannot honor.
    pub fn check(&self) -> Result<()> {
        if !is_valid_marker(self.delimiter) {
            return Err(LintError::ConfigError(format!(
                "delimiter {:?} is not allowed",
                self.delimiter
            )));
        }
        if let Some(comment) = self.comment {
            if !is_valid_marker(comment) {
                return Err(LintError::ConfigError(format!(
                    "comment marker {:?} is not allowed",
                    comment
                )));
            }
            if comment == self.delimiter {
                return Err(LintError::ConfigError(format!(
                    "comment marker and delimiter are both {:?}",
                    comment
                )));
            }
        }
        Ok(())
    }
}

fn is_valid_marker(ch: char) -> bool {
    !matches!(ch, '\0' | '"' | '\r' | '\n' | char::REPLACEMENT_CHARACTER)
}
