//! CSV tokenizing primitives: configuration and the quote-aware parser

mod config;
mod parser;

pub use config::LintConfig;
pub use parser::{CsvParser, LineSource};
