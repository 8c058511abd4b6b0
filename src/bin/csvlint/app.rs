use std::path::PathBuf;

use clap::Parser;
use csvlint::LintConfig;

/// csvlint - check that a CSV file is structurally valid (RFC 4180)
#[derive(Debug, Parser)]
#[command(name = "csvlint", version, about, long_about = None)]
pub struct Cli {
    /// Field delimiter in the file, ex: '\t' or '|'
    #[arg(long, default_value = ",", value_parser = parse_char)]
    pub delimiter: char,

    /// Lines beginning with the comment character without preceding whitespace are ignored
    #[arg(long, value_parser = parse_char)]
    pub comment: Option<char>,

    /// A quote may appear in an unquoted field and a non-doubled quote may appear in a quoted field
    #[arg(long)]
    pub lazyquotes: bool,

    /// Print debug information
    #[arg(short = 'v', long, visible_alias = "verbose")]
    pub debug: bool,

    /// Emit the report as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// CSV file to check, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

impl Cli {
    pub fn config(&self) -> LintConfig {
        LintConfig::default()
            .with_delimiter(self.delimiter)
            .with_comment(self.comment)
            .with_lazy_quotes(self.lazyquotes)
    }
}

/// Parse a one-character argument, allowing escapes such as `\t` or `\x7c`.
pub fn parse_char(arg: &str) -> Result<char, String> {
    let parsed = match arg.strip_prefix('\\') {
        Some(escape) => unescape(escape),
        None => {
            let mut chars = arg.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => None,
            }
        }
    };
    parsed.ok_or_else(|| {
        format!("'{arg}' is not a single character, note that only one-character values are supported")
    })
}

fn unescape(escape: &str) -> Option<char> {
    match escape {
        "t" => Some('\t'),
        "n" => Some('\n'),
        "r" => Some('\r'),
        "\\" => Some('\\'),
        "'" => Some('\''),
        "\"" => Some('"'),
        _ => {
            let hex = escape
                .strip_prefix('x')
                .filter(|h| h.len() == 2)
                .or_else(|| escape.strip_prefix('u').filter(|h| h.len() == 4))
                .or_else(|| escape.strip_prefix('U').filter(|h| h.len() == 8))?;
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        }
    }
}
