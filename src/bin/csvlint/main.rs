//! csvlint command line tool.

mod app;
mod output;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use csvlint::{Outcome, Validator};
use log::{debug, warn};

use crate::app::Cli;

fn main() -> anyhow::Result<ExitCode> {
    // Usage errors exit 1 like every other failure; 2 means faults were found
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    // Info+ on stderr; --debug enables debug; RUST_LOG overrides
    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let config = cli.config();
    if !config.is_strict_default() {
        warn!("Not using defaults, may not validate CSV to RFC 4180");
    }
    let validator = Validator::new(config)?;

    let report = if cli.path == Path::new("-") {
        debug!("Reading stdin");
        validator.validate(io::stdin().lock())
    } else {
        validator.validate_path(&cli.path)
    }
    .with_context(|| format!("could not lint {}", cli.path.display()))?;

    output::print_report(&cli.path, &report, cli.json)?;

    Ok(match report.outcome() {
        Outcome::Valid => ExitCode::SUCCESS,
        Outcome::Invalid => ExitCode::from(2),
        Outcome::Halted => ExitCode::from(1),
    })
}
