use std::path::Path;

use csvlint::{Outcome, Report};
use log::{error, info, warn};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    path: String,
    outcome: Outcome,
    #[serde(flatten)]
    report: &'a Report,
}

/// Print faults to stdout and the verdict through the logger, or everything as JSON.
pub fn print_report(path: &Path, report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        let out = JsonReport {
            path: path.display().to_string(),
            outcome: report.outcome(),
            report,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if report.is_valid() {
        info!("File is valid - {} records", report.records);
        return Ok(());
    }

    for fault in &report.faults {
        println!(" {fault}");
    }
    warn!("{} malformed records", report.fault_count());

    if report.halted {
        error!("Halted");
    }
    Ok(())
}
