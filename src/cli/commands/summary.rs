//! Success banner and configuration summary.

use crate::cli::OutputManager;
use crate::configurator::ConfigurationReport;
use anyhow::Context;

const LABEL_WIDTH: usize = 24;

/// Prints the success banner, the configuration summary and any hints.
pub fn print_report(report: &ConfigurationReport, output: &OutputManager) -> anyhow::Result<()> {
    output
        .success("Your application is now configured.")
        .context("could not write the success message")?;
    output
        .section("CONFIGURATION")
        .context("could not write the configuration summary")?;

    for (label, value) in report.summary() {
        let label = if label.is_empty() {
            String::new()
        } else {
            format!("{label}:")
        };
        output
            .println(&format!("{label:<LABEL_WIDTH$}{value}"))
            .context("could not write the configuration summary")?;
    }

    if !report.hints.is_empty() {
        output.println("").context("could not write hints")?;
    }
    for hint in &report.hints {
        output.info(hint).context("could not write hints")?;
    }
    Ok(())
}
