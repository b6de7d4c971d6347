//! Command drivers for the `android` and `ios` subcommands.

mod summary;

use super::{Args, OutputManager};
use crate::configurator::lifecycle::{ArtifactState, IntentFilterOutcome};
use crate::configurator::{Collaborators, ConfigurationReport, SystemRunner, configure};
use crate::error::Result;

pub use summary::print_report;

/// Runs the pipeline selected by the subcommand.
pub fn execute(args: &Args, output: &OutputManager) -> Result<i32> {
    let config = args.run_config()?;
    output.progress(&format!(
        "Configuring {} project in {}",
        config.platform(),
        config.app_dir().display()
    ))?;

    let warn = |message: &str| {
        if let Err(e) = output.warn(message) {
            log::debug!("Could not print warning: {}", e);
        }
    };
    let runner = SystemRunner;
    let collaborators = Collaborators::new(&runner).on_warning(&warn);

    let report = configure(&config, &collaborators)?;
    describe_artifacts(&report, output)?;
    print_report(&report, output)?;
    Ok(0)
}

/// Verbose notes on what happened to the optional artifacts.
fn describe_artifacts(report: &ConfigurationReport, output: &OutputManager) -> Result<()> {
    let controller = &report.security_controller;
    let note = match controller.to {
        ArtifactState::PresentCustom => "Security controller written with non-default flags",
        _ if controller.removed() => "Security controller removed, all flags have their defaults",
        _ => "No security controller needed, all flags have their defaults",
    };
    output.verbose(note)?;

    if let Some(outcome) = report.intent_filter {
        let note = match outcome {
            IntentFilterOutcome::Removed => "Redirect intent filter removed",
            IntentFilterOutcome::AlreadyAbsent => "No redirect intent filter needed",
            IntentFilterOutcome::RewroteModern => "Redirect intent filter updated",
            IntentFilterOutcome::RewroteLegacy => "MainActivity redirect scheme updated",
            IntentFilterOutcome::Inserted => "Redirect intent filter added to the launcher activity",
            IntentFilterOutcome::LauncherMissing => "Redirect intent filter could not be added",
        };
        output.verbose(note)?;
    }
    Ok(())
}
