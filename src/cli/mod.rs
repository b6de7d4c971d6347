//! Command line interface of the configurator.
//!
//! Parses arguments, builds the immutable run configuration and drives the
//! platform pipeline with console feedback.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command};
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new(args.verbose, args.quiet);
    commands::execute(&args, &output)
}
