//! Onegini SDK configurator - configures mobile projects with a Token Server
//! configuration zip.

use sdk_configurator::cli;
use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            if cli::OutputManager::new(false, false).error(&e.to_string()).is_err() {
                eprintln!("ERROR: {e}");
            }
            1
        }
    };

    process::exit(exit_code);
}
