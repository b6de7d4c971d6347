//! Top-level error types of the command line tool.

use thiserror::Error;

/// Result type alias for command line operations
pub type Result<T> = std::result::Result<T, ConfiguratorError>;

/// Main error type of the command line tool
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    /// CLI argument errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// Engine errors
    #[error("{0}")]
    Engine(#[from] crate::configurator::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors from anyhow
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}. Execute 'onegini-sdk-configurator --help' to see how to use the configurator")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl ConfiguratorError {
    /// Engine error category, if this is an engine error.
    pub fn kind(&self) -> Option<crate::configurator::ErrorKind> {
        match self {
            ConfiguratorError::Engine(e) => Some(e.kind()),
            _ => None,
        }
    }
}
