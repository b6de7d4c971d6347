//! Error taxonomy for the configuration engine.
//!
//! Every error is terminal for a run. [`Error::kind`] collapses the variants
//! onto the four categories the command line reports: input, path resolution,
//! external tool, and write failures.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing configuration bundle content
    #[error("{0}")]
    Input(String),

    /// A framework preference carried a non-boolean literal
    #[error("could not parse '{name}' preference: '{value}' is not a boolean")]
    PreferenceParse {
        /// Preference name as written in the framework config
        name: String,
        /// Offending literal
        value: String,
    },

    /// A required file or directory is missing or ambiguous
    #[error("{0}")]
    PathResolution(String),

    /// External executable missing or exited non-zero
    #[error("{tool} failed: {output}")]
    ExternalTool {
        /// Tool name
        tool: String,
        /// Combined output or discovery failure description
        output: String,
    },

    /// The native credential store could not be (re)created
    #[error("could not build keystore: {0}")]
    KeystoreBuild(String),

    /// Filesystem write or delete failure with context
    #[error("{context} ({path}): {source}")]
    Write {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Bare IO error without path context
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error categories reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bundle or preference content problem
    Input,
    /// Project layout problem
    PathResolution,
    /// External command problem
    ExternalTool,
    /// Filesystem problem
    Write,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Input(_) | Error::PreferenceParse { .. } => ErrorKind::Input,
            Error::PathResolution(_) => ErrorKind::PathResolution,
            Error::ExternalTool { .. } | Error::KeystoreBuild(_) => ErrorKind::ExternalTool,
            Error::Write { .. } | Error::Io(_) => ErrorKind::Write,
        }
    }

    pub(crate) fn input(message: impl Display) -> Self {
        Error::Input(message.to_string())
    }

    pub(crate) fn path(message: impl Display) -> Self {
        Error::PathResolution(message.to_string())
    }

    pub(crate) fn tool(tool: impl Display, output: impl Display) -> Self {
        Error::ExternalTool {
            tool: tool.to_string(),
            output: output.to_string(),
        }
    }
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Converts the error into [`Error::Write`] naming `context` and `path`.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Write {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns early with an [`Error::Input`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::configurator::Error::Input(format!($($arg)*)))
    };
}
