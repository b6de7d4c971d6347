//! Blocking process execution.

use crate::configurator::error::{Error, ErrorExt, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A command line plus optional bytes piped to standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub stdin: Option<Vec<u8>>,
}

impl CommandSpec {
    /// Creates a command without arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Pipes `bytes` to the process's standard input.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(bytes.into());
        self
    }

    /// File name of the program, used in error messages.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Human readable command line.
    pub fn display(&self) -> String {
        std::iter::once(self.program.to_string_lossy())
            .chain(self.args.iter().map(|arg| arg.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status and combined stdout/stderr of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub output: String,
}

/// Runs external commands to completion.
pub trait CommandRunner {
    /// Runs `command`, failing only when it cannot be started.
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        log::debug!("Running: {}", command.display());

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(if command.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::tool(command.tool_name(), format!("could not execute: {e}")))?;

        if let (Some(bytes), Some(mut stdin)) = (&command.stdin, child.stdin.take()) {
            stdin
                .write_all(bytes)
                .fs_context("writing to stdin of", Path::new(&command.program))?;
            // Dropping stdin closes the pipe so the tool sees EOF.
        }

        let output = child
            .wait_with_output()
            .fs_context("waiting for", Path::new(&command.program))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: combined,
        })
    }
}

/// Runs `command` and converts a non-zero exit into [`Error::ExternalTool`].
pub fn run_checked(runner: &dyn CommandRunner, command: &CommandSpec) -> Result<CommandOutput> {
    let output = runner.run(command)?;
    if !output.success {
        return Err(Error::tool(
            command.tool_name(),
            format!(
                "exited with status {}: {}",
                output
                    .code
                    .map_or_else(|| "unknown".to_string(), |code| code.to_string()),
                output.output.trim()
            ),
        ));
    }
    Ok(output)
}
