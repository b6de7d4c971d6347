//! Coloured console output.
//!
//! Progress, section and success lines go to stdout; `WARNING:` and `ERROR:`
//! lines go to stderr. Colours are only used when the stream is a terminal.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes user-facing console text.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `verbose` enables [`OutputManager::verbose`] lines; `quiet` suppresses
    /// everything except warnings and errors.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn stdout() -> StandardStream {
        StandardStream::stdout(if io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        })
    }

    fn stderr() -> StandardStream {
        StandardStream::stderr(if io::stderr().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        })
    }

    fn tagged(
        stream: &mut StandardStream,
        tag: &str,
        color: Color,
        message: &str,
    ) -> io::Result<()> {
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stream, "{tag}")?;
        stream.reset()?;
        writeln!(stream, " {message}")
    }

    /// Prints a message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(Self::stdout(), "{message}")?;
        }
        Ok(())
    }

    /// Prints a plain line.
    pub fn println(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(Self::stdout(), "{message}")?;
        }
        Ok(())
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = Self::stdout();
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(stdout, "{message}")?;
        stdout.reset()
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = Self::stdout();
        writeln!(stdout)?;
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stdout, "{title}")?;
        stdout.reset()
    }

    /// Prints a `SUCCESS!` line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::tagged(&mut Self::stdout(), "SUCCESS!", Color::Green, message)
    }

    /// Prints an `INFO:` line.
    pub fn info(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::tagged(&mut Self::stdout(), "INFO:", Color::Blue, message)
    }

    /// Prints a `WARNING:` line to stderr, even in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        Self::tagged(&mut Self::stderr(), "WARNING:", Color::Yellow, message)
    }

    /// Prints an `ERROR:` line to stderr.
    pub fn error(&self, message: &str) -> io::Result<()> {
        Self::tagged(&mut Self::stderr(), "ERROR:", Color::Red, message)
    }
}
