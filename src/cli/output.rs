//! Terminal output for the CLI.
//!
//! Progress and results go to stdout, warnings and errors to stderr.
//! `--quiet` silences all of it; errors are printed by the binary.

use console::style;
use std::io::{self, Write};

/// Styled terminal writer honouring verbosity flags.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn out(&self, line: impl std::fmt::Display) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")
    }

    /// Prints a message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.out(style(message).dim())
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.out(format_args!("{} {}", style("→").cyan(), message))
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.out(format_args!("{} {}", style("✓").green(), message))
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.out(style(title).bold())
    }

    /// Prints an indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.out(format_args!("  {message}"))
    }

    /// Prints a warning to stderr unless quiet.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{} {}", style("warning:").yellow().bold(), message)
    }
}
