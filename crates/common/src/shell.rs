//! Terminal output that honours `--quiet`.

use anstyle::{AnsiColor, Effects, Style};
use std::{
    fmt,
    io::{self, Write},
    sync::{Arc, Mutex},
};

const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
const WARN: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

/// The requested verbosity of output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Only exit codes report results.
    Quiet,
    /// Regular output.
    #[default]
    Normal,
    /// Extra diagnostics.
    Verbose,
}

#[derive(Clone, Debug)]
enum Output {
    Stream,
    Captured(Arc<Mutex<Captured>>),
}

#[derive(Debug, Default)]
struct Captured {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Output sink handed to every command.
///
/// Results go to stdout, diagnostics to stderr. In [`Verbosity::Quiet`] nothing is written at all.
#[derive(Clone, Debug)]
pub struct Shell {
    verbosity: Verbosity,
    output: Output,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl Shell {
    /// Creates a shell writing to the process' stdout and stderr.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity, output: Output::Stream }
    }

    /// Creates a shell that records everything it would print.
    pub fn captured(verbosity: Verbosity) -> Self {
        Self { verbosity, output: Output::Captured(Default::default()) }
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    /// Prints a result line to stdout.
    pub fn println(&self, msg: impl fmt::Display) -> io::Result<()> {
        if self.is_quiet() {
            return Ok(());
        }
        match &self.output {
            Output::Stream => writeln!(anstream::stdout().lock(), "{msg}"),
            Output::Captured(buf) => writeln!(lock(buf).stdout, "{msg}"),
        }
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, msg: impl fmt::Display) -> io::Result<()> {
        self.status(WARN, "Warning", msg)
    }

    /// Prints an error to stderr.
    pub fn error(&self, msg: impl fmt::Display) -> io::Result<()> {
        self.status(ERROR, "Error", msg)
    }

    fn status(&self, style: Style, label: &str, msg: impl fmt::Display) -> io::Result<()> {
        if self.is_quiet() {
            return Ok(());
        }
        match &self.output {
            Output::Stream => {
                writeln!(anstream::stderr().lock(), "{style}{label}{style:#}: {msg}")
            }
            Output::Captured(buf) => writeln!(lock(buf).stderr, "{label}: {msg}"),
        }
    }

    /// Everything printed to stdout so far, for captured shells.
    pub fn captured_stdout(&self) -> String {
        match &self.output {
            Output::Stream => String::new(),
            Output::Captured(buf) => String::from_utf8_lossy(&lock(buf).stdout).into_owned(),
        }
    }

    /// Everything printed to stderr so far, for captured shells.
    pub fn captured_stderr(&self) -> String {
        match &self.output {
            Output::Stream => String::new(),
            Output::Captured(buf) => String::from_utf8_lossy(&lock(buf).stderr).into_owned(),
        }
    }
}

fn lock(buf: &Mutex<Captured>) -> std::sync::MutexGuard<'_, Captured> {
    buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
