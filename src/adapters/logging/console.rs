use crate::cli::output;
use crate::core::traits::logger::{Level, Logger};

/// How much the console logger prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    Normal,
    /// Includes low-priority progress messages.
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    fn threshold(self) -> Level {
        match self {
            Verbosity::Quiet => Level::Error,
            Verbosity::Normal => Level::Info,
            Verbosity::Verbose => Level::LowInfo,
        }
    }
}

/// Logger that writes colored, leveled messages to the terminal.
#[derive(Debug)]
pub struct ConsoleLogger {
    verbosity: Verbosity,
}

impl ConsoleLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn shows(&self, level: Level) -> bool {
        level >= self.verbosity.threshold()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, msg: &str) {
        if !self.shows(level) {
            return;
        }
        match level {
            Level::Error => output::error(msg),
            Level::Warning => output::warning(msg),
            Level::Info => output::info(msg),
            Level::LowInfo => output::detail(msg),
        }
    }
}
