/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    LowInfo,
    Info,
    Warning,
    Error,
}

/// Sink for leveled, user-facing messages.
///
/// Core code only categorizes severity. Where and how messages appear is
/// decided by the implementation handed in by the caller.
pub trait Logger {
    fn log(&self, level: Level, msg: &str);

    fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    fn warning(&self, msg: &str) {
        self.log(Level::Warning, msg);
    }

    fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    /// Low-priority progress detail, usually hidden unless verbose.
    fn lowinfo(&self, msg: &str) {
        self.log(Level::LowInfo, msg);
    }
}
