use std::cell::RefCell;

use crate::core::traits::logger::{Level, Logger};

/// Logger that keeps every message, for assertions in tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: RefCell<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.messages.borrow().iter().filter(|(l, _)| *l == level).count()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, msg: &str) {
        self.messages.borrow_mut().push((level, msg.to_string()));
    }
}
