use std::cell::RefCell;

use super::printer::{Printer, CLEAR_SCREEN};

/// Keeps everything printed in memory. Used to test the console output.
pub struct Logger {
    output: RefCell<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: RefCell::new(String::new()),
        }
    }

    pub fn log(&self) -> String {
        self.output.borrow().clone()
    }
}

impl Printer for Logger {
    fn clear(&self) {
        self.print(CLEAR_SCREEN);
    }

    fn print(&self, output: &str) {
        self.output.borrow_mut().push_str(output);
    }

    fn eprint(&self, output: &str) {
        self.output.borrow_mut().push_str(output);
    }

    fn println(&self, output: &str) {
        self.print(&format!("{output}\n"));
    }

    fn eprintln(&self, output: &str) {
        self.eprint(&format!("{output}\n"));
    }
}
