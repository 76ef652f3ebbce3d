use std::io::Write;

use super::printer::{Printer, CLEAR_SCREEN};

/// Prints to the standard output and error of the process.
pub struct Console {}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl Printer for Console {
    fn clear(&self) {
        self.print(CLEAR_SCREEN);
    }

    fn print(&self, output: &str) {
        print!("{}", &output);

        // Progress lines are printed without a line break.
        let _ = std::io::stdout().flush();
    }

    fn eprint(&self, output: &str) {
        eprint!("{}", &output);
    }

    fn println(&self, output: &str) {
        println!("{}", &output);
    }

    fn eprintln(&self, output: &str) {
        eprintln!("{}", &output);
    }
}
