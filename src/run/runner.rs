//! Execution orchestration: one "run the current script and show me
//! the result" cycle.

use crate::console::{ConsoleWindow, WindowHost};

use super::{ConsoleIo, ScriptExecutor};

/// Written to the console after the executor returns, fault or not.
pub const COMPLETION_BANNER: &str =
    "\n----------------------------------\nFinished execution. Press any key...";

/// Sequences a run against the console window.
pub struct Runner<E: ScriptExecutor, C: ConsoleIo> {
    executor: E,
    io: C,
}

impl<E: ScriptExecutor, C: ConsoleIo> Runner<E, C> {
    pub fn new(executor: E, io: C) -> Self {
        Self { executor, io }
    }

    /// Run `source` and display its output on the console.
    ///
    /// Ordering contract: show console, invoke the executor with the
    /// source verbatim, write the completion banner, block for a
    /// single key-press acknowledgment, clear the console buffer, hide
    /// the console. Every step runs in this order even when the
    /// executor faults; the console is never left visible after a
    /// failed run. A fault is written to the console as diagnostic
    /// text ahead of the banner, and logged once cleanup is done.
    pub fn execute<H: WindowHost>(&mut self, console: &mut ConsoleWindow<H>, source: &str) {
        console.show();

        let result = self.executor.execute(source);
        if let Err(fault) = &result {
            self.io.write_line(fault);
        }

        self.io.write_line(COMPLETION_BANNER);
        self.io.wait_for_acknowledgment();
        self.io.clear();
        console.hide();

        if let Err(fault) = result {
            log::warn!("script run faulted: {}", fault);
        }
    }
}
