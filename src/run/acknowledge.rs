//! Console stream operations used around a run.
//!
//! The blocking single-key wait lives behind [`ConsoleIo`] so the
//! orchestrator can be tested with a double that never blocks.

use std::io::stdout;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor::MoveTo, execute};

/// What the orchestrator needs from the console's text surface.
pub trait ConsoleIo {
    /// Write one line of text to the console stream.
    fn write_line(&mut self, text: &str);

    /// Block until the user presses a single key. Unbounded: no
    /// timeout, no cancellation.
    fn wait_for_acknowledgment(&mut self);

    /// Clear the console's visible buffer.
    fn clear(&mut self);
}

/// Crossterm-backed console stream.
pub struct NativeConsoleIo;

impl NativeConsoleIo {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeConsoleIo {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleIo for NativeConsoleIo {
    fn write_line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn wait_for_acknowledgment(&mut self) {
        // Raw mode so a single key press is delivered without Enter.
        let raw = terminal::enable_raw_mode();
        if let Err(e) = &raw {
            log::debug!("raw mode unavailable for key wait: {}", e);
        }
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break,
                Ok(_) => continue,
                Err(e) => {
                    log::debug!("key wait read failed: {}", e);
                    break;
                }
            }
        }
        if raw.is_ok() {
            if let Err(e) = terminal::disable_raw_mode() {
                log::debug!("could not leave raw mode: {}", e);
            }
        }
    }

    fn clear(&mut self) {
        if let Err(e) = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
            log::debug!("console clear failed: {}", e);
        }
    }
}
