use std::io;
use std::path::PathBuf;

use crate::config::Settings;

use super::{Buffer, Mode};

/// Top-level editor state: the buffer plus everything the input and
/// render layers act on.
pub struct Editor {
    pub buffer: Buffer,
    pub mode: Mode,
    pub command_buffer: String,
    pub running: bool,
    pub message: Option<String>,
    pub scroll_offset: usize,
    pub tab_width: usize,
    run_request: Option<String>,
}

impl Editor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            buffer: Buffer::new(),
            mode: Mode::default(),
            command_buffer: String::new(),
            running: true,
            message: None,
            scroll_offset: 0,
            tab_width: settings.tab_width,
            run_request: None,
        }
    }

    pub fn open(path: PathBuf, settings: &Settings) -> io::Result<Self> {
        let buffer = Buffer::from_file(path)?;
        Ok(Self {
            buffer,
            ..Self::new(settings)
        })
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Adjust scroll offset to keep the caret visible within the viewport
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        let (line, _) = self.buffer.caret_line_col();
        if line < self.scroll_offset {
            self.scroll_offset = line;
        }
        if viewport_height > 0 && line >= self.scroll_offset + viewport_height {
            self.scroll_offset = line - viewport_height + 1;
        }
    }

    // Text editing

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert_char(ch);
    }

    pub fn insert_newline(&mut self) {
        self.buffer.insert_newline();
    }

    /// The tab gesture: spaces, not a tab character.
    pub fn insert_tab(&mut self) {
        self.buffer.insert_tab(self.tab_width);
    }

    pub fn delete_char_backward(&mut self) {
        self.buffer.delete_char_backward();
    }

    // Modes

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
    }

    pub fn enter_insert_mode(&mut self) {
        self.mode = Mode::Insert;
        self.command_buffer.clear();
    }

    // Commands

    /// Snapshot the buffer text for the orchestrator to run.
    pub fn request_run(&mut self) {
        self.run_request = Some(self.buffer.contents());
    }

    /// The pending run's source text, if a run was requested.
    pub fn take_run_request(&mut self) -> Option<String> {
        self.run_request.take()
    }

    pub fn show_help(&mut self) {
        // Redesigned from a fatal unimplemented action into a message.
        self.set_message("help is not yet supported");
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn save(&mut self) {
        if self.buffer.filepath().is_none() {
            self.set_message("No file name (use :w <path>)");
            return;
        }
        match self.buffer.save() {
            Ok(_) => self.set_message("Written"),
            Err(e) => self.set_message(format!("Error: {}", e)),
        }
    }

    fn save_as(&mut self, path: &str) -> bool {
        match self.buffer.save_as(script_path(path)) {
            Ok(_) => {
                self.set_message("Written");
                true
            }
            Err(e) => {
                self.set_message(format!("Error: {}", e));
                false
            }
        }
    }

    fn open_file(&mut self, path: &str) {
        match Buffer::from_file(script_path(path)) {
            Ok(buffer) => {
                self.buffer = buffer;
                self.scroll_offset = 0;
            }
            Err(e) => self.set_message(format!("Error: {}", e)),
        }
    }

    pub fn execute_command(&mut self) {
        let cmd = self.command_buffer.trim().to_string();
        let (name, arg) = match cmd.split_once(' ') {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (cmd.as_str(), None),
        };
        match (name, arg) {
            ("q" | "quit", _) => self.quit(),
            ("w" | "write", None) => self.save(),
            ("w" | "write", Some(path)) => {
                self.save_as(path);
            }
            ("wq", None) => {
                if self.buffer.filepath().is_none() {
                    self.set_message("No file name (use :w <path>)");
                } else {
                    match self.buffer.save() {
                        Ok(_) => self.quit(),
                        Err(e) => self.set_message(format!("Error: {}", e)),
                    }
                }
            }
            ("wq", Some(path)) => {
                if self.save_as(path) {
                    self.quit();
                }
            }
            ("e" | "edit", Some(path)) => self.open_file(path),
            ("e" | "edit", None) => self.set_message("edit: missing path"),
            ("run" | "r", _) => self.request_run(),
            ("help", _) => self.show_help(),
            ("", _) => {}
            _ => self.set_message(format!("Unknown command: {}", cmd)),
        }
        self.command_buffer.clear();
        self.mode = Mode::Insert;
    }
}

/// Apply the `.bil` convention when the user gave no extension.
fn script_path(raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.extension().is_none() {
        path.with_extension("bil")
    } else {
        path
    }
}
