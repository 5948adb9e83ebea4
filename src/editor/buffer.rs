use ropey::Rope;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

/// The script text being edited.
///
/// Text is a rope addressed by a single caret char index, the way the
/// on-screen textbox addresses it. Files are read and written
/// verbatim; no transformation, no encoding loss.
pub struct Buffer {
    text: Rope,
    caret: usize,
    filepath: Option<PathBuf>,
    dirty: bool,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            caret: 0,
            filepath: None,
            dirty: false,
        }
    }

    pub fn from_file(path: PathBuf) -> io::Result<Self> {
        let text = Rope::from_reader(File::open(&path)?)?;
        Ok(Self {
            text,
            caret: 0,
            filepath: Some(path),
            dirty: false,
        })
    }

    /// Create a buffer from a string (useful for testing)
    #[cfg(test)]
    pub fn from_text(s: &str) -> Self {
        Self {
            text: Rope::from_str(s),
            caret: 0,
            filepath: None,
            dirty: false,
        }
    }

    /// The full text, exactly as it appears on screen.
    pub fn contents(&self) -> String {
        self.text.to_string()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        match self.filepath.clone() {
            Some(path) => self.save_as(path),
            None => Err(io::Error::new(io::ErrorKind::Other, "No file path")),
        }
    }

    /// Write the text verbatim to `path` and adopt it as the buffer's file.
    pub fn save_as(&mut self, path: PathBuf) -> io::Result<()> {
        let mut file = File::create(&path)?;
        self.text.write_to(&mut file)?;
        self.filepath = Some(path);
        self.dirty = false;
        Ok(())
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    pub fn line(&self, idx: usize) -> ropey::RopeSlice {
        self.text.line(idx)
    }

    pub fn line_len(&self, idx: usize) -> usize {
        // Length excluding newline character
        let line = self.text.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Caret position as (line, column) for display.
    pub fn caret_line_col(&self) -> (usize, usize) {
        let line = self.text.char_to_line(self.caret);
        (line, self.caret - self.text.line_to_char(line))
    }

    /// Insert a character at the caret
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert_char(self.caret, ch);
        self.caret += 1;
        self.dirty = true;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Insert `width` spaces at the caret and advance the caret past them.
    pub fn insert_tab(&mut self, width: usize) {
        let spaces = " ".repeat(width);
        self.text.insert(self.caret, &spaces);
        self.caret += width;
        self.dirty = true;
    }

    /// Delete the character before the caret (backspace)
    pub fn delete_char_backward(&mut self) {
        if self.caret > 0 {
            self.text.remove(self.caret - 1..self.caret);
            self.caret -= 1;
            self.dirty = true;
        }
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.caret < self.text.len_chars() {
            self.caret += 1;
        }
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.caret_line_col();
        if line > 0 {
            let target = line - 1;
            self.caret = self.text.line_to_char(target) + col.min(self.line_len(target));
        }
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.caret_line_col();
        if line + 1 < self.line_count() {
            let target = line + 1;
            self.caret = self.text.line_to_char(target) + col.min(self.line_len(target));
        }
    }

    pub fn move_to_line_start(&mut self) {
        let (line, _) = self.caret_line_col();
        self.caret = self.text.line_to_char(line);
    }

    pub fn move_to_line_end(&mut self) {
        let (line, _) = self.caret_line_col();
        self.caret = self.text.line_to_char(line) + self.line_len(line);
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf = Buffer::new();
        assert_eq!(buf.contents(), "");
        assert_eq!(buf.caret(), 0);
        assert!(!buf.dirty());
    }

    #[test]
    fn insert_char_advances_caret() {
        let mut buf = Buffer::new();
        buf.insert_char('h');
        buf.insert_char('i');
        assert_eq!(buf.contents(), "hi");
        assert_eq!(buf.caret(), 2);
        assert!(buf.dirty());
    }

    #[test]
    fn tab_inserts_spaces_at_caret() {
        let mut buf = Buffer::from_text("ab");
        buf.move_right(); // caret at 1
        buf.insert_tab(4);
        assert_eq!(buf.contents(), "a    b");
        assert_eq!(buf.caret(), 5);
    }

    #[test]
    fn backspace_removes_before_caret() {
        let mut buf = Buffer::from_text("abc");
        buf.move_right();
        buf.move_right();
        buf.delete_char_backward();
        assert_eq!(buf.contents(), "ac");
        assert_eq!(buf.caret(), 1);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut buf = Buffer::from_text("abc");
        buf.delete_char_backward();
        assert_eq!(buf.contents(), "abc");
        assert_eq!(buf.caret(), 0);
    }

    #[test]
    fn backspace_joins_lines() {
        let mut buf = Buffer::from_text("ab\ncd");
        for _ in 0..3 {
            buf.move_right();
        }
        buf.delete_char_backward();
        assert_eq!(buf.contents(), "abcd");
        assert_eq!(buf.caret(), 2);
    }

    #[test]
    fn move_right_stops_at_end() {
        let mut buf = Buffer::from_text("ab");
        for _ in 0..5 {
            buf.move_right();
        }
        assert_eq!(buf.caret(), 2);
    }

    #[test]
    fn move_up_clamps_to_shorter_line() {
        let mut buf = Buffer::from_text("hi\nlonger line");
        buf.move_down();
        buf.move_to_line_end(); // end of "longer line"
        buf.move_up();
        let (line, col) = buf.caret_line_col();
        assert_eq!(line, 0);
        assert_eq!(col, 2); // clamped to "hi" length
    }

    #[test]
    fn move_down_keeps_column() {
        let mut buf = Buffer::from_text("abcd\nefgh");
        buf.move_right();
        buf.move_right();
        buf.move_down();
        let (line, col) = buf.caret_line_col();
        assert_eq!(line, 1);
        assert_eq!(col, 2);
    }

    #[test]
    fn caret_line_col_counts_newlines() {
        let mut buf = Buffer::from_text("ab\ncd");
        for _ in 0..4 {
            buf.move_right();
        }
        assert_eq!(buf.caret_line_col(), (1, 1));
    }

    #[test]
    fn save_as_then_reload_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.bil");

        let original = "let x = 1;\n\tprint(x)\n\ntrailing";
        let mut buf = Buffer::from_text(original);
        buf.save_as(path.clone()).unwrap();

        let reloaded = Buffer::from_file(path).unwrap();
        assert_eq!(reloaded.contents(), original);
    }

    #[test]
    fn empty_buffer_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bil");

        let mut buf = Buffer::from_text("");
        buf.save_as(path.clone()).unwrap();

        let reloaded = Buffer::from_file(path).unwrap();
        assert_eq!(reloaded.contents(), "");
    }

    #[test]
    fn save_without_path_errors() {
        let mut buf = Buffer::new();
        buf.insert_char('x');
        assert!(buf.save().is_err());
    }

    #[test]
    fn save_as_clears_dirty_and_adopts_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bil");

        let mut buf = Buffer::new();
        buf.insert_char('x');
        assert!(buf.dirty());
        buf.save_as(path.clone()).unwrap();
        assert!(!buf.dirty());
        assert_eq!(buf.filepath(), Some(path.as_path()));
    }
}
