use std::io::{self, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::editor::{Editor, Mode};

pub struct Renderer {
    pub width: u16,
    pub height: u16,
    show_line_numbers: bool,
}

impl Renderer {
    pub fn new(show_line_numbers: bool) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            width,
            height,
            show_line_numbers,
        })
    }

    pub fn setup() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn teardown() -> io::Result<()> {
        execute!(stdout(), Show, EnableLineWrap, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Hand the terminal over to a script run: back to the normal
    /// screen buffer and cooked mode so executor output scrolls like
    /// ordinary console output.
    pub fn suspend() -> io::Result<()> {
        execute!(stdout(), Show, EnableLineWrap, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Take the terminal back after a run.
    pub fn resume(&mut self) -> io::Result<()> {
        Self::setup()?;
        let (width, height) = terminal::size()?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Rows available for text (everything but the status line).
    pub fn text_height(&self) -> usize {
        self.height.saturating_sub(1) as usize
    }

    pub fn render(&self, editor: &Editor) -> io::Result<()> {
        let mut stdout = stdout();

        queue!(stdout, Hide)?;

        let gutter = if self.show_line_numbers {
            digits(editor.buffer.line_count()) + 1
        } else {
            0
        };

        for row in 0..self.text_height() {
            queue!(stdout, MoveTo(0, row as u16), Clear(ClearType::CurrentLine))?;
            let idx = editor.scroll_offset + row;
            if idx >= editor.buffer.line_count() {
                continue;
            }
            if self.show_line_numbers {
                queue!(
                    stdout,
                    SetAttribute(Attribute::Dim),
                    Print(format!("{:>width$} ", idx + 1, width = gutter - 1)),
                    SetAttribute(Attribute::Reset),
                )?;
            }
            let avail = (self.width as usize).saturating_sub(gutter);
            let line: String = editor
                .buffer
                .line(idx)
                .chars()
                .filter(|c| *c != '\n')
                .take(avail)
                .collect();
            queue!(stdout, Print(line))?;
        }

        self.render_status_line(&mut stdout, editor)?;
        self.place_cursor(&mut stdout, editor, gutter)?;

        stdout.flush()
    }

    fn render_status_line(&self, stdout: &mut io::Stdout, editor: &Editor) -> io::Result<()> {
        let row = self.height.saturating_sub(1);
        queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

        if editor.mode == Mode::Command {
            queue!(stdout, Print(format!(":{}", editor.command_buffer)))?;
            return Ok(());
        }

        let name = editor
            .buffer
            .filepath()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string());
        let dirty = if editor.buffer.dirty() { " [+]" } else { "" };
        let (line, col) = editor.buffer.caret_line_col();

        let left = format!("{} {}{}", editor.mode.display(), name, dirty);
        let right = match &editor.message {
            Some(msg) => msg.clone(),
            None => format!("{}:{}", line + 1, col + 1),
        };

        let width = self.width as usize;
        let pad = width.saturating_sub(left.chars().count() + right.chars().count());
        let status: String = format!("{}{}{}", left, " ".repeat(pad), right)
            .chars()
            .take(width)
            .collect();
        queue!(stdout, SetAttribute(Attribute::Reverse))?;
        queue!(stdout, Print(status))?;
        queue!(stdout, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn place_cursor(&self, stdout: &mut io::Stdout, editor: &Editor, gutter: usize) -> io::Result<()> {
        if editor.mode == Mode::Command {
            let col = 1 + editor.command_buffer.chars().count();
            queue!(
                stdout,
                MoveTo(col as u16, self.height.saturating_sub(1)),
                Show
            )?;
            return Ok(());
        }

        let (line, col) = editor.buffer.caret_line_col();
        if line < editor.scroll_offset {
            return Ok(());
        }
        let row = line - editor.scroll_offset;
        if row >= self.text_height() {
            return Ok(());
        }
        queue!(stdout, MoveTo((gutter + col) as u16, row as u16), Show)?;
        Ok(())
    }
}

fn digits(n: usize) -> usize {
    let mut n = n.max(1);
    let mut count = 0;
    while n > 0 {
        count += 1;
        n /= 10;
    }
    count
}
