use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::{Editor, Mode};

pub fn handle_event(editor: &mut Editor, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Clear any message on keypress
            editor.clear_message();
            handle_key(editor, key);
        }
        Event::Resize(_, _) => {
            // Resize is handled by the renderer
        }
        _ => {}
    }
}

fn handle_key(editor: &mut Editor, key: KeyEvent) {
    // Chords and function keys work from any mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => {
                editor.save();
                return;
            }
            KeyCode::Char('q') => {
                editor.quit();
                return;
            }
            _ => {}
        }
    }
    match key.code {
        KeyCode::F(5) => {
            editor.request_run();
            return;
        }
        KeyCode::F(1) => {
            editor.show_help();
            return;
        }
        _ => {}
    }

    match editor.mode {
        Mode::Insert => handle_insert_mode(editor, key),
        Mode::Command => handle_command_mode(editor, key),
    }
}

fn handle_insert_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => editor.enter_command_mode(),

        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Tab => editor.insert_tab(),
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Backspace => editor.delete_char_backward(),

        KeyCode::Left => editor.buffer.move_left(),
        KeyCode::Right => editor.buffer.move_right(),
        KeyCode::Up => editor.buffer.move_up(),
        KeyCode::Down => editor.buffer.move_down(),
        KeyCode::Home => editor.buffer.move_to_line_start(),
        KeyCode::End => editor.buffer.move_to_line_end(),

        _ => {}
    }
}

fn handle_command_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => editor.enter_insert_mode(),

        KeyCode::Enter => editor.execute_command(),

        KeyCode::Backspace => {
            editor.command_buffer.pop();
            if editor.command_buffer.is_empty() {
                editor.enter_insert_mode();
            }
        }

        KeyCode::Char(c) => {
            editor.command_buffer.push(c);
        }

        _ => {}
    }
}
