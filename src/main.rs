use std::env;
use std::path::PathBuf;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;

mod config;
mod console;
mod editor;
mod input;
mod render;
mod run;

use config::{ConfigEngine, Session};
use console::{ConsoleWindow, NativeHost};
use editor::Editor;
use render::Renderer;
use run::{NativeConsoleIo, RhaiExecutor, Runner};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Neutralize any pre-allocated console window before the editor
    // takes the screen, then nudge it back into place without focus.
    let mut console = ConsoleWindow::new(NativeHost::new());
    console.startup_hide();
    console.background_restore();

    let mut config = ConfigEngine::new();
    if let Err(e) = config.load_default() {
        eprintln!("{}", e);
    }
    let settings = config.settings();

    // Open the file given on the command line, else last session's
    let mut session = Session::load();
    let args: Vec<String> = env::args().collect();
    let path = if args.len() > 1 {
        Some(PathBuf::from(&args[1]))
    } else {
        session.last_file.clone().filter(|p| p.exists())
    };
    let mut editor = match path {
        Some(p) => Editor::open(p, &settings).unwrap_or_else(|e| {
            let mut editor = Editor::new(&settings);
            editor.set_message(format!("Error: {}", e));
            editor
        }),
        None => Editor::new(&settings),
    };

    let mut runner = Runner::new(RhaiExecutor::new(), NativeConsoleIo::new());

    // Set up terminal
    Renderer::setup()?;
    let mut renderer = Renderer::new(settings.show_line_numbers)?;

    // Initial render
    editor.adjust_scroll(renderer.text_height());
    renderer.render(&editor)?;

    // Event stream for async key reading
    let mut event_stream = EventStream::new();

    // Main loop
    while editor.running {
        tokio::select! {
            Some(Ok(event)) = event_stream.next() => {
                if let Event::Resize(width, height) = event {
                    renderer.width = width;
                    renderer.height = height;
                }
                input::handle_event(&mut editor, event);
                if let Some(source) = editor.take_run_request() {
                    // The run borrows the screen: executor output and
                    // the acknowledgment prompt happen on the normal
                    // buffer, then the editor takes the terminal back.
                    Renderer::suspend()?;
                    runner.execute(&mut console, &source);
                    renderer.resume()?;
                }
                editor.adjust_scroll(renderer.text_height());
                renderer.render(&editor)?;
            }
        }
    }

    session.last_file = editor.buffer.filepath().map(|p| p.to_path_buf());
    if let Err(e) = session.save() {
        log::debug!("could not persist session: {}", e);
    }

    // Cleanup
    Renderer::teardown()?;

    Ok(())
}
