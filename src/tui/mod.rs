// TUI module - Terminal User Interface
//
// Manages the terminal UI using ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard, mouse, paste, timer ticks, conversion results,
//   animation deadlines)
// - Rendering the UI
//
// The loop is the single writer of application state. Animation steps run
// here between wakeups, so the two reveal animations can never interleave;
// the conversion worker only reaches the loop through the event channel.

pub mod app;
pub mod clipboard;
pub mod prompt;
pub mod toast;
pub mod ui;

use crate::config::Config;
use crate::events::ConvertEvent;
use crate::intake;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prompt::PromptAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and cleans up when done.
pub async fn run_tui(
    event_tx: mpsc::Sender<ConvertEvent>,
    mut event_rx: mpsc::Receiver<ConvertEvent>,
    log_buffer: LogBuffer,
    config: Config,
) -> Result<()> {
    // Build the app before touching the terminal so a failure here leaves
    // the shell untouched
    let mut app = App::new(config, log_buffer, event_tx)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on four sources at once:
/// 1. Terminal input (keyboard, mouse, bracketed paste)
/// 2. Timer ticks (periodic redraws, cursor blink, toast expiry)
/// 3. Conversion results from the worker task
/// 4. The typing scheduler's next deadline, armed only while a run is active
///
/// The deadline arm captures the run's generation token when it is armed; by
/// the time the sleep fires the run may have been superseded, in which case
/// the poll is a silent no-op.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<ConvertEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        let deadline = app.typewriter.next_deadline();
        let deadline_at = app.deadline_instant(deadline.map(|(due, _)| due).unwrap_or(0));

        tokio::select! {
            // Keyboard, mouse, or paste input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        Ok(Event::Paste(pasted)) => handle_paste(app, &pasted),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Conversion results
            Some(convert_event) = event_rx.recv() => {
                app.on_convert_event(convert_event);
            }

            // Next animation step
            _ = tokio::time::sleep_until(deadline_at), if deadline.is_some() => {
                if let Some((_, generation)) = deadline {
                    let now = app.now_ms();
                    app.typewriter.poll(generation, now);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input. The path prompt captures all input while open.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if let Some(prompt) = app.prompt.as_mut() {
        match prompt.handle_input(key_event.code) {
            PromptAction::None => {}
            PromptAction::Cancel => {
                app.prompt = None;
                // Picker cancelled: reset selection and any displayed error
                app.file_chosen(None);
            }
            PromptAction::Choose(path) => {
                app.prompt = None;
                app.file_chosen(Some(path));
            }
        }
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('o') | KeyCode::Char('O') | KeyCode::Enter => app.activate_picker(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.download(),
        KeyCode::Char('y') => app.copy_preview(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.file_chosen(None),
        _ => {}
    }
}

/// Handle mouse input: hover drives the drop-card highlight, click browses.
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let (x, y) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            if app.drop_zone.contains(x, y) {
                if !app.drop_zone.drag_active() {
                    app.drop_zone.drag_enter(x, y);
                } else {
                    app.drop_zone.drag_over(x, y);
                }
            } else {
                // The zone's own containment check decides whether this
                // counts as leaving
                app.drop_zone.drag_leave(x, y);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if app.drop_zone.contains(x, y) {
                app.activate_picker();
            }
        }
        _ => {}
    }
}

/// Handle a bracketed paste: dropped file paths, or text for the prompt.
fn handle_paste(app: &mut App, pasted: &str) {
    if let Some(prompt) = app.prompt.as_mut() {
        prompt.insert_str(pasted.trim());
        return;
    }

    let paths = intake::paths_from_paste(pasted);
    if let Some(path) = app.drop_zone.drop_files(&paths) {
        app.submit(path);
    }
}
