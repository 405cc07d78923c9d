// Event handling and main UI loop

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::ui::{
    Dashboard,
    focus::PanelFocus,
    state::{AppState, InputMode},
    ticker::RefreshTicker,
};

mod memo;
mod news;
mod quote;
mod timer;

/// Provider results handled per frame, so a burst can't stall input.
const MAX_PROVIDER_MESSAGES_PER_FRAME: usize = 16;

// Event types sent from the input and ticker threads to the main loop
pub enum UiEvent {
    Input(Event), // Keyboard or other terminal events
    Tick,         // Periodic refresh for the countdown, clock and fades
}

/// Spawn a dedicated thread for terminal input.
fn spawn_input_thread(tx: Sender<UiEvent>) {
    thread::spawn(move || {
        loop {
            if event::poll(Duration::from_millis(250)).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(UiEvent::Input(evt)).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            }
        }
    });
}

pub fn run_ui(state: &mut AppState, refresh: Duration) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::channel();
    spawn_input_thread(event_tx.clone());
    let ticker = RefreshTicker::start(refresh, move || event_tx.send(UiEvent::Tick).is_ok());

    state.start();
    tracing::info!(refresh_ms = refresh.as_millis() as u64, "dashboard started");

    let result = run_app(&mut terminal, state, event_rx);

    // Unmount: stop the ticker before handing the terminal back
    drop(ticker);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("dashboard closed");
    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    event_rx: Receiver<UiEvent>,
) -> io::Result<()> {
    terminal.draw(|frame| Dashboard::render(frame, state))?;

    loop {
        // Collect all pending events so we can coalesce tick bursts and keep inputs snappy
        let mut pending_ticks: u64 = 0;
        let mut pending_inputs: Vec<Event> = Vec::new();

        // Always block for at least one event, then drain the queue
        match event_rx.recv() {
            Ok(UiEvent::Tick) => pending_ticks += 1,
            Ok(UiEvent::Input(ev)) => pending_inputs.push(ev),
            Err(_) => return Ok(()), // Channel closed, exit
        }

        while let Ok(evt) = event_rx.try_recv() {
            match evt {
                UiEvent::Tick => pending_ticks += 1,
                UiEvent::Input(ev) => pending_inputs.push(ev),
            }
        }

        // Any input (keys, resize) can change the screen
        let mut dirty = !pending_inputs.is_empty();

        // Process input events first so user commands are never stuck behind a tick backlog
        for input in pending_inputs {
            if let Event::Key(key) = input {
                if key.kind == KeyEventKind::Press && handle_key(key, state) {
                    return Ok(());
                }
            }
        }

        dirty |= state.drain_provider_messages(MAX_PROVIDER_MESSAGES_PER_FRAME) > 0;

        if pending_ticks > 0 {
            let report = state.on_tick();
            if state.take_bell() {
                ring_bell();
            }
            dirty |= state.tick_needs_repaint(&report);
        }

        if dirty {
            terminal.draw(|frame| Dashboard::render(frame, state))?;
        }
    }
}

fn ring_bell() {
    let mut out = io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || is_ctrl_c(key)
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Route one key press. Returns true when the dashboard should close.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> bool {
    if is_ctrl_c(&key) {
        return true;
    }

    if state.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Char('Q')
        ) {
            state.show_help = false;
        }
        return false;
    }

    // While editing text, keys belong to the input line
    if state.input_mode == InputMode::Editing {
        match state.focus {
            PanelFocus::News => news::handle_news_input(key, state),
            PanelFocus::Memo => memo::handle_memo_input(key, state),
            PanelFocus::Timer | PanelFocus::Quote => state.input_mode = InputMode::Normal,
        }
        return false;
    }

    if should_quit(&key) {
        return true;
    }

    match key.code {
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Tab => state.focus = state.focus.next(),
        KeyCode::BackTab => state.focus = state.focus.previous(),
        KeyCode::Char('w') | KeyCode::Char('W') => state.refresh_weather(),
        _ => match state.focus {
            PanelFocus::Timer => timer::handle_timer_key(key, state),
            PanelFocus::News => news::handle_news_key(key, state),
            PanelFocus::Memo => memo::handle_memo_key(key, state),
            PanelFocus::Quote => quote::handle_quote_key(key, state),
        },
    }

    false
}

/// Shared line editing for the text inputs: typing, Backspace and Ctrl+Backspace.
/// Returns false for keys that are not line edits.
fn edit_line(key: &KeyEvent, line: &mut String, max_chars: usize) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if line.chars().count() < max_chars {
                line.push(c);
            }
            true
        }
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_word(line);
            true
        }
        KeyCode::Backspace => {
            line.pop();
            true
        }
        _ => false,
    }
}

/// Remove the last word and any whitespace after it.
fn delete_word(line: &mut String) {
    let trimmed = line.trim_end().len();
    line.truncate(trimmed);
    let start = line
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    line.truncate(start);
}
