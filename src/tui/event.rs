use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::core::action::{Action, Key};

/// How often the input thread checks its stop flag between terminal reads.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal input, already stripped of crossterm details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C / Ctrl+D
    ForceQuit,
    Key(Key),
    Resize(u16, u16),
}

impl TuiEvent {
    pub fn into_action(self) -> Action {
        match self {
            TuiEvent::ForceQuit => Action::Quit,
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(width, height) => Action::Resize { width, height },
        }
    }
}

/// Reads the terminal on its own thread and feeds every event into the
/// loop's action queue, the same queue completions arrive on.
///
/// Stops once `stop` is set or the receiver is gone.
pub fn spawn_input_reader(tx: Sender<Action>, stop: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tracer-input".to_string())
        .spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let Some(event) = poll_event_timeout(INPUT_POLL_INTERVAL) else {
                    continue;
                };
                if tx.send(event.into_action()).is_err() {
                    debug!("Input reader stopping: receiver dropped");
                    break;
                }
            }
        })
}

pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Terminal poll failed: {}", e);
            return None;
        }
    }

    match event::read() {
        Ok(Event::Key(key_event)) => translate_key(key_event),
        Ok(Event::Resize(width, height)) => Some(TuiEvent::Resize(width, height)),
        Ok(_) => None,
        Err(e) => {
            warn!("Terminal read failed: {}", e);
            None
        }
    }
}

/// Maps a crossterm key press to a session key. Key releases and bare
/// modifier keys are dropped.
pub fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match key_event.code {
        KeyCode::Modifier(_) => return None,
        KeyCode::Char(c) if control && matches!(c.to_ascii_lowercase(), 'c' | 'd') => {
            return Some(TuiEvent::ForceQuit);
        }
        _ if control => Key::Other,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Esc => Key::Esc,
        _ => Key::Other,
    };
    Some(TuiEvent::Key(key))
}
