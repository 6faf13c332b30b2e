//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One thread owns `App`. Terminal input is read on a separate thread and
//! pushed into the same channel the scheduler reports completions on, so
//! keys, resizes and completions are applied strictly in arrival order.
//! Each iteration the loop:
//!
//! 1. draws, if anything changed
//! 2. blocks on the channel, then applies everything already queued
//! 3. advances the spinner while a fetch is outstanding
//!
//! Effects returned by `update` are executed here and nowhere else.
//! `Tick` never goes through the channel.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: polls every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::credentials::CredentialStore;
use crate::core::state::{App, Screen, Viewport};
use crate::scheduler::Scheduler;

const ANIMATION_INTERVAL: Duration = Duration::from_millis(80);
const IDLE_INTERVAL: Duration = Duration::from_millis(500);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), SetCursorStyle::DefaultUserShape, Hide);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let store = CredentialStore::new(config.token_file.clone());
    let mut app = App::new(store.load());

    // One queue for terminal input and background completions
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(&config, tx.clone())
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    if let Ok(size) = terminal.size() {
        update(
            &mut app,
            Action::Resize {
                width: size.width,
                height: size.height,
            },
        );
    }

    let stop_input = Arc::new(AtomicBool::new(false));
    let input_reader = match event::spawn_input_reader(tx, stop_input.clone()) {
        Ok(handle) => handle,
        Err(e) => {
            ratatui::restore();
            return Err(e);
        }
    };
    info!("Session started on {:?}", app.screen);

    let mut needs_redraw = true; // Force first frame
    let mut last_tick = Instant::now();

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        // Short wait while the spinner runs, long one when idle
        let timeout = if app.screen == Screen::Loading {
            ANIMATION_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        match rx.recv_timeout(timeout) {
            Ok(first) => {
                needs_redraw = true;
                if !apply_queued(&mut app, first, &rx, |effect| {
                    dispatch(effect, &scheduler, &store)
                }) {
                    break Ok(());
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Action queue closed");
                break Ok(());
            }
        }

        if app.screen == Screen::Loading && last_tick.elapsed() >= ANIMATION_INTERVAL {
            update(&mut app, Action::Tick);
            last_tick = Instant::now();
            needs_redraw = true;
        }
    };

    stop_input.store(true, Ordering::Relaxed);
    if input_reader.join().is_err() {
        warn!("Input reader panicked");
    }

    let Viewport { width, height } = app.viewport;
    info!("Session ended on {:?} ({}x{})", app.screen, width, height);

    ratatui::restore();
    result
}

/// Applies `first` and every action already queued behind it, in the order
/// they arrived. Returns `false` as soon as an effect stops the loop; later
/// actions stay queued.
fn apply_queued(
    app: &mut App,
    first: Action,
    rx: &mpsc::Receiver<Action>,
    mut run: impl FnMut(Effect) -> bool,
) -> bool {
    for action in std::iter::once(first).chain(std::iter::from_fn(|| rx.try_recv().ok())) {
        if matches!(action, Action::Completed(_)) {
            debug!("Event loop received completion");
        }
        if !run(update(app, action)) {
            return false;
        }
    }
    true
}

/// Executes an effect. Returns `false` when the loop should stop.
fn dispatch(effect: Effect, scheduler: &Scheduler, store: &CredentialStore) -> bool {
    match effect {
        Effect::None => true,
        Effect::Quit => false,
        Effect::Fetch(command) => {
            scheduler.schedule(command);
            true
        }
        Effect::PersistCredential(token) => {
            let store = store.clone();
            tokio::task::spawn_blocking(move || {
                if let Err(e) = store.save(&token) {
                    warn!("Failed to save token to {}: {}", store.path().display(), e);
                }
            });
            true
        }
    }
}
