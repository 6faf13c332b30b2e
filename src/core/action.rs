//! # Actions
//!
//! Everything that can happen in a session becomes an `Action`.
//! Operator presses Enter? That's `Action::Key(Key::Enter)`.
//! A lookup finishes? That's `Action::Completed(completion)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns the `Effect` the driver must carry out.
//! No I/O happens here.
//!
//! ```text
//! App + Action  →  update()  →  App' + Effect
//! ```
//!
//! At most one fetch is ever outstanding: `Effect::Fetch` is only returned
//! together with a move to `Screen::Loading`, and `Loading` ignores every
//! key. Completions are routed by the query they were issued for, not by
//! the screen currently showing.

use log::{debug, info, warn};

use crate::api::{Account, ApiError, HistoryEntry, NameRecord, PersonRecord, Relation};
use crate::core::query::{Direction, QueryContext, QueryKind};
use crate::core::state::{App, MenuEntry, ResultItem, Screen};

/// Terminal-independent keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Esc,
    Other,
}

/// A one-shot remote call: which query, authenticated with which token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub query: QueryContext,
    pub token: String,
}

/// Data returned by a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Names {
        records: Vec<NameRecord>,
        account: Option<Account>,
    },
    Details {
        records: Vec<PersonRecord>,
        account: Option<Account>,
    },
    Relations {
        records: Vec<PersonRecord>,
        relation: Relation,
        account: Option<Account>,
    },
    History {
        entries: Vec<HistoryEntry>,
    },
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Names { records, .. } => records.len(),
            Payload::Details { records, .. } | Payload::Relations { records, .. } => records.len(),
            Payload::History { entries } => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The result of a `Command`, fed back into the loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub query: QueryContext,
    pub outcome: Result<Payload, ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Key(Key),
    Resize { width: u16, height: u16 },
    Completed(Completion),
    /// Spinner frame. Carries nothing; safe to drop.
    Tick,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Fetch(Command),
    /// Save the token. Best effort; failures are never shown.
    PersistCredential(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => {
            info!("Quit requested");
            Effect::Quit
        }
        Action::Resize { width, height } => {
            app.viewport.width = width;
            app.viewport.height = height;
            Effect::None
        }
        Action::Tick => {
            app.tick = app.tick.wrapping_add(1);
            Effect::None
        }
        Action::Completed(completion) => {
            apply_completion(app, completion);
            Effect::None
        }
        Action::Key(key) => {
            let before = app.screen;
            let effect = handle_key(app, key);
            if app.screen != before {
                debug!("{:?} --{:?}--> {:?}", before, key, app.screen);
            }
            effect
        }
    }
}

// ============================================================================
// Keys
// ============================================================================

fn handle_key(app: &mut App, key: Key) -> Effect {
    match app.screen {
        Screen::TokenInput => token_input_key(app, key),
        Screen::MainMenu => main_menu_key(app, key),
        Screen::TraceNameInput => match key {
            Key::Enter => {
                let term = app.name_input.value().trim().to_string();
                if term.is_empty() {
                    return Effect::None;
                }
                begin_fetch(app, QueryContext::name(term))
            }
            other => edit_input(app, other),
        },
        Screen::TraceNricInput => match key {
            Key::Enter => {
                let number = app.identity_input.value().trim().to_string();
                if number.is_empty() {
                    return Effect::None;
                }
                begin_fetch(app, QueryContext::IdentityNumber { number })
            }
            other => edit_input(app, other),
        },
        Screen::TraceIdInput => match key {
            Key::Enter => match app.id_input.value().trim().parse::<i64>() {
                Ok(id) => begin_fetch(app, QueryContext::Id { id }),
                Err(_) => Effect::None,
            },
            Key::Char(c) if !c.is_ascii_digit() => Effect::None,
            other => edit_input(app, other),
        },
        Screen::TraceNameResults => match key {
            Key::Enter => match app.selected_result().and_then(ResultItem::record_id) {
                Some(id) => begin_fetch(app, QueryContext::Id { id }),
                None => Effect::None,
            },
            Key::Char('n' | 'N') => page(app, QueryKind::Name, Direction::Next),
            Key::Char('p' | 'P') => page(app, QueryKind::Name, Direction::Previous),
            Key::Char('m' | 'M') => go_to_menu(app),
            other => move_list_cursor(app, other),
        },
        Screen::History => match key {
            Key::Char('n' | 'N') => page(app, QueryKind::History, Direction::Next),
            Key::Char('p' | 'P') => page(app, QueryKind::History, Direction::Previous),
            Key::Char('m' | 'M') => go_to_menu(app),
            other => move_list_cursor(app, other),
        },
        Screen::TraceDetails => match key {
            Key::Char('n' | 'N') => page_relations(app, Direction::Next),
            Key::Char('p' | 'P') => page_relations(app, Direction::Previous),
            _ => go_to_menu(app),
        },
        Screen::Error => {
            app.error_message = None;
            go_to_menu(app)
        }
        Screen::Loading => Effect::None,
    }
}

fn token_input_key(app: &mut App, key: Key) -> Effect {
    if key != Key::Enter {
        return edit_input(app, key);
    }

    let token = app.token_input.value().trim().to_string();
    if token.is_empty() {
        return Effect::None;
    }

    info!("API token replaced");
    app.credential = token.clone();
    app.token_input.clear();
    app.screen = Screen::MainMenu;
    Effect::PersistCredential(token)
}

fn main_menu_key(app: &mut App, key: Key) -> Effect {
    let last = MenuEntry::ALL.len() - 1;
    match key {
        Key::Up | Key::Char('k') => {
            app.menu_index = app.menu_index.saturating_sub(1);
            Effect::None
        }
        Key::Down | Key::Char('j') => {
            app.menu_index = (app.menu_index + 1).min(last);
            Effect::None
        }
        Key::Enter => match app.selected_menu_entry() {
            MenuEntry::TraceName => go_to(app, Screen::TraceNameInput),
            MenuEntry::TraceMykad => go_to(app, Screen::TraceNricInput),
            MenuEntry::TraceId => go_to(app, Screen::TraceIdInput),
            MenuEntry::History => begin_fetch(app, QueryContext::history()),
            MenuEntry::ReplaceToken => {
                app.token_input.clear();
                go_to(app, Screen::TokenInput)
            }
        },
        _ => Effect::None,
    }
}

fn edit_input(app: &mut App, key: Key) -> Effect {
    if let Some(input) = app.focused_input_mut() {
        match key {
            Key::Char(c) => {
                input.insert(c);
            }
            Key::Backspace => input.backspace(),
            Key::Delete => input.delete(),
            Key::Left => input.move_left(),
            Key::Right => input.move_right(),
            Key::Home => input.move_home(),
            Key::End => input.move_end(),
            _ => {}
        }
    }
    Effect::None
}

fn move_list_cursor(app: &mut App, key: Key) -> Effect {
    match key {
        Key::Up | Key::Char('k') => app.list_index = app.list_index.saturating_sub(1),
        Key::Down | Key::Char('j') => {
            app.list_index = (app.list_index + 1).min(app.results.len().saturating_sub(1));
        }
        Key::Home => app.list_index = 0,
        Key::End => app.list_index = app.results.len().saturating_sub(1),
        _ => {}
    }
    Effect::None
}

fn go_to(app: &mut App, screen: Screen) -> Effect {
    app.screen = screen;
    Effect::None
}

fn go_to_menu(app: &mut App) -> Effect {
    go_to(app, Screen::MainMenu)
}

/// Re-issue the active query one page over. Falls back to the first page
/// when the active query is of another kind.
fn page(app: &mut App, kind: QueryKind, direction: Direction) -> Effect {
    let query = match &app.active_query {
        Some(active) if active.kind() == kind => active.step(direction),
        _ => match kind {
            QueryKind::Name => QueryContext::name(app.name_input.value().trim()),
            _ => QueryContext::history(),
        },
    };
    begin_fetch(app, query)
}

/// Relations are paged around the subject the detail view was opened for.
fn page_relations(app: &mut App, direction: Direction) -> Effect {
    app.relation_overlay = None;

    let current = match &app.active_query {
        Some(active @ QueryContext::Relations { .. }) => Some(active.clone()),
        _ => app
            .selected_record
            .as_ref()
            .map(|record| QueryContext::relations(record.id)),
    };

    match current {
        Some(query) => begin_fetch(app, query.step(direction)),
        None => go_to_menu(app),
    }
}

fn begin_fetch(app: &mut App, query: QueryContext) -> Effect {
    info!(
        "Scheduling {:?} fetch (page={:?}, offset={:?})",
        query.kind(),
        query.page(),
        query.offset()
    );
    app.screen = Screen::Loading;
    app.active_query = Some(query.clone());
    Effect::Fetch(Command {
        query,
        token: app.credential.clone(),
    })
}

// ============================================================================
// Completions
// ============================================================================

fn apply_completion(app: &mut App, completion: Completion) {
    let Completion { query, outcome } = completion;
    let kind = query.kind();

    if app.screen != Screen::Loading {
        warn!("{:?} completion arrived while on {:?}", kind, app.screen);
    }

    let payload = match outcome {
        Err(e) => {
            info!("{:?} fetch failed: {}", kind, e);
            return fail(app, format!("{}: {}", error_prefix(kind), e));
        }
        Ok(payload) if payload.is_empty() => {
            info!("{:?} fetch returned no records", kind);
            return fail(app, empty_message(kind).to_string());
        }
        Ok(payload) => payload,
    };

    info!("{:?} fetch returned {} record(s)", kind, payload.len());
    app.active_query = Some(query);
    app.error_message = None;

    match (kind, payload) {
        (QueryKind::Name, Payload::Names { records, account }) => {
            remember_account(app, account);
            app.results = records.into_iter().map(ResultItem::Name).collect();
            app.list_index = 0;
            app.screen = Screen::TraceNameResults;
        }
        (QueryKind::Id, Payload::Details { records, account }) => {
            remember_account(app, account);
            app.results.clear();
            app.list_index = 0;
            app.selected_record = records.into_iter().next();
            app.relation_overlay = None;
            app.screen = Screen::TraceDetails;
        }
        (
            QueryKind::Relations,
            Payload::Relations {
                records,
                relation,
                account,
            },
        ) => {
            remember_account(app, account);
            app.results.clear();
            app.list_index = 0;
            app.selected_record = records.into_iter().next();
            app.relation_overlay = Some(relation);
            app.screen = Screen::TraceDetails;
        }
        (QueryKind::History, Payload::History { entries }) => {
            app.results = entries.into_iter().map(ResultItem::History).collect();
            app.list_index = 0;
            app.screen = Screen::History;
        }
        (kind, payload) => {
            warn!("{:?} query completed with mismatched payload {:?}", kind, payload);
            fail(app, format!("{}: unexpected response", error_prefix(kind)));
        }
    }
}

fn fail(app: &mut App, message: String) {
    app.error_message = Some(message);
    app.screen = Screen::Error;
}

fn remember_account(app: &mut App, account: Option<Account>) {
    if account.is_some() {
        app.account = account;
    }
}

fn error_prefix(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Name => "Error fetching names",
        QueryKind::Id => "Error fetching details",
        QueryKind::Relations => "Can't find relationships",
        QueryKind::History => "Error fetching history",
    }
}

fn empty_message(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Name => "No results found for that name",
        QueryKind::Id | QueryKind::Relations => "No results found",
        QueryKind::History => "No history found",
    }
}
