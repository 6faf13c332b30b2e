//! # Session Model
//!
//! All mutable session state in one place.
//!
//! ```text
//! App
//! ├── screen: Screen                    // the one active screen
//! ├── credential: String                // empty = unauthenticated
//! ├── token_input / name_input / identity_input / id_input: InputBuffer
//! ├── menu_index: usize                 // main menu cursor
//! ├── active_query: Option<QueryContext>// in-flight or last completed fetch
//! ├── results: Vec<ResultItem>          // last list fetch
//! ├── list_index: usize                 // cursor into results
//! ├── selected_record: Option<PersonRecord>
//! ├── relation_overlay: Option<Relation>
//! ├── error_message: Option<String>     // only Some while screen == Error
//! ├── account: Option<Account>          // echoed back by the service
//! ├── viewport: Viewport                // last resize
//! └── tick: u64                         // spinner frame counter
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use crate::api::{Account, HistoryEntry, NameRecord, PersonRecord, Relation};
use crate::core::input::InputBuffer;
use crate::core::query::QueryContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    TokenInput,
    MainMenu,
    TraceNameInput,
    TraceNameResults,
    TraceNricInput,
    TraceIdInput,
    TraceDetails,
    History,
    Loading,
    Error,
}

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    TraceName,
    TraceMykad,
    TraceId,
    History,
    ReplaceToken,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 5] = [
        MenuEntry::TraceName,
        MenuEntry::TraceMykad,
        MenuEntry::TraceId,
        MenuEntry::History,
        MenuEntry::ReplaceToken,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MenuEntry::TraceName => "Trace Name",
            MenuEntry::TraceMykad => "Trace Mykad",
            MenuEntry::TraceId => "Trace ID",
            MenuEntry::History => "History",
            MenuEntry::ReplaceToken => "Replace Token",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuEntry::TraceName => "Find people using their name",
            MenuEntry::TraceMykad => "Find people using their mykad",
            MenuEntry::TraceId => "Open a record by its id",
            MenuEntry::History => "Your search history",
            MenuEntry::ReplaceToken => "Replace your old token with a new one",
        }
    }
}

/// A row in one of the list screens.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultItem {
    Name(NameRecord),
    History(HistoryEntry),
}

impl ResultItem {
    pub fn title(&self) -> &str {
        match self {
            ResultItem::Name(record) => &record.name,
            ResultItem::History(entry) => &entry.query,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ResultItem::Name(record) => &record.mykad,
            ResultItem::History(entry) => &entry.result,
        }
    }

    /// The record id for name rows; history rows have none.
    pub fn record_id(&self) -> Option<i64> {
        match self {
            ResultItem::Name(record) => Some(record.id),
            ResultItem::History(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

pub struct App {
    pub screen: Screen,
    pub credential: String,
    pub token_input: InputBuffer,
    pub name_input: InputBuffer,
    pub identity_input: InputBuffer,
    pub id_input: InputBuffer,
    pub menu_index: usize,
    pub active_query: Option<QueryContext>,
    pub results: Vec<ResultItem>,
    pub list_index: usize,
    pub selected_record: Option<PersonRecord>,
    pub relation_overlay: Option<Relation>,
    pub error_message: Option<String>,
    pub account: Option<Account>,
    pub viewport: Viewport,
    pub tick: u64,
}

impl App {
    /// Starts at the token prompt when no credential was loaded.
    pub fn new(credential: Option<String>) -> Self {
        let credential = credential.unwrap_or_default();
        let screen = if credential.is_empty() {
            Screen::TokenInput
        } else {
            Screen::MainMenu
        };

        Self {
            screen,
            credential,
            token_input: InputBuffer::masked("Enter your API token"),
            name_input: InputBuffer::new("Search a name"),
            identity_input: InputBuffer::new("Search IC"),
            id_input: InputBuffer::new("Record id"),
            menu_index: 0,
            active_query: None,
            results: Vec::new(),
            list_index: 0,
            selected_record: None,
            relation_overlay: None,
            error_message: None,
            account: None,
            viewport: Viewport::default(),
            tick: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.credential.is_empty()
    }

    pub fn selected_menu_entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.menu_index.min(MenuEntry::ALL.len() - 1)]
    }

    pub fn selected_result(&self) -> Option<&ResultItem> {
        self.results.get(self.list_index)
    }

    /// The input buffer focused by the current screen, if any.
    pub fn focused_input(&self) -> Option<&InputBuffer> {
        match self.screen {
            Screen::TokenInput => Some(&self.token_input),
            Screen::TraceNameInput => Some(&self.name_input),
            Screen::TraceNricInput => Some(&self.identity_input),
            Screen::TraceIdInput => Some(&self.id_input),
            _ => None,
        }
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut InputBuffer> {
        match self.screen {
            Screen::TokenInput => Some(&mut self.token_input),
            Screen::TraceNameInput => Some(&mut self.name_input),
            Screen::TraceNricInput => Some(&mut self.identity_input),
            Screen::TraceIdInput => Some(&mut self.id_input),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{authenticated_app, name_record};

    #[test]
    fn test_new_without_credential_starts_at_token_input() {
        let app = App::new(None);
        assert_eq!(app.screen, Screen::TokenInput);
        assert!(!app.is_authenticated());
    }

    #[test]
    fn test_empty_credential_counts_as_absent() {
        let app = App::new(Some(String::new()));
        assert_eq!(app.screen, Screen::TokenInput);
    }

    #[test]
    fn test_new_with_credential_starts_at_menu() {
        let app = authenticated_app();
        assert_eq!(app.screen, Screen::MainMenu);
        assert_eq!(app.selected_menu_entry(), MenuEntry::TraceName);
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_focused_input_follows_screen() {
        let mut app = authenticated_app();
        assert!(app.focused_input().is_none());
        app.screen = Screen::TraceNameInput;
        assert_eq!(app.focused_input().unwrap().placeholder(), "Search a name");
        app.screen = Screen::TokenInput;
        assert!(app.focused_input().unwrap().is_masked());
    }

    #[test]
    fn test_result_item_accessors() {
        let item = ResultItem::Name(name_record(42, "Ali"));
        assert_eq!(item.title(), "Ali");
        assert_eq!(item.record_id(), Some(42));

        let history = ResultItem::History(HistoryEntry {
            query: "Ali".to_string(),
            result: "2 hits".to_string(),
            ..Default::default()
        });
        assert_eq!(history.description(), "2 hits");
        assert_eq!(history.record_id(), None);
    }
}
