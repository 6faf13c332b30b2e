//! # SelectList Component
//!
//! Bordered two-line list used by the main menu, the name results and the
//! search history. Each row is a title with a dimmed description under it.
//!
//! The cursor lives in `App`; a `ListState` is rebuilt each frame from it so
//! ratatui keeps the selected row scrolled into view.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Padding, Paragraph};

/// # Props
///
/// - `title`: shown in the top border
/// - `subtitle`: optional right-aligned border label, e.g. the page number
/// - `rows`: `(title, description)` pairs in display order
/// - `selected`: cursor index into `rows`
/// - `empty_text`: shown instead of the list when `rows` is empty
pub struct SelectList<'a> {
    pub title: &'a str,
    pub subtitle: Option<String>,
    pub rows: Vec<(&'a str, &'a str)>,
    pub selected: usize,
    pub empty_text: &'a str,
}

impl<'a> SelectList<'a> {
    pub fn new(title: &'a str, rows: Vec<(&'a str, &'a str)>, selected: usize) -> Self {
        Self {
            title,
            subtitle: None,
            rows,
            selected,
            empty_text: "Nothing to show.",
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }
}

impl Component for SelectList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .padding(Padding::horizontal(1));
        if let Some(subtitle) = &self.subtitle {
            block = block.title(Line::from(format!(" {} ", subtitle)).right_aligned());
        }

        if self.rows.is_empty() {
            let empty = Paragraph::new(self.empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let selected = self.selected.min(self.rows.len() - 1);
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, (title, description))| {
                let (marker, title_style) = if i == selected {
                    (
                        "> ",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default().fg(Color::White))
                };

                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, title_style),
                        Span::styled(*title, title_style),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", description),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let mut list_state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
    }
}
