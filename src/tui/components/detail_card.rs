//! # DetailCard Component
//!
//! Renders one person record as aligned `Label: value` rows. Blank fields are
//! skipped. When the record was reached through a relations page, the edge
//! is shown as an extra `Relation` row and the offset goes in the border.

use crate::api::{PersonRecord, Relation};
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

const LABEL_WIDTH: usize = 10;

/// # Props
///
/// - `record`: the person being shown
/// - `relation`: present only when the record came from a relations page
/// - `offset`: relations offset, shown alongside the relation
pub struct DetailCard<'a> {
    pub record: &'a PersonRecord,
    pub relation: Option<&'a Relation>,
    pub offset: Option<u32>,
}

impl<'a> DetailCard<'a> {
    pub fn new(record: &'a PersonRecord, relation: Option<&'a Relation>, offset: Option<u32>) -> Self {
        Self {
            record,
            relation,
            offset,
        }
    }

    fn rows(&self) -> Vec<(&'static str, &'a str)> {
        let mut rows: Vec<(&'static str, &'a str)> = self
            .record
            .display_fields()
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .collect();
        if let Some(relation) = self.relation
            && !relation.relation.is_empty()
        {
            rows.push(("Relation", relation.relation.as_str()));
        }
        rows
    }
}

impl Component for DetailCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Trace Details ")
            .padding(Padding::horizontal(1));
        if self.relation.is_some()
            && let Some(offset) = self.offset
        {
            block = block.title(Line::from(format!(" Relation #{} ", offset + 1)).right_aligned());
        }

        let lines: Vec<Line> = self
            .rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", format!("{}:", label), width = LABEL_WIDTH),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
