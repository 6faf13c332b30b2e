//! # Banner Component
//!
//! The logo shown above every prompt screen.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const LOGO: [&str; 2] = [
    "▀█▀ █▀█ ▄▀█ █▀▀ █▀▀ █▀█",
    " █  █▀▄ █▀█ █▄▄ ██▄ █▀▄",
];

pub struct Banner;

impl Banner {
    /// Rows the banner needs, including the version line.
    pub fn required_height() -> u16 {
        LOGO.len() as u16 + 1
    }
}

impl Component for Banner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = LOGO
            .iter()
            .map(|row| {
                Line::from(Span::styled(
                    *row,
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
