//! # InputField Component
//!
//! Single-line bordered prompt for an `InputBuffer`. Shows the placeholder
//! while empty, bullets when masked, and places the terminal cursor at the
//! buffer's cursor column.
//!
//! Text wider than the box scrolls horizontally so the cursor stays visible.

use crate::core::input::InputBuffer;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

/// Borders on both sides.
const BORDER_OFFSET: u16 = 1;

/// Height of the bordered single-line box.
pub const INPUT_HEIGHT: u16 = 3;

/// # Props
///
/// - `title`: the prompt shown in the top border
/// - `buffer`: text, cursor, placeholder and mask flag
pub struct InputField<'a> {
    pub title: &'a str,
    pub buffer: &'a InputBuffer,
}

impl<'a> InputField<'a> {
    pub fn new(title: &'a str, buffer: &'a InputBuffer) -> Self {
        Self { title, buffer }
    }

    /// The visible slice of the display text and the cursor's column inside it.
    fn visible(&self, width: usize) -> (String, u16) {
        let chars: Vec<char> = self.buffer.display_text().chars().collect();
        let cursor = self.buffer.cursor().min(chars.len());
        let char_width = |c: &char| c.width().unwrap_or(0);

        // Drop leading chars until the cursor column fits, keeping one cell for the cursor itself.
        let mut start = 0;
        let mut cursor_col: usize = chars[..cursor].iter().map(char_width).sum();
        while width > 0 && cursor_col >= width && start < cursor {
            cursor_col -= char_width(&chars[start]);
            start += 1;
        }

        let mut used = 0;
        let visible: String = chars[start..]
            .iter()
            .take_while(|c| {
                used += char_width(*c);
                used <= width
            })
            .collect();

        (visible, cursor_col as u16)
    }
}

impl Component for InputField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.title));

        let inner_width = area.width.saturating_sub(BORDER_OFFSET * 2) as usize;

        if self.buffer.value().is_empty() {
            let placeholder = Paragraph::new(self.buffer.placeholder())
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(placeholder, area);
            frame.set_cursor_position((area.x + BORDER_OFFSET, area.y + BORDER_OFFSET));
            return;
        }

        let (visible, cursor_col) = self.visible(inner_width);
        let input = Paragraph::new(visible)
            .style(Style::default().fg(Color::Green))
            .block(block);
        frame.render_widget(input, area);

        let max_x = area.x + area.width.saturating_sub(BORDER_OFFSET + 1);
        let cursor_x = (area.x + BORDER_OFFSET + cursor_col).min(max_x);
        frame.set_cursor_position((cursor_x, area.y + BORDER_OFFSET));
    }
}
