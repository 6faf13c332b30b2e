//! # TitleBar Component
//!
//! Top status bar: application name, the screen being shown, and once the
//! service has echoed it back, a summary of the account behind the token.
//!
//! ## Conditional Formatting
//!
//! 1. **No account yet**: `"Tracer | Main Menu"`
//! 2. **Account known**: `"Tracer | Main Menu | ops | RM 12.50 | pro until 2026-12-31"`
//!
//! The plan segment is left out when no subscription is active.

use crate::api::Account;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `screen_label`: human name of the active screen
/// - `account`: account summary from the last completion that carried one
pub struct TitleBar<'a> {
    pub screen_label: &'a str,
    pub account: Option<&'a Account>,
}

impl<'a> TitleBar<'a> {
    pub fn new(screen_label: &'a str, account: Option<&'a Account>) -> Self {
        Self {
            screen_label,
            account,
        }
    }

    pub fn account_summary(&self) -> Option<String> {
        let account = self.account?;
        let mut parts = vec![account.name.clone(), format!("RM {:.2}", account.balance)];
        if let Some(sub) = account.active_subscription() {
            match sub.expired_at {
                Some(expiry) => parts.push(format!("{} until {}", sub.plan, expiry.format("%Y-%m-%d"))),
                None => parts.push(sub.plan.clone()),
            }
        }
        Some(parts.join(" | "))
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Tracer",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" | {}", self.screen_label)),
        ];

        if let Some(summary) = self.account_summary() {
            spans.push(Span::styled(
                format!(" | {}", summary),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Subscription;
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_without_account() {
        let mut title_bar = TitleBar::new("Main Menu", None);
        let text = render_text(&mut title_bar);
        assert!(text.contains("Tracer | Main Menu"));
        assert!(!text.contains("RM"));
    }

    #[test]
    fn test_title_bar_with_active_plan() {
        let account = Account {
            name: "ops".to_string(),
            balance: 12.5,
            subscriptions: vec![
                Subscription {
                    plan: "basic".to_string(),
                    active: false,
                    expired_at: None,
                },
                Subscription {
                    plan: "pro".to_string(),
                    active: true,
                    expired_at: Some(Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()),
                },
            ],
            ..Default::default()
        };
        let mut title_bar = TitleBar::new("History", Some(&account));
        assert_eq!(
            title_bar.account_summary().as_deref(),
            Some("ops | RM 12.50 | pro until 2026-12-31")
        );
        let text = render_text(&mut title_bar);
        assert!(text.contains("pro until 2026-12-31"));
    }

    #[test]
    fn test_summary_without_subscription() {
        let account = Account {
            name: "ops".to_string(),
            balance: 3.0,
            ..Default::default()
        };
        let title_bar = TitleBar::new("Main Menu", Some(&account));
        assert_eq!(title_bar.account_summary().as_deref(), Some("ops | RM 3.00"));
    }
}
