use crate::core::input::InputBuffer;
use crate::core::query::QueryKind;
use crate::core::state::{App, MenuEntry, Screen};
use crate::tui::component::Component;
use crate::tui::components::{
    Banner, DetailCard, INPUT_HEIGHT, InputField, SelectList, TitleBar,
};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Widest a prompt box gets on large terminals.
const PROMPT_WIDTH: u16 = 60;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(screen_label(app.screen), app.account.as_ref()).render(frame, title_area);

    match app.screen {
        Screen::TokenInput => draw_prompt(frame, main_area, "API Token", &app.token_input),
        Screen::TraceNameInput => draw_prompt(frame, main_area, "Trace Name", &app.name_input),
        Screen::TraceNricInput => draw_prompt(frame, main_area, "Trace Mykad", &app.identity_input),
        Screen::TraceIdInput => draw_prompt(frame, main_area, "Trace ID", &app.id_input),
        Screen::MainMenu => draw_menu(frame, main_area, app),
        Screen::TraceNameResults | Screen::History => draw_results(frame, main_area, app),
        Screen::TraceDetails => draw_details(frame, main_area, app),
        Screen::Loading => draw_loading(frame, main_area, app.tick),
        Screen::Error => draw_error_view(
            frame,
            main_area,
            app.error_message.as_deref().unwrap_or("Something went wrong"),
        ),
    }

    let help = Paragraph::new(help_text(app.screen)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::TokenInput => "Token",
        Screen::MainMenu => "Main Menu",
        Screen::TraceNameInput => "Trace Name",
        Screen::TraceNameResults => "Trace Results",
        Screen::TraceNricInput => "Trace Mykad",
        Screen::TraceIdInput => "Trace ID",
        Screen::TraceDetails => "Trace Details",
        Screen::History => "History",
        Screen::Loading => "Loading",
        Screen::Error => "Error",
    }
}

fn help_text(screen: Screen) -> &'static str {
    match screen {
        Screen::TokenInput | Screen::TraceNameInput | Screen::TraceNricInput | Screen::TraceIdInput => {
            " enter submit • ctrl+c quit"
        }
        Screen::MainMenu => " ↑/↓ move • enter select • ctrl+c quit",
        Screen::TraceNameResults => " ↑/↓ move • enter open • n next page • p prev page • m menu",
        Screen::History => " ↑/↓ move • n next page • p prev page • m menu",
        Screen::TraceDetails => " n next relation • p prev relation • any key menu",
        Screen::Loading => " ctrl+c quit",
        Screen::Error => " any key menu",
    }
}

/// Banner above a single input box, centered as a group.
fn draw_prompt(frame: &mut Frame, area: Rect, title: &str, buffer: &InputBuffer) {
    use Constraint::Length;

    let [column] = Layout::horizontal([Length(PROMPT_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [banner_area, _, input_area] = Layout::vertical([
        Length(Banner::required_height()),
        Length(1),
        Length(INPUT_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(column);

    Banner.render(frame, banner_area);
    InputField::new(title, buffer).render(frame, input_area);
}

fn draw_menu(frame: &mut Frame, area: Rect, app: &App) {
    let rows = MenuEntry::ALL
        .iter()
        .map(|entry| (entry.title(), entry.description()))
        .collect();
    SelectList::new("Tracer", rows, app.menu_index).render(frame, area);
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    let (title, empty, kind) = match app.screen {
        Screen::History => ("Search History", "No history found", QueryKind::History),
        _ => ("Trace Results", "No results found for that name", QueryKind::Name),
    };
    let rows = app
        .results
        .iter()
        .map(|item| (item.title(), item.description()))
        .collect();

    let mut list = SelectList::new(title, rows, app.list_index).empty_text(empty);
    if let Some(query) = &app.active_query
        && query.kind() == kind
        && let Some(page) = query.page()
    {
        list = list.subtitle(format!("Page {}", page));
    }
    list.render(frame, area);
}

fn draw_details(frame: &mut Frame, area: Rect, app: &App) {
    let Some(record) = &app.selected_record else {
        draw_error_view(frame, area, "No record selected");
        return;
    };
    let offset = app.active_query.as_ref().and_then(|q| q.offset());
    DetailCard::new(record, app.relation_overlay.as_ref(), offset).render(frame, area);
}

fn draw_loading(frame: &mut Frame, area: Rect, tick: u64) {
    let spinner = SPINNER[(tick % SPINNER.len() as u64) as usize];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Magenta)),
        Span::raw(" Loading..."),
    ]);

    let [center] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), center);
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(" Error ")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}
