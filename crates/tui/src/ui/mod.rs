pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::{PaymentState, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::UiState;

pub use terminal::{AppTerminal, TerminalSession};
use theme::Theme;

use components::hints::{self, Hint};

pub fn render(frame: &mut Frame<'_>, state: &PaymentState, ui: &UiState) {
    let theme = Theme::default();
    let area = frame.area();

    // Info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    let content = layout[1];
    match state.screen {
        Screen::Home => screens::home::render(frame, content, state, ui),
        Screen::Scan => screens::scan::render(frame, content, state, ui),
        Screen::ShowMyQr => screens::my_qr::render(frame, content, state),
        Screen::EnterAmount => screens::amount::render(frame, content, state, ui),
        Screen::Success => screens::success::render(frame, content, state),
        // Never stored as the underlying screen.
        Screen::TransactionDetail => {}
    }
    if state.visible_screen() == Screen::TransactionDetail {
        screens::detail::render(frame, content, state);
    }

    render_bottom_bar(frame, layout[2], state, ui, &theme);
    components::toast::render(frame, area, ui.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &PaymentState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            "BHIM UPI",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} • {}", state.sender.name, state.sender.upi_handle),
            Style::default().fg(theme.text_muted),
        ),
        Span::raw("  "),
        Span::styled("Balance", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.balance)),
        Span::styled(
            state.visible_screen().label(),
            Style::default().fg(theme.border_focused),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &PaymentState,
    ui: &UiState,
    theme: &Theme,
) {
    // `q` is typed into the path prompt, so it does not quit there.
    let global: &[Hint] = if ui.image_prompt.is_some() { &[] } else { hints::QUIT };
    let line = hints::hint_bar(context_hints(state, ui), global, theme);
    frame.render_widget(Paragraph::new(line), area);
}

/// Keyboard hints for the visible screen.
fn context_hints(state: &PaymentState, ui: &UiState) -> &'static [Hint] {
    if ui.image_prompt.is_some() {
        return &[("Enter", "decode"), ("Esc", "cancel")];
    }
    match state.visible_screen() {
        Screen::Home => &[
            ("s", "scan"),
            ("m", "my QR"),
            ("1-3", "quick pay"),
            ("↑↓", "select"),
            ("Enter", "detail"),
        ],
        Screen::Scan => &[("c", "camera"), ("u", "upload image"), ("Esc", "back")],
        Screen::EnterAmount if state.processing() => &[("…", "processing")],
        Screen::EnterAmount => &[
            ("0-9", "amount"),
            ("Tab", "preset"),
            ("Enter", "pay"),
            ("Esc", "back"),
        ],
        Screen::Success => &[("Enter", "done"), ("d", "details")],
        Screen::ShowMyQr | Screen::TransactionDetail => &[("Esc", "back")],
    }
}
