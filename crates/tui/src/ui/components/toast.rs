use engine::NoticeLevel;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{app::ToastState, ui::theme::Theme};

/// Notice pinned to the bottom-right corner, above the hint bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>) {
    let Some(toast) = toast else {
        return;
    };
    let theme = Theme::default();
    let (marker, color) = match toast.level {
        NoticeLevel::Info => ("•", theme.text),
        NoticeLevel::Error => ("✗", theme.error),
    };

    let width = (toast.message.chars().count() + 6).min(area.width as usize) as u16;
    let rect = Rect {
        x: area.right().saturating_sub(width),
        y: area.bottom().saturating_sub(4),
        width,
        height: 3,
    }
    .intersection(area);

    let body = Paragraph::new(Line::from(vec![
        Span::styled(format!("{marker} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(toast.message.as_str(), Style::default().fg(color)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(body, rect);
}
