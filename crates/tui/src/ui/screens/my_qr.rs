use engine::{PaymentState, payment_uri};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::ui::{
    components::card::{Card, avatar, centered_box},
    theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &PaymentState) {
    let theme = Theme::default();
    let card_area = centered_box(64, 11, area);
    let me = state.sender.as_payee();

    let lines = vec![
        Line::from(Span::styled(
            "Receive Money",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", avatar(me.initial())),
                Style::default().fg(theme.border_focused),
            ),
            Span::styled(me.name.clone(), Style::default().fg(theme.text)),
        ]),
        Line::from(Span::styled(
            me.upi_handle.clone(),
            Style::default().fg(theme.text_muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Scan to pay with any UPI app",
            Style::default().fg(theme.dim),
        )),
        Line::from(Span::styled(
            payment_uri(&me),
            Style::default().fg(theme.accent),
        )),
    ];

    Card::new("My QR", &theme).focused(true).render_with(
        frame,
        card_area,
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
    );
}
