use engine::PaymentState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{
    components::{
        card::{Card, centered_box},
        money::headline_amount,
    },
    theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &PaymentState) {
    let theme = Theme::default();
    let card_area = centered_box(56, 12, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Payment Successful",
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(record) = state.last_transaction() {
        lines.push(Line::from(headline_amount(record.amount, &theme)));
        lines.push(Line::from(vec![
            Span::styled("Paid to ", Style::default().fg(theme.text_muted)),
            Span::styled(
                record.counterparty_name.clone(),
                Style::default().fg(theme.text),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            record.counterparty_upi.clone(),
            Style::default().fg(theme.dim),
        )));
        lines.push(Line::from(Span::styled(
            record.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            Style::default().fg(theme.dim),
        )));
    }
    if let Some(reference) = &state.last_transaction_ref {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Transaction ID: ", Style::default().fg(theme.text_muted)),
            Span::styled(reference.clone(), Style::default().fg(theme.accent)),
        ]));
    }

    Card::new("Success", &theme)
        .focused(true)
        .render_with(frame, card_area, Paragraph::new(lines).alignment(Alignment::Center));
}
