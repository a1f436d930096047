use engine::{Direction, PaymentState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{
    components::{
        card::{Card, centered_box},
        money::styled_transaction_amount,
    },
    theme::Theme,
};

/// Overlay for the selected transaction, drawn over the underlying screen.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &PaymentState) {
    let theme = Theme::default();
    let Some(record) = state.selected_transaction() else {
        return;
    };

    let (heading, counterparty_label) = match record.direction {
        Direction::Sent => ("Money Sent", "To"),
        Direction::Received => ("Money Received", "From"),
    };
    let label = |text: &'static str| {
        Span::styled(format!("{text:<16}"), Style::default().fg(theme.text_muted))
    };
    let value = |text: String| Span::styled(text, Style::default().fg(theme.text));

    let mut lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(styled_transaction_amount(record, &theme)),
        Line::from(""),
        Line::from(vec![
            label(counterparty_label),
            Span::styled(
                record.counterparty_name.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("UPI ID"), value(record.counterparty_upi.clone())]),
        Line::from(vec![
            label("Date"),
            value(record.timestamp.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Line::from(vec![label("Status"), value("Completed".to_owned())]),
    ];

    if let Some(reference) = &record.transaction_ref {
        lines.push(Line::from(vec![label("Transaction ID"), value(reference.clone())]));
    }
    if let Some(sender) = &record.sender {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![label("Paid from"), value(sender.name.clone())]));
        lines.push(Line::from(vec![label("UPI ID"), value(sender.upi_handle.clone())]));
        lines.push(Line::from(vec![label("Bank"), value(sender.bank.clone())]));
    }

    let height = lines.len() as u16 + 2;
    Card::new("Transaction Details", &theme).focused(true).render_overlay(
        frame,
        centered_box(60, height, area),
        Paragraph::new(lines),
    );
}
