use engine::{Amount, PaymentState, fixtures::AMOUNT_PRESETS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::UiState,
    ui::{
        components::{
            card::{Card, avatar, centered_box},
            money::headline_amount,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &PaymentState, ui: &UiState) {
    let theme = Theme::default();
    let Some(draft) = &state.draft else {
        return;
    };

    let card_area = centered_box(60, 14, area);
    let card = Card::new("Enter Amount", &theme).focused(true);
    let inner = card.inner(card_area);
    card.render_frame(frame, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let payee = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", avatar(draft.payee.initial())),
                Style::default().fg(theme.border_focused),
            ),
            Span::styled(
                draft.payee.name.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            draft.payee.upi_handle.clone(),
            Style::default().fg(theme.text_muted),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(payee, rows[0]);

    let amount_line = if draft.amount_input.is_empty() {
        Line::from(Span::styled(
            format!("{}0", engine::CURRENCY_SYMBOL),
            Style::default().fg(theme.dim),
        ))
    } else {
        let style = if draft.amount().is_some() {
            Style::default().fg(theme.text)
        } else {
            Style::default().fg(theme.error)
        };
        Line::from(vec![
            Span::styled(engine::CURRENCY_SYMBOL, style),
            Span::styled(draft.amount_input.clone(), style.add_modifier(Modifier::BOLD)),
        ])
    };
    frame.render_widget(
        Paragraph::new(vec![amount_line, Line::from("")]).alignment(Alignment::Center),
        rows[1],
    );

    let mut presets = Vec::new();
    for (index, rupees) in AMOUNT_PRESETS.iter().enumerate() {
        let label = Amount::from_major(*rupees).to_string();
        let style = if ui.preset_cursor == Some(index) {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text_muted)
        };
        presets.push(Span::styled(format!(" {label} "), style));
        presets.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(presets)).alignment(Alignment::Center),
        rows[2],
    );

    let footer = if state.processing() {
        Line::from(Span::styled(
            "Processing…",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(amount) = draft.amount().filter(|amount| amount.is_positive()) {
        Line::from(vec![
            Span::styled("[Enter] Pay Now  ", Style::default().fg(theme.accent)),
            headline_amount(amount, &theme),
        ])
    } else {
        Line::from(Span::styled(
            "Pay Now (enter an amount)",
            Style::default().fg(theme.dim),
        ))
    };
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), rows[3]);
}
