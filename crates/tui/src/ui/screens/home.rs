use chrono::Utc;
use engine::{PaymentState, relative_label};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::UiState,
    ui::{
        components::{
            card::{Card, avatar},
            money::styled_transaction_amount,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &PaymentState, ui: &UiState) {
    let theme = Theme::default();

    // Actions, quick pay, recent transactions
    let quick_pay_height = state.merchants.len() as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(quick_pay_height),
            Constraint::Min(5),
        ])
        .split(area);

    render_actions(frame, layout[0], state, &theme);
    render_quick_pay(frame, layout[1], state, &theme);
    render_recent_transactions(frame, layout[2], state, ui, &theme);
}

fn render_actions(frame: &mut Frame<'_>, area: Rect, state: &PaymentState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    let scan = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[s]", Style::default().fg(theme.accent)),
            Span::styled(
                " Scan QR",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "Pay any UPI QR code",
            Style::default().fg(theme.dim),
        )),
    ]);
    Card::new("Scan", theme).render_with(frame, cols[0], scan);

    let my_qr = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[m]", Style::default().fg(theme.accent)),
            Span::styled(
                " My QR",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            state.sender.upi_handle.clone(),
            Style::default().fg(theme.dim),
        )),
    ]);
    Card::new("Receive", theme).render_with(frame, cols[1], my_qr);
}

fn render_quick_pay(frame: &mut Frame<'_>, area: Rect, state: &PaymentState, theme: &Theme) {
    let items: Vec<ListItem> = state
        .merchants
        .iter()
        .enumerate()
        .map(|(i, merchant)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Style::default().fg(theme.accent)),
                Span::styled(
                    format!("{} ", avatar(merchant.initial())),
                    Style::default().fg(theme.border_focused),
                ),
                Span::styled(merchant.name.clone(), Style::default().fg(theme.text)),
                Span::raw("  "),
                Span::styled(
                    merchant.upi_handle.clone(),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled("  →", Style::default().fg(theme.accent)),
            ]))
        })
        .collect();

    Card::new("Quick Pay", theme).render_with(frame, area, List::new(items));
}

fn render_recent_transactions(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &PaymentState,
    ui: &UiState,
    theme: &Theme,
) {
    let card = Card::new("Recent Transactions", theme).focused(true);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let now = Utc::now();
    let items: Vec<ListItem> = state
        .transactions
        .iter()
        .map(|record| {
            let when = format!(
                "{} • {}",
                relative_label(record.timestamp, now),
                record.timestamp.format("%Y-%m-%d")
            );
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", avatar(record.initial())),
                    Style::default().fg(theme.border_focused),
                ),
                Span::styled(
                    format!("{:<16}", record.counterparty_name),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:<20}", record.counterparty_upi),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(format!("{when:<28}"), Style::default().fg(theme.dim)),
                styled_transaction_amount(record, theme),
                Span::styled(
                    format!("  {}", record.direction.as_str().to_uppercase()),
                    Style::default().fg(theme.dim),
                ),
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No recent transactions",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(ui.home_cursor));
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, inner, &mut list_state);
}
