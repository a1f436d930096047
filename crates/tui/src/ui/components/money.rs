use engine::{Amount, Direction, TransactionRecord};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Creates a styled span for a transaction amount, signed by direction.
///
/// - Sent: red with `-` prefix
/// - Received: green with `+` prefix
#[must_use]
pub fn styled_transaction_amount(record: &TransactionRecord, theme: &Theme) -> Span<'static> {
    let (color, prefix) = match record.direction {
        Direction::Sent => (theme.negative, "-"),
        Direction::Received => (theme.positive, "+"),
    };
    Span::styled(
        format!("{prefix}{}", record.amount),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Large neutral amount used on the amount and success screens.
#[must_use]
pub fn headline_amount(amount: Amount, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.to_string(),
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    )
}
