use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// `(key, action)` shown in the bottom bar.
pub type Hint = (&'static str, &'static str);

pub const QUIT: &[Hint] = &[("q", "quit")];

/// Bottom bar: hints for the visible screen, then `global` after a divider.
pub fn hint_bar(screen: &[Hint], global: &[Hint], theme: &Theme) -> Line<'static> {
    let key_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let action_style = Style::default().fg(theme.text_muted);

    let group = |hints: &[Hint]| {
        hints
            .iter()
            .enumerate()
            .flat_map(|(i, (key, action))| {
                [
                    Span::raw(if i == 0 { " " } else { "   " }),
                    Span::styled(*key, key_style),
                    Span::styled(format!(" {action}"), action_style),
                ]
            })
            .collect::<Vec<_>>()
    };

    let mut spans = group(screen);
    if !global.is_empty() {
        if !screen.is_empty() {
            spans.push(Span::styled("  │ ", Style::default().fg(theme.border)));
        }
        spans.extend(group(global));
    }
    Line::from(spans)
}
