use engine::PaymentState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::UiState,
    ui::{
        components::card::{Card, centered_box},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &PaymentState, ui: &UiState) {
    let theme = Theme::default();
    let card_area = centered_box(60, 12, area);

    let (camera_label, camera_style) = if ui.camera_running {
        ("Camera on, looking for a QR code…", Style::default().fg(theme.positive))
    } else if state.camera_active {
        ("Starting camera…", Style::default().fg(theme.text_muted))
    } else {
        ("Camera off", Style::default().fg(theme.dim))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Position the QR code within the frame",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled(camera_label, camera_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[c]", Style::default().fg(theme.accent)),
            Span::raw(" Start Camera    "),
            Span::styled("[u]", Style::default().fg(theme.accent)),
            Span::raw(" Upload QR Image"),
        ]),
    ];

    if let Some(path) = &ui.image_prompt {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Image path: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{path}│"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    Card::new("Scan QR Code", &theme)
        .focused(true)
        .render_with(frame, card_area, Paragraph::new(lines).alignment(Alignment::Center));
}
