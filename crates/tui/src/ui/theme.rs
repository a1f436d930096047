use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(18, 22, 48),
            text: Color::Rgb(230, 230, 240),
            text_muted: Color::Rgb(170, 170, 190),
            dim: Color::Rgb(120, 120, 140),
            accent: Color::Rgb(140, 110, 230),
            border: Color::Rgb(70, 70, 110),
            border_focused: Color::Rgb(120, 140, 240),
            positive: Color::Rgb(80, 190, 120),
            negative: Color::Rgb(220, 80, 80),
            error: Color::Rgb(230, 90, 90),
        }
    }
}
