use ratatui::style::{Color, Modifier, Style};

/// Styles for one render pass. Built once at startup and handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub focused_border: Style,
    pub unfocused_border: Style,
    pub title: Style,
    pub selected_title: Style,
    pub selected_subtitle: Style,
    pub subtitle: Style,
    pub label: Style,
    pub status: Style,
    pub help_key: Style,
    pub help_desc: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let accent = Color::Rgb(0x7D, 0x56, 0xF4);
        let muted = Color::Rgb(0x66, 0x66, 0x66);
        Self {
            focused_border: Style::new().fg(accent),
            unfocused_border: Style::new().fg(muted),
            title: Style::new()
                .fg(Color::Rgb(0xFF, 0xFD, 0xF5))
                .bg(Color::Rgb(0x25, 0xA0, 0x65))
                .add_modifier(Modifier::BOLD),
            selected_title: Style::new()
                .fg(Color::Rgb(0xEE, 0x6F, 0xF8))
                .add_modifier(Modifier::BOLD),
            selected_subtitle: Style::new().fg(Color::Rgb(0xAD, 0x58, 0xB4)),
            subtitle: Style::new().fg(Color::Rgb(0x77, 0x77, 0x77)),
            label: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            status: Style::new().fg(Color::Rgb(0x77, 0x77, 0x77)),
            help_key: Style::new().fg(Color::Rgb(0x90, 0x90, 0x90)),
            help_desc: Style::new().fg(Color::Rgb(0x62, 0x62, 0x62)),
        }
    }
}

impl Theme {
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.unfocused_border
        }
    }
}
