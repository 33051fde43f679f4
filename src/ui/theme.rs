use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub foreground: Color,
    pub error: Color,
    pub border: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Yellow,
            secondary: Color::Cyan,
            foreground: Color::Reset,
            error: Color::Red,
            border: Color::DarkGray,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn highlight_style(&self) -> Style {
        self.primary_style().add_modifier(Modifier::REVERSED)
    }

    /// Style for a transcript line, picked from its content
    pub fn transcript_style(&self, line: &str) -> Style {
        if line.starts_with("Failed to") || line.starts_with("No suitable") {
            self.error_style()
        } else if line.contains(": ") && !line.starts_with(' ') && !line.starts_with('"') {
            self.secondary_style()
        } else {
            self.style()
        }
    }
}
