use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::Theme;

pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    placeholder: &str,
    value: &str,
    cursor: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.primary_style())
        .title(format!(" {label} "))
        .title_style(theme.primary_style());

    let content = if value.is_empty() {
        Span::styled(placeholder, theme.muted_style())
    } else {
        Span::styled(value, theme.style())
    };

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    let x = inner.x + (cursor as u16).min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, inner.y));
}

pub fn draw_spinner(frame: &mut Frame, area: Rect, spinner: char, label: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(format!("{spinner} "), theme.primary_style()),
        Span::styled(label, theme.style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
