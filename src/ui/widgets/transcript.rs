use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::ui::Theme;

/// Completed steps, scrolled so the newest lines stay visible
pub fn draw_transcript(frame: &mut Frame, area: Rect, lines: &[String], theme: &Theme) {
    let text: Vec<Line> = lines
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), theme.transcript_style(line))))
        .collect();

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });

    // Scroll by wrapped rows, not logical lines
    let rows = u16::try_from(paragraph.line_count(area.width)).unwrap_or(u16::MAX);
    let overflow = rows.saturating_sub(area.height);

    frame.render_widget(paragraph.scroll((overflow, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn rows(lines: &[&str], width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        terminal
            .draw(|frame| draw_transcript(frame, frame.area(), &lines, &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn wrapped_lines_keep_the_newest_line_visible() {
        let rows = rows(
            &[
                "Name: foo",
                "",
                "Failed to create lambda: API returned 500: something long went wrong here",
                "LAST",
            ],
            20,
            6,
        );

        assert_eq!(rows.last().map(String::as_str), Some("LAST"));
        assert!(!rows.iter().any(|row| row.starts_with("Name: foo")));
    }

    #[test]
    fn short_transcript_starts_at_the_top() {
        let rows = rows(&["Path: ./fn", "Name: foo"], 20, 6);

        assert_eq!(rows[0], "Path: ./fn");
        assert_eq!(rows[1], "Name: foo");
    }
}
