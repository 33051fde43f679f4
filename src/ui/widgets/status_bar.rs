use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::Theme;
use crate::wizard::Active;

/// Key hints for whatever element is active
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBarState {
    pub left_hint: String,
    pub right_hint: String,
}

impl StatusBarState {
    pub fn for_active(active: &Active) -> Self {
        match active {
            Active::Input { .. } => Self {
                left_hint: "Type to enter text".to_string(),
                right_hint: "Enter: confirm  Esc: cancel  Ctrl+C: quit".to_string(),
            },
            Active::Select { .. } => Self {
                left_hint: "j/k: navigate".to_string(),
                right_hint: "Enter: select  Esc: cancel  Ctrl+C: quit".to_string(),
            },
            Active::Spinner { .. } => Self {
                left_hint: "Waiting for the control plane".to_string(),
                right_hint: "Ctrl+C: quit".to_string(),
            },
            Active::Idle => Self::default(),
        }
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &StatusBarState, theme: &Theme) {
    let left = Line::from(vec![
        Span::raw(" "),
        Span::styled(state.left_hint.as_str(), theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(left), area);

    let right = Line::from(Span::styled(
        state.right_hint.as_str(),
        theme.secondary_style(),
    ));
    let right_width = right.width() as u16;
    if area.width > right_width {
        let right_area = Rect {
            x: area.x + area.width - right_width - 1,
            y: area.y,
            width: right_width + 1,
            height: 1,
        };
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), right_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_has_no_hints() {
        assert_eq!(StatusBarState::for_active(&Active::Idle), StatusBarState::default());
    }

    #[test]
    fn spinner_only_offers_quit() {
        let state = StatusBarState::for_active(&Active::Spinner {
            frame: '|',
            label: "Creating lambda...".to_string(),
        });
        assert_eq!(state.right_hint, "Ctrl+C: quit");
    }
}
