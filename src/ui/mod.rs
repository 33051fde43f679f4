mod layout;
mod theme;
pub mod widgets;

pub use layout::Layout;
pub use theme::Theme;

use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};

use crate::app::Frontend;
use crate::error::{OpcliError, Result};
use crate::wizard::{Active, View};
use widgets::StatusBarState;

pub fn draw(frame: &mut Frame, view: &View, theme: &Theme) {
    let layout = Layout::new(frame.area(), &view.active);

    widgets::draw_transcript(frame, layout.transcript, &view.transcript, theme);

    match &view.active {
        Active::Idle => {}
        Active::Input {
            label,
            placeholder,
            value,
            cursor,
        } => widgets::draw_input(
            frame,
            layout.active,
            label,
            placeholder,
            value,
            *cursor,
            theme,
        ),
        Active::Select {
            title,
            items,
            cursor,
        } => widgets::draw_picker(frame, layout.active, title, items, *cursor, theme),
        Active::Spinner { frame: spinner, label } => {
            widgets::draw_spinner(frame, layout.active, *spinner, label, theme)
        }
    }

    let status = StatusBarState::for_active(&view.active);
    widgets::draw_status_bar(frame, layout.status, &status, theme);
}

/// Draws flows onto a ratatui terminal
pub struct TerminalFrontend<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
}

impl<B: Backend> TerminalFrontend<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            theme: Theme::default(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Frontend for TerminalFrontend<B> {
    fn draw(&mut self, view: &View) -> Result<()> {
        let theme = &self.theme;
        self.terminal
            .draw(|frame| draw(frame, view, theme))
            .map_err(|e| OpcliError::Terminal(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::PickerItem;
    use ratatui::backend::TestBackend;

    fn screen(frontend: &mut TerminalFrontend<TestBackend>) -> String {
        let buffer = frontend.terminal_mut().backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn frontend() -> TerminalFrontend<TestBackend> {
        TerminalFrontend::new(Terminal::new(TestBackend::new(60, 12)).unwrap())
    }

    #[test]
    fn picker_frame_shows_transcript_items_and_hints() {
        let mut frontend = frontend();
        let view = View {
            transcript: vec!["Path: ./fn".to_string(), "Name: foo".to_string()],
            active: Active::Select {
                title: "Runtimes".to_string(),
                items: vec![PickerItem {
                    title: "python".to_string(),
                    description: "r1".to_string(),
                }],
                cursor: 0,
            },
        };

        frontend.draw(&view).unwrap();
        let text = screen(&mut frontend);

        assert!(text.contains("Name: foo"));
        assert!(text.contains("Runtimes"));
        assert!(text.contains("> python"));
        assert!(text.contains("Enter: select"));
    }

    #[test]
    fn spinner_frame_shows_progress_label() {
        let mut frontend = frontend();
        let view = View {
            transcript: Vec::new(),
            active: Active::Spinner {
                frame: '/',
                label: "Creating lambda...".to_string(),
            },
        };

        frontend.draw(&view).unwrap();

        assert!(screen(&mut frontend).contains("/ Creating lambda..."));
    }
}
