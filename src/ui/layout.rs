use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

use crate::wizard::Active;

pub struct Layout {
    pub transcript: Rect,
    pub active: Rect,
    pub status: Rect,
}

impl Layout {
    pub fn new(area: Rect, active: &Active) -> Self {
        // The active element keeps its natural height; the transcript takes the rest
        let active_height = match active {
            Active::Idle => 0,
            Active::Spinner { .. } => 1,
            Active::Input { .. } => 3,
            Active::Select { items, .. } => u16::try_from(items.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2),
        };

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),                  // Transcript
                Constraint::Length(active_height),   // Active element
                Constraint::Length(1),               // Status bar
            ])
            .split(area);

        Self {
            transcript: chunks[0],
            active: chunks[1],
            status: chunks[2],
        }
    }
}
