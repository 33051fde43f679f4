use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::ui::Theme;
use crate::wizard::PickerItem;

pub fn draw_picker(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[PickerItem],
    cursor: usize,
    theme: &Theme,
) {
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == cursor;
            let marker = if selected { ">" } else { " " };
            let title_style = if selected {
                theme.highlight_style()
            } else {
                theme.style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} {}", item.title), title_style),
                Span::styled(format!("  {}", item.description), theme.muted_style()),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(format!(" {title} "))
        .title_style(theme.primary_style());

    let list = List::new(list_items).block(block);
    let mut state = ListState::default().with_selected(Some(cursor));

    frame.render_stateful_widget(list, area, &mut state);
}
