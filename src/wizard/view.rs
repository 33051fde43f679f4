/// An entry in a picker list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub title: String,
    pub description: String,
}

/// The element the user is currently interacting with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Active {
    /// Nothing to show, the flow has not started or has finished
    Idle,
    Input {
        label: String,
        placeholder: String,
        value: String,
        cursor: usize,
    },
    Select {
        title: String,
        items: Vec<PickerItem>,
        cursor: usize,
    },
    Spinner {
        frame: char,
        label: String,
    },
}

/// Everything a frontend needs to draw one frame of a flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub transcript: Vec<String>,
    pub active: Active,
}

impl View {
    /// Plain text rendering of the frame, written to the log when a flow ends
    pub fn to_text(&self) -> String {
        let mut lines = self.transcript.clone();

        match &self.active {
            Active::Idle => {}
            Active::Input {
                label,
                placeholder,
                value,
                ..
            } => {
                let shown = if value.is_empty() { placeholder } else { value };
                lines.push(format!("{label}: {shown}"));
            }
            Active::Select {
                title,
                items,
                cursor,
            } => {
                lines.push(title.clone());
                for (i, item) in items.iter().enumerate() {
                    let marker = if i == *cursor { '>' } else { ' ' };
                    lines.push(format!("{marker} {} ({})", item.title, item.description));
                }
            }
            Active::Spinner { frame, label } => lines.push(format!("{frame} {label}")),
        }

        lines.join("\n")
    }
}
