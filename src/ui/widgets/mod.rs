mod picker;
mod prompt;
mod status_bar;
mod transcript;

pub use picker::draw_picker;
pub use prompt::{draw_input, draw_spinner};
pub use status_bar::{draw_status_bar, StatusBarState};
pub use transcript::draw_transcript;
