mod renderer;
mod widgets;

use ratatui::style::Color;

pub use renderer::render;
pub use widgets::{ControlBar, Progress, TrackPicker};

pub(crate) const ACCENT: Color = Color::Rgb(229, 161, 56);
pub(crate) const FADED: Color = Color::DarkGray;
pub(crate) const TEXT: Color = Color::Rgb(220, 220, 215);

/// Controller state the widgets show but the surface does not carry.
#[derive(Debug, Clone, Copy)]
pub struct Transport {
    pub playing: bool,
    pub status: crate::domain::SessionStatus,
}
