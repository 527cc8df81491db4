use super::{PAUSE_ICON, PLAY_ICON};
use crate::{
    domain::{SessionStatus, TrackKind},
    tui::{ACCENT, FADED, TEXT, Transport},
    ui_state::ScreenState,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

pub struct ControlBar {
    pub transport: Transport,
}

impl StatefulWidget for ControlBar {
    type State = ScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let key_fg = match state.controls_enabled {
            true => ACCENT,
            false => FADED,
        };

        let icon = match self.transport.playing {
            true => PAUSE_ICON,
            false => PLAY_ICON,
        };

        let status = match self.transport.status {
            SessionStatus::ReadyToPlay => Span::from(""),
            SessionStatus::Unknown => Span::from("  loading…").fg(FADED),
            SessionStatus::Failed => Span::from("  failed to load").fg(FADED),
        };

        let subtitles = match state.active_track(TrackKind::Subtitle) {
            Some(name) => Span::from(format!("  cc: {name}")).fg(TEXT),
            None => Span::from(""),
        };

        Line::from_iter([
            Span::from(format!(" {icon} ")).fg(TEXT),
            Span::from("[space]").fg(key_fg),
            Span::from(" play/pause  ").fg(FADED),
            Span::from("[←/→]").fg(key_fg),
            Span::from(" scrub  ").fg(FADED),
            Span::from("[a]").fg(key_fg),
            Span::from(" audio  ").fg(FADED),
            Span::from("[s]").fg(key_fg),
            Span::from(" subtitles  ").fg(FADED),
            Span::from("[q]").fg(ACCENT),
            Span::from(" quit").fg(FADED),
            subtitles,
            status,
        ])
        .centered()
        .render(area, buf);
    }
}
