use super::DUR_WIDTH;
use crate::{
    tui::{ACCENT, FADED, TEXT},
    ui_state::ScreenState,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Text,
    widgets::{LineGauge, StatefulWidget, Widget},
};

/// Seek slider flanked by elapsed and total time.
pub struct Progress;

impl StatefulWidget for Progress {
    type State = ScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let [elapsed, gauge, duration] = Layout::horizontal([
            Constraint::Length(DUR_WIDTH + 3),
            Constraint::Fill(1),
            Constraint::Length(DUR_WIDTH + 3),
        ])
        .areas(row);

        // While scrubbing show where the thumb is, not where playback is
        let elapsed_str = match state.is_scrubbing() {
            true => crate::format_clock(state.slider_value),
            false => state.time_text.clone(),
        };

        let fg = match (state.controls_enabled, state.is_scrubbing()) {
            (false, _) => FADED,
            (true, true) => TEXT,
            (true, false) => ACCENT,
        };

        Text::from(elapsed_str)
            .fg(FADED)
            .centered()
            .render(elapsed, buf);

        LineGauge::default()
            .filled_style(Style::new().fg(fg))
            .unfilled_style(Style::new().fg(FADED))
            .label("")
            .ratio(state.slider_ratio())
            .render(gauge, buf);

        Text::from(state.duration_text.as_str())
            .fg(FADED)
            .centered()
            .render(duration, buf);
    }
}
