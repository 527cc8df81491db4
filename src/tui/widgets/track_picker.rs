use crate::{
    tui::{ACCENT, TEXT},
    ui_state::ScreenState,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, List, Padding, StatefulWidget},
};

pub struct TrackPicker;

impl StatefulWidget for TrackPicker {
    type State = ScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(picker) = state.picker.as_mut() else {
            return;
        };

        let items = picker
            .items
            .iter()
            .map(|name| Line::from(name.as_str()).fg(TEXT).centered())
            .collect::<Vec<Line>>();

        let block = Block::bordered()
            .title(format!(" {} ", picker.kind))
            .title_bottom(" [Enter] select / [Esc] close ")
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(ACCENT))
            .padding(Padding::uniform(1));

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::new().fg(ACCENT).bold());

        StatefulWidget::render(list, area, buf, &mut picker.selection);
    }
}
