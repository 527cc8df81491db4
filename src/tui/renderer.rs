use super::{ControlBar, FADED, Progress, TEXT, TrackPicker, Transport};
use crate::ui_state::ScreenState;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
    widgets::{Clear, StatefulWidget, Widget},
};

pub fn render(f: &mut Frame, screen: &mut ScreenState, transport: Transport) {
    let [title, _, progress, controls] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(f.area());

    Line::from(format!(" {} ", screen.title))
        .fg(TEXT)
        .bold()
        .centered()
        .render(title, f.buffer_mut());

    Progress.render(progress, f.buffer_mut(), screen);
    ControlBar { transport }.render(controls, f.buffer_mut(), screen);

    if screen.picker.is_some() {
        let popup = centered_rect(40, 40, f.area());
        Clear.render(popup, f.buffer_mut());
        TrackPicker.render(popup, f.buffer_mut(), screen);
    } else if !screen.controls_enabled {
        Line::from("controls unavailable")
            .fg(FADED)
            .centered()
            .render(centered_rect(60, 10, f.area()), f.buffer_mut());
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}
