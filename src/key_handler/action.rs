use super::{Action, C, S, SCRUB_LARGE, X};
use crate::{REFRESH_RATE, domain::TrackKind, ui_state::ScreenState};
use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};

use KeyCode::*;

pub fn handle_key_event(key: KeyEvent, screen: &ScreenState, scrub_step: f64) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) | (X, Char('q')) => return Some(Action::QUIT),
        _ => (),
    }

    // Disabled controls swallow everything but quit
    if !screen.controls_enabled {
        return None;
    }

    match screen.picker.is_some() {
        true => handle_picker(&key),
        false => handle_transport(&key, screen, scrub_step),
    }
}

fn handle_picker(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Up) | (X, Char('k')) => Some(Action::PickerUp),
        (X, Down) | (X, Char('j')) => Some(Action::PickerDown),
        (X, Enter) => Some(Action::PickerConfirm),
        (X, Esc) => Some(Action::ClosePicker),

        (X, Char('a')) => Some(Action::ToggleTracks(TrackKind::Audio)),
        (X, Char('s')) => Some(Action::ToggleTracks(TrackKind::Subtitle)),
        _ => None,
    }
}

fn handle_transport(key: &KeyEvent, screen: &ScreenState, step: f64) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Char(' ')) => Some(Action::TogglePause),

        (X, Left) | (X, Char('h')) => Some(Action::Scrub(-step)),
        (X, Right) | (X, Char('l')) => Some(Action::Scrub(step)),
        (S, Left) | (S, Char('H')) => Some(Action::Scrub(-step * SCRUB_LARGE)),
        (S, Right) | (S, Char('L')) => Some(Action::Scrub(step * SCRUB_LARGE)),
        (X, Enter) if screen.is_scrubbing() => Some(Action::CommitScrub),

        (X, Char('a')) => Some(Action::ToggleTracks(TrackKind::Audio)),
        (X, Char('s')) => Some(Action::ToggleTracks(TrackKind::Subtitle)),
        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(REFRESH_RATE)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui_state::ControlSurface;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, X)
    }

    fn enabled_screen() -> ScreenState {
        let mut screen = ScreenState::new("clip");
        screen.set_controls_enabled(true);
        screen.set_slider_range(100.0);
        screen
    }

    #[test]
    fn disabled_controls_only_allow_quit() {
        let screen = ScreenState::new("clip");

        assert_eq!(handle_key_event(press(Char(' ')), &screen, 5.0), None);
        assert_eq!(handle_key_event(press(Char('a')), &screen, 5.0), None);
        assert_eq!(
            handle_key_event(press(Char('q')), &screen, 5.0),
            Some(Action::QUIT)
        );
    }

    #[test]
    fn arrows_scrub_by_configured_step() {
        let screen = enabled_screen();

        assert_eq!(
            handle_key_event(press(Right), &screen, 5.0),
            Some(Action::Scrub(5.0))
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(Left, S), &screen, 5.0),
            Some(Action::Scrub(-30.0))
        );
    }

    #[test]
    fn enter_commits_only_while_scrubbing() {
        let mut screen = enabled_screen();
        assert_eq!(handle_key_event(press(Enter), &screen, 5.0), None);

        screen.scrub_by(5.0);
        assert_eq!(
            handle_key_event(press(Enter), &screen, 5.0),
            Some(Action::CommitScrub)
        );
    }

    #[test]
    fn open_picker_captures_navigation() {
        let mut screen = enabled_screen();
        screen.show_picker(TrackKind::Audio, &["English".to_string()]);

        assert_eq!(
            handle_key_event(press(Down), &screen, 5.0),
            Some(Action::PickerDown)
        );
        assert_eq!(
            handle_key_event(press(Enter), &screen, 5.0),
            Some(Action::PickerConfirm)
        );
        assert_eq!(
            handle_key_event(press(Esc), &screen, 5.0),
            Some(Action::ClosePicker)
        );
        assert_eq!(handle_key_event(press(Char(' ')), &screen, 5.0), None);
    }
}
