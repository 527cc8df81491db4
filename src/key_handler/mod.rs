mod action;

pub use action::{handle_key_event, next_event};

use crate::domain::TrackKind;
use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

/// Scrub step multiplier when shift is held.
const SCRUB_LARGE: f64 = 6.0;

#[derive(Debug, PartialEq)]
pub enum Action {
    // Transport
    TogglePause,
    /// Move the seek thumb by this many seconds, starting a drag if needed
    Scrub(f64),
    CommitScrub,

    // Track picker
    ToggleTracks(TrackKind),
    PickerUp,
    PickerDown,
    PickerConfirm,
    ClosePicker,

    QUIT,
}
