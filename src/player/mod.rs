mod controller;
mod error;
mod state;

pub use controller::PlaybackController;
pub use error::PlaybackError;
pub use state::{PlaybackSession, SeekFollowUp, SeekState, TrackPickerState};
