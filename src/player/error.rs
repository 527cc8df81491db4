use crate::domain::{SessionStatus, TrackKind};
use thiserror::Error;

/// Outcomes the controller absorbs instead of surfacing to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// Engine reported a status other than ready. Terminal until the next
    /// `initialize`.
    #[error("playback session unavailable (status: {0:?})")]
    SessionFailed(SessionStatus),

    /// Normal condition: the item has no alternates of this kind.
    #[error("no {0} track group for this item")]
    NoTrackGroup(TrackKind),

    #[error("no session is ready to play")]
    NotReady,
}
