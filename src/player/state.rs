use crate::{
    domain::{SessionStatus, TrackKind, TrackOption},
    engine::{ItemHandle, ObserverToken, SeekTicket},
};

/// One loaded media item.
#[derive(Debug)]
pub struct PlaybackSession {
    pub handle: ItemHandle,
    pub status: SessionStatus,
    pub duration_seconds: f64,
    pub is_playing: bool,

    pub(crate) status_token: ObserverToken,
    pub(crate) position_token: ObserverToken,
}

impl PlaybackSession {
    pub(crate) fn new(
        handle: ItemHandle,
        status_token: ObserverToken,
        position_token: ObserverToken,
    ) -> Self {
        PlaybackSession {
            handle,
            status: SessionStatus::Unknown,
            duration_seconds: 0.0,
            is_playing: false,
            status_token,
            position_token,
        }
    }
}

/// What to do once a seek settles.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum SeekFollowUp {
    #[default]
    Nothing,
    EndDrag,
}

impl SeekFollowUp {
    /// A replacing seek inherits the drag release of the one it replaced.
    pub(crate) fn merge(self, other: SeekFollowUp) -> SeekFollowUp {
        match (self, other) {
            (SeekFollowUp::EndDrag, _) | (_, SeekFollowUp::EndDrag) => SeekFollowUp::EndDrag,
            _ => SeekFollowUp::Nothing,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) struct InFlightSeek {
    pub ticket: SeekTicket,
    pub follow_up: SeekFollowUp,
}

#[derive(Debug, Default)]
pub struct SeekState {
    pub is_dragging: bool,
    /// Last user-chosen position; only meaningful while dragging or seeking.
    pub pending_target_seconds: Option<f64>,

    pub(crate) in_flight: Option<InFlightSeek>,
}

#[derive(Debug, Default)]
pub struct TrackPickerState {
    pub kind: TrackKind,
    pub options: Vec<TrackOption>,
    pub visible: bool,
}

impl TrackPickerState {
    pub fn is_showing(&self, kind: TrackKind) -> bool {
        self.visible && self.kind == kind
    }
}
