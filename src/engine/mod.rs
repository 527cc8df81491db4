//! Boundary towards the media engine.
//!
//! The controller only ever talks to [`MediaEngine`]. Requests return
//! immediately with a handle or ticket; everything the engine has to say back
//! arrives later as an [`EngineEvent`] on the channel handed to the engine at
//! spawn time.

mod backend_rodio;
mod command;
mod core;
mod handle;
mod shared;
mod sidecar;

#[cfg(test)]
pub(crate) mod fake;

pub use backend_rodio::RodioBackend;
pub use handle::EngineHandle;
pub use sidecar::discover_subtitles;

use crate::domain::{Characteristic, OpenRequest, SessionStatus, TrackGroup, TrackOption};
use anyhow::Result;
use std::{path::Path, time::Duration};

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct ItemHandle(pub u64);

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct ObserverToken(pub u64);

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct SeekTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StatusChanged {
        item: ItemHandle,
        status: SessionStatus,
        duration: Option<f64>,
    },
    Position {
        item: ItemHandle,
        elapsed: f64,
    },
    SeekCompleted {
        item: ItemHandle,
        ticket: SeekTicket,
        finished: bool,
    },
    /// The engine accepted a track selection and now renders `option`.
    TrackSelected {
        item: ItemHandle,
        characteristic: Characteristic,
        option: TrackOption,
    },
}

impl EngineEvent {
    pub fn item(&self) -> ItemHandle {
        match self {
            EngineEvent::StatusChanged { item, .. }
            | EngineEvent::Position { item, .. }
            | EngineEvent::SeekCompleted { item, .. }
            | EngineEvent::TrackSelected { item, .. } => *item,
        }
    }
}

/// Capabilities the playback controller needs from a media engine.
pub trait MediaEngine {
    /// Start loading a source. Readiness is reported through
    /// [`EngineEvent::StatusChanged`] once a status observer is registered.
    fn open(&mut self, request: OpenRequest) -> ItemHandle;

    /// Subscribe to status changes. The current status, if already settled,
    /// is delivered right away.
    fn observe_status(&mut self, item: ItemHandle) -> ObserverToken;

    fn observe_position(&mut self, item: ItemHandle, interval: Duration) -> ObserverToken;

    fn remove_observer(&mut self, token: ObserverToken);

    fn play(&mut self, item: ItemHandle);

    fn pause(&mut self, item: ItemHandle);

    /// Completion is reported as [`EngineEvent::SeekCompleted`] carrying the
    /// returned ticket.
    fn seek(&mut self, item: ItemHandle, target: Duration) -> SeekTicket;

    fn track_group(&self, item: ItemHandle, characteristic: Characteristic)
    -> Option<TrackGroup>;

    /// Acceptance is reported as [`EngineEvent::TrackSelected`]. Options the
    /// engine does not know are rejected without an event.
    fn select_track(&mut self, item: ItemHandle, group: &TrackGroup, option: &TrackOption);

    fn release(&mut self, item: ItemHandle);
}

/// Renders a single source for the engine worker.
///
/// Implementations live on the worker thread and never cross threads.
pub trait PlaybackBackend {
    /// Load the source paused at zero, returning its duration when known.
    fn load(&mut self, path: &Path) -> Result<Option<Duration>>;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, target: Duration) -> Result<()>;
    fn position(&self) -> Duration;
    fn unload(&mut self);
}
