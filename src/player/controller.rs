use super::{
    PlaybackError, PlaybackSession, SeekFollowUp, SeekState, TrackPickerState,
    state::InFlightSeek,
};
use crate::{
    config::{SeekPolicy, Settings},
    domain::{OpenRequest, SessionStatus, SourceLocator, TrackKind, TrackOption},
    engine::{EngineEvent, MediaEngine, SeekTicket},
    format_clock,
    ui_state::ControlSurface,
};
use std::time::Duration;

/// Owns the playback session and keeps the control surface in step with it.
///
/// Every engine notification and every user input for the screen goes
/// through here, on one thread. The surface is only ever written from this
/// type.
pub struct PlaybackController<E: MediaEngine, S: ControlSurface> {
    engine: E,
    surface: S,

    position_interval: Duration,
    seek_policy: SeekPolicy,

    session: Option<PlaybackSession>,
    seek: SeekState,
    picker: TrackPickerState,
}

impl<E: MediaEngine, S: ControlSurface> PlaybackController<E, S> {
    pub fn new(engine: E, surface: S, settings: &Settings) -> Self {
        PlaybackController {
            engine,
            surface,

            position_interval: settings.position_interval(),
            seek_policy: settings.seek_policy,

            session: None,
            seek: SeekState::default(),
            picker: TrackPickerState::default(),
        }
    }

    /// Open `source` and start listening to it. Controls stay disabled until
    /// the engine reports the item ready.
    pub fn initialize(&mut self, source: SourceLocator) {
        if self.session.is_some() {
            self.teardown();
        }

        self.seek = SeekState::default();
        self.picker = TrackPickerState::default();

        self.surface.set_controls_enabled(false);
        self.surface.hide_picker();
        self.surface.set_time_text(&format_clock(0.0));
        self.surface.set_slider_range(0.0);
        self.surface.set_slider_value(0.0);
        for kind in [TrackKind::Audio, TrackKind::Subtitle] {
            self.surface.set_active_track(kind, None);
        }

        let handle = self.engine.open(OpenRequest::new(source));
        let status_token = self.engine.observe_status(handle);
        let position_token = self.engine.observe_position(handle, self.position_interval);

        self.session = Some(PlaybackSession::new(handle, status_token, position_token));
    }

    /// Route an engine notification. Anything addressed to an item other than
    /// the current one is stale and dropped.
    pub fn handle_event(&mut self, event: EngineEvent) {
        let current = self.session.as_ref().map(|s| s.handle);
        if current != Some(event.item()) {
            log::debug!("Dropping event for stale item {:?}", event.item());
            return;
        }

        match event {
            EngineEvent::StatusChanged {
                status, duration, ..
            } => self.on_status_changed(status, duration),
            EngineEvent::Position { elapsed, .. } => self.on_periodic_position(elapsed),
            EngineEvent::SeekCompleted {
                ticket, finished, ..
            } => self.on_seek_completed(ticket, finished),
            EngineEvent::TrackSelected {
                characteristic,
                option,
                ..
            } => self.on_track_selected(characteristic.kind(), &option),
        }
    }

    pub fn on_status_changed(&mut self, status: SessionStatus, duration: Option<f64>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let repeated = session.status == status;
        session.status = status;

        match status {
            SessionStatus::ReadyToPlay => {
                self.surface.set_controls_enabled(true);
                if repeated {
                    if duration.unwrap_or(0.0) != session.duration_seconds {
                        log::debug!("Duration {duration:?} on repeated ready ignored");
                    }
                    return;
                }

                let duration = duration
                    .filter(|d| d.is_finite() && *d >= 0.0)
                    .unwrap_or(0.0);
                session.duration_seconds = duration;

                self.surface.set_slider_range(duration);
                self.surface.set_slider_value(0.0);
                self.surface.set_duration_text(&format_clock(duration));
                log::info!("Session ready, duration {}", format_clock(duration));
            }

            // Anything short of ready is treated as failure
            _ => {
                self.surface.set_controls_enabled(false);
                if repeated {
                    return;
                }

                self.seek = SeekState::default();
                if self.picker.visible {
                    self.picker.visible = false;
                    self.surface.hide_picker();
                }
                log::warn!("{}", PlaybackError::SessionFailed(status));
            }
        }
    }

    pub fn on_periodic_position(&mut self, elapsed_seconds: f64) {
        self.surface.set_time_text(&format_clock(elapsed_seconds));

        // The thumb belongs to the user while dragging
        if !self.seek.is_dragging {
            self.surface.set_slider_value(elapsed_seconds);
        }
    }

    pub fn on_play_pause_toggled(&mut self) {
        let session = match ready_session(&mut self.session) {
            Ok(s) => s,
            Err(e) => {
                log::debug!("Play/pause ignored: {e}");
                return;
            }
        };

        match session.is_playing {
            true => self.engine.pause(session.handle),
            false => self.engine.play(session.handle),
        }
        session.is_playing = !session.is_playing;
    }

    pub fn on_seek_drag_began(&mut self) {
        if let Err(e) = ready_session(&mut self.session) {
            log::debug!("Drag ignored: {e}");
            return;
        }

        self.seek.is_dragging = true;
        self.seek.pending_target_seconds = None;

        // A seek still settling from an earlier drag must not end this one
        if let Some(in_flight) = self.seek.in_flight.as_mut() {
            in_flight.follow_up = SeekFollowUp::Nothing;
        }
    }

    /// The slider already tracks the finger; nothing to do until release.
    pub fn on_seek_drag_moved(&mut self) {}

    pub fn on_seek_drag_ended(&mut self, target_seconds: f64) {
        self.seek.pending_target_seconds = Some(target_seconds);
        self.seek(target_seconds, SeekFollowUp::EndDrag);
    }

    /// Ask the engine to move to `target_seconds`, truncated to whole seconds.
    ///
    /// `follow_up` runs when this seek completes. A seek issued while another
    /// is in flight replaces it: only the newest completion is acted on.
    pub fn seek(&mut self, target_seconds: f64, follow_up: SeekFollowUp) {
        let session = match ready_session(&mut self.session) {
            Ok(s) => s,
            Err(e) => {
                log::debug!("Seek ignored: {e}");
                self.run_follow_up(follow_up);
                return;
            }
        };

        let whole_secs = target_seconds.max(0.0).trunc() as u64;

        if self.seek_policy == SeekPolicy::PauseWhileSeeking
            && session.is_playing
            && self.seek.in_flight.is_none()
        {
            self.engine.pause(session.handle);
        }

        let ticket = self
            .engine
            .seek(session.handle, Duration::from_secs(whole_secs));

        let follow_up = match self.seek.in_flight.take() {
            Some(previous) => {
                log::debug!("Seek {:?} replaced by {ticket:?}", previous.ticket);
                follow_up.merge(previous.follow_up)
            }
            None => follow_up,
        };

        self.seek.in_flight = Some(InFlightSeek { ticket, follow_up });
        self.seek.pending_target_seconds = Some(whole_secs as f64);
    }

    pub fn on_seek_completed(&mut self, ticket: SeekTicket, finished: bool) {
        let Some(in_flight) = self.seek.in_flight else {
            return;
        };
        if in_flight.ticket != ticket {
            log::debug!("Completion for replaced seek {ticket:?} ignored");
            return;
        }

        self.seek.in_flight = None;
        if !finished {
            log::warn!("Seek {ticket:?} did not finish");
        }

        self.restore_play_state();
        self.run_follow_up(in_flight.follow_up);
    }

    pub fn on_track_button_toggled(&mut self, kind: TrackKind) {
        if self.picker.is_showing(kind) {
            self.picker.visible = false;
            self.surface.hide_picker();
            return;
        }

        let handle = match ready_session(&mut self.session) {
            Ok(s) => s.handle,
            Err(e) => {
                log::debug!("{kind} picker ignored: {e}");
                return;
            }
        };

        let Some(group) = self.engine.track_group(handle, kind.characteristic()) else {
            log::debug!("{}", PlaybackError::NoTrackGroup(kind));
            return;
        };

        let names = group.display_names();
        self.picker = TrackPickerState {
            kind,
            options: group.options,
            visible: true,
        };
        self.surface.show_picker(kind, &names);
    }

    /// # Panics
    ///
    /// If `index` is not a row of the last populated picker.
    pub fn on_track_option_selected(&mut self, kind: TrackKind, index: usize) {
        self.picker.visible = false;
        self.surface.hide_picker();

        assert!(
            index < self.picker.options.len(),
            "track option {index} out of range ({} shown)",
            self.picker.options.len()
        );
        let option = self.picker.options[index].clone();

        let handle = match ready_session(&mut self.session) {
            Ok(s) => s.handle,
            Err(e) => {
                log::debug!("Track selection ignored: {e}");
                return;
            }
        };

        match self.engine.track_group(handle, kind.characteristic()) {
            Some(group) => {
                log::info!("Selecting {kind} track {}", option.display_name);
                self.engine.select_track(handle, &group, &option);
            }
            None => log::debug!("{}", PlaybackError::NoTrackGroup(kind)),
        }
    }

    /// The engine confirmed a selection; label the active track.
    pub fn on_track_selected(&mut self, kind: TrackKind, option: &TrackOption) {
        self.surface
            .set_active_track(kind, Some(&option.display_name));
    }

    /// Drop the session: observers first, then the item itself.
    pub fn teardown(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        self.engine.remove_observer(session.position_token);
        self.engine.remove_observer(session.status_token);
        self.engine.release(session.handle);

        self.seek = SeekState::default();
        self.picker = TrackPickerState::default();
        self.surface.hide_picker();
        self.surface.set_controls_enabled(false);
    }

    fn restore_play_state(&mut self) {
        if self.seek_policy != SeekPolicy::PauseWhileSeeking {
            return;
        }
        if let Some(session) = self.session.as_ref().filter(|s| s.is_playing) {
            self.engine.play(session.handle);
        }
    }

    fn run_follow_up(&mut self, follow_up: SeekFollowUp) {
        match follow_up {
            SeekFollowUp::EndDrag => {
                self.seek.is_dragging = false;
                self.seek.pending_target_seconds = None;
            }
            SeekFollowUp::Nothing => (),
        }
    }
}

// ===============
//    ACCESSORS
// ===============

impl<E: MediaEngine, S: ControlSurface> PlaybackController<E, S> {
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// For widget-local feedback (scrub preview, picker cursor) only.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.session
            .as_ref()
            .map(|s| s.status)
            .unwrap_or_default()
    }

    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_playing)
    }

    pub fn is_dragging(&self) -> bool {
        self.seek.is_dragging
    }

    pub fn seek_state(&self) -> &SeekState {
        &self.seek
    }

    pub fn picker(&self) -> &TrackPickerState {
        &self.picker
    }
}

impl<E: MediaEngine, S: ControlSurface> Drop for PlaybackController<E, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn ready_session(
    session: &mut Option<PlaybackSession>,
) -> Result<&mut PlaybackSession, PlaybackError> {
    match session {
        Some(s) => {
            if s.status.is_ready() {
                Ok(s)
            } else {
                Err(PlaybackError::SessionFailed(s.status))
            }
        }
        None => Err(PlaybackError::NotReady),
    }
}
