use super::{
    EngineEvent, ItemHandle, ObserverToken, PlaybackBackend, SeekTicket, command::EngineCommand,
    shared::EngineShared, sidecar::discover_subtitles,
};
use crate::{
    REFRESH_RATE,
    domain::{AssetKey, Characteristic, OpenRequest, SessionStatus, TrackGroup, TrackOption},
};
use anyhow::{Result, bail};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

struct LoadedItem {
    handle: ItemHandle,
    status: SessionStatus,
    duration: Option<Duration>,
    subtitles: Vec<TrackOption>,
    active_subtitle: Option<u64>,
}

struct PositionObserver {
    token: ObserverToken,
    item: ItemHandle,
    interval: Duration,
    last_emit: Option<Instant>,
}

pub(crate) struct EngineCore<B> {
    backend: Option<B>,
    commands: Receiver<EngineCommand>,
    events: Sender<EngineEvent>,
    shared: Arc<EngineShared>,

    current: Option<LoadedItem>,
    status_observers: Vec<(ObserverToken, ItemHandle)>,
    position_observers: Vec<PositionObserver>,
}

impl<B: PlaybackBackend> EngineCore<B> {
    /// The backend is built on the worker thread so it never has to be `Send`.
    pub fn spawn<F>(
        make_backend: F,
        commands: Receiver<EngineCommand>,
        events: Sender<EngineEvent>,
        shared: Arc<EngineShared>,
    ) -> JoinHandle<()>
    where
        F: FnOnce() -> Result<B> + Send + 'static,
    {
        thread::spawn(move || {
            let backend = match make_backend() {
                Ok(b) => Some(b),
                Err(e) => {
                    log::error!("Playback backend unavailable: {e:#}");
                    None
                }
            };

            let mut core = EngineCore {
                backend,
                commands,
                events,
                shared,

                current: None,
                status_observers: Vec::new(),
                position_observers: Vec::new(),
            };

            core.run();
        })
    }

    fn run(&mut self) {
        loop {
            match self.commands.recv_timeout(REFRESH_RATE) {
                Ok(EngineCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(cmd) => self.process_command(cmd),
                Err(RecvTimeoutError::Timeout) => (),
            }
            self.emit_positions();
        }

        if let Some(item) = self.current.as_ref().map(|c| c.handle) {
            self.release(item);
        }
        log::debug!("Engine worker stopped");
    }

    fn process_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Open { item, request } => self.open(item, request),
            EngineCommand::ObserveStatus { item, token } => self.observe_status(item, token),
            EngineCommand::ObservePosition {
                item,
                token,
                interval,
            } => self.position_observers.push(PositionObserver {
                token,
                item,
                interval,
                last_emit: None,
            }),
            EngineCommand::RemoveObserver(token) => self.remove_observer(token),
            EngineCommand::Play(item) => self.with_ready(item, |b| b.play()),
            EngineCommand::Pause(item) => self.with_ready(item, |b| b.pause()),
            EngineCommand::Seek {
                item,
                ticket,
                target,
            } => self.seek(item, ticket, target),
            EngineCommand::Select {
                item,
                characteristic,
                option,
            } => self.select(item, characteristic, option),
            EngineCommand::Release(item) => self.release(item),
            EngineCommand::Shutdown => (),
        }
    }

    fn open(&mut self, item: ItemHandle, request: OpenRequest) {
        if let Some(previous) = self.current.as_ref().map(|c| c.handle) {
            self.release(previous);
        }

        let path = request.source.path();
        let (status, duration) = match self.resolve(&request) {
            Ok(duration) => (SessionStatus::ReadyToPlay, duration),
            Err(e) => {
                log::warn!("Could not open {}: {e:#}", request.source);
                (SessionStatus::Failed, None)
            }
        };

        let subtitles = match status {
            SessionStatus::ReadyToPlay => discover_subtitles(path),
            _ => Vec::new(),
        };

        if !subtitles.is_empty() {
            log::info!("Found {} subtitle file(s) for {}", subtitles.len(), request.source);
            self.shared.publish_groups(
                item,
                vec![TrackGroup {
                    characteristic: Characteristic::Legible,
                    options: subtitles.clone(),
                }],
            );
        }

        self.current = Some(LoadedItem {
            handle: item,
            status,
            duration,
            subtitles,
            active_subtitle: None,
        });
        self.notify_status(item);
    }

    fn resolve(&mut self, request: &OpenRequest) -> Result<Option<Duration>> {
        let Some(backend) = self.backend.as_mut() else {
            bail!("no playback backend");
        };

        let duration = backend.load(request.source.path())?;

        for key in &request.keys {
            match key {
                AssetKey::Playable => log::debug!("{}: playable", request.source),
                // Local files carry no DRM
                AssetKey::HasProtectedContent => {
                    log::debug!("{}: no protected content", request.source)
                }
            }
        }

        Ok(duration)
    }

    fn observe_status(&mut self, item: ItemHandle, token: ObserverToken) {
        self.status_observers.push((token, item));

        let settled = self
            .current
            .as_ref()
            .is_some_and(|c| c.handle == item && c.status != SessionStatus::Unknown);
        if settled {
            self.send_status(item);
        }
    }

    fn notify_status(&mut self, item: ItemHandle) {
        if self.status_observers.iter().any(|(_, i)| *i == item) {
            self.send_status(item);
        }
    }

    fn send_status(&self, item: ItemHandle) {
        if let Some(current) = self.current.as_ref().filter(|c| c.handle == item) {
            let _ = self.events.send(EngineEvent::StatusChanged {
                item,
                status: current.status,
                duration: current.duration.map(|d| d.as_secs_f64()),
            });
        }
    }

    fn remove_observer(&mut self, token: ObserverToken) {
        self.status_observers.retain(|(t, _)| *t != token);
        self.position_observers.retain(|o| o.token != token);
    }

    fn is_ready(&self, item: ItemHandle) -> bool {
        self.current
            .as_ref()
            .is_some_and(|c| c.handle == item && c.status.is_ready())
    }

    fn with_ready(&mut self, item: ItemHandle, f: impl FnOnce(&mut B)) {
        if !self.is_ready(item) {
            log::debug!("Ignoring request for {item:?}: not ready");
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            f(backend);
        }
    }

    fn seek(&mut self, item: ItemHandle, ticket: SeekTicket, target: Duration) {
        let finished = match (self.is_ready(item), self.backend.as_mut()) {
            (true, Some(backend)) => match backend.seek(target) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Seek to {target:?} failed: {e:#}");
                    false
                }
            },
            _ => false,
        };

        let _ = self.events.send(EngineEvent::SeekCompleted {
            item,
            ticket,
            finished,
        });

        // Next tick reports the new position
        for observer in self.position_observers.iter_mut().filter(|o| o.item == item) {
            observer.last_emit = None;
        }
    }

    fn select(&mut self, item: ItemHandle, characteristic: Characteristic, option: u64) {
        let Some(current) = self.current.as_mut().filter(|c| c.handle == item) else {
            log::debug!("Ignoring track selection for {item:?}: not loaded");
            return;
        };

        let chosen = match characteristic {
            Characteristic::Legible => current.subtitles.iter().find(|o| o.id == option).cloned(),
            Characteristic::Audible => None,
        };
        let Some(chosen) = chosen else {
            log::warn!("Rejected unknown {characteristic:?} option {option}");
            return;
        };

        if current.active_subtitle == Some(chosen.id) {
            log::debug!("{} already active", chosen.display_name);
            return;
        }

        log::info!("Subtitle track selected: {}", chosen.display_name);
        current.active_subtitle = Some(chosen.id);

        let _ = self.events.send(EngineEvent::TrackSelected {
            item,
            characteristic,
            option: chosen,
        });
    }

    fn release(&mut self, item: ItemHandle) {
        let Some(loaded) = self
            .current
            .as_ref()
            .filter(|c| c.handle == item)
            .map(|c| c.status.is_ready())
        else {
            return;
        };

        if loaded && let Some(backend) = self.backend.as_mut() {
            backend.unload();
        }
        self.current = None;
        self.status_observers.retain(|(_, i)| *i != item);
        self.position_observers.retain(|o| o.item != item);
        self.shared.clear(item);
    }

    fn emit_positions(&mut self) {
        let Some(item) = self
            .current
            .as_ref()
            .filter(|c| c.status.is_ready())
            .map(|c| c.handle)
        else {
            return;
        };
        let Some(elapsed) = self.backend.as_ref().map(|b| b.position()) else {
            return;
        };

        for observer in self.position_observers.iter_mut().filter(|o| o.item == item) {
            let due = observer
                .last_emit
                .is_none_or(|t| t.elapsed() >= observer.interval);

            if due {
                observer.last_emit = Some(Instant::now());
                let _ = self.events.send(EngineEvent::Position {
                    item,
                    elapsed: elapsed.as_secs_f64(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceLocator;
    use crossbeam_channel::unbounded;
    use std::{
        path::Path,
        sync::Mutex,
    };

    const WAIT: Duration = Duration::from_secs(2);

    #[derive(Default)]
    struct Journal {
        calls: Vec<String>,
    }

    struct ScriptedBackend {
        journal: Arc<Mutex<Journal>>,
        position: Duration,
    }

    impl PlaybackBackend for ScriptedBackend {
        fn load(&mut self, path: &Path) -> Result<Option<Duration>> {
            self.journal.lock().unwrap().calls.push("load".into());
            match path.to_string_lossy().contains("broken") {
                true => bail!("decoder rejected source"),
                false => Ok(Some(Duration::from_secs(90))),
            }
        }

        fn play(&mut self) {
            self.journal.lock().unwrap().calls.push("play".into());
        }

        fn pause(&mut self) {
            self.journal.lock().unwrap().calls.push("pause".into());
        }

        fn seek(&mut self, target: Duration) -> Result<()> {
            self.journal
                .lock()
                .unwrap()
                .calls
                .push(format!("seek {}", target.as_secs()));
            self.position = target;
            Ok(())
        }

        fn position(&self) -> Duration {
            self.position
        }

        fn unload(&mut self) {
            self.journal.lock().unwrap().calls.push("unload".into());
        }
    }

    struct Rig {
        commands: Sender<EngineCommand>,
        events: Receiver<EngineEvent>,
        journal: Arc<Mutex<Journal>>,
        thread: Option<JoinHandle<()>>,
    }

    impl Rig {
        fn start() -> Self {
            let (cmd_tx, cmd_rx) = unbounded();
            let (evt_tx, evt_rx) = unbounded();
            let journal = Arc::new(Mutex::new(Journal::default()));
            let backend_journal = Arc::clone(&journal);

            let thread = EngineCore::spawn(
                move || {
                    Ok(ScriptedBackend {
                        journal: backend_journal,
                        position: Duration::ZERO,
                    })
                },
                cmd_rx,
                evt_tx,
                EngineShared::new(),
            );

            Rig {
                commands: cmd_tx,
                events: evt_rx,
                journal,
                thread: Some(thread),
            }
        }

        fn send(&self, cmd: EngineCommand) {
            self.commands.send(cmd).unwrap();
        }

        fn next_event(&self) -> EngineEvent {
            self.events.recv_timeout(WAIT).expect("engine event")
        }

        fn stop(mut self) -> Vec<String> {
            self.send(EngineCommand::Shutdown);
            if let Some(t) = self.thread.take() {
                t.join().unwrap();
            }
            std::mem::take(&mut self.journal.lock().unwrap().calls)
        }
    }

    fn open(rig: &Rig, item: ItemHandle, path: &str) {
        rig.send(EngineCommand::Open {
            item,
            request: OpenRequest::new(SourceLocator::from_path(path)),
        });
    }

    #[test]
    fn late_status_observer_receives_settled_status() {
        let rig = Rig::start();
        let item = ItemHandle(1);

        open(&rig, item, "/tmp/clip.mp4");
        rig.send(EngineCommand::ObserveStatus {
            item,
            token: ObserverToken(1),
        });

        assert_eq!(
            rig.next_event(),
            EngineEvent::StatusChanged {
                item,
                status: SessionStatus::ReadyToPlay,
                duration: Some(90.0),
            }
        );
        rig.stop();
    }

    #[test]
    fn undecodable_source_reports_failure() {
        let rig = Rig::start();
        let item = ItemHandle(7);

        open(&rig, item, "/tmp/broken.mp4");
        rig.send(EngineCommand::ObserveStatus {
            item,
            token: ObserverToken(1),
        });

        assert_eq!(
            rig.next_event(),
            EngineEvent::StatusChanged {
                item,
                status: SessionStatus::Failed,
                duration: None,
            }
        );

        // Transport requests against a failed item never reach the backend
        rig.send(EngineCommand::Play(item));
        let calls = rig.stop();
        assert_eq!(calls, ["load"]);
    }

    #[test]
    fn seek_completes_with_its_ticket_then_reports_position() {
        let rig = Rig::start();
        let item = ItemHandle(2);

        open(&rig, item, "/tmp/clip.mp4");
        rig.send(EngineCommand::Seek {
            item,
            ticket: SeekTicket(5),
            target: Duration::from_secs(42),
        });
        rig.send(EngineCommand::ObservePosition {
            item,
            token: ObserverToken(2),
            interval: Duration::from_secs(60),
        });

        assert_eq!(
            rig.next_event(),
            EngineEvent::SeekCompleted {
                item,
                ticket: SeekTicket(5),
                finished: true,
            }
        );
        assert_eq!(
            rig.next_event(),
            EngineEvent::Position {
                item,
                elapsed: 42.0,
            }
        );

        let calls = rig.stop();
        assert_eq!(calls, ["load", "seek 42", "unload"]);
    }

    #[test]
    fn seek_on_unknown_item_completes_unfinished() {
        let rig = Rig::start();

        rig.send(EngineCommand::Seek {
            item: ItemHandle(9),
            ticket: SeekTicket(1),
            target: Duration::from_secs(3),
        });

        assert_eq!(
            rig.next_event(),
            EngineEvent::SeekCompleted {
                item: ItemHandle(9),
                ticket: SeekTicket(1),
                finished: false,
            }
        );
        rig.stop();
    }

    #[test]
    fn release_unloads_and_drops_observers() {
        let rig = Rig::start();
        let item = ItemHandle(3);

        open(&rig, item, "/tmp/clip.mp4");
        rig.send(EngineCommand::ObservePosition {
            item,
            token: ObserverToken(1),
            interval: Duration::from_millis(1),
        });
        // First position proves the observer is live
        assert!(matches!(rig.next_event(), EngineEvent::Position { .. }));

        rig.send(EngineCommand::Release(item));
        rig.send(EngineCommand::Play(item));
        let calls = rig.stop();

        assert_eq!(calls, ["load", "unload"]);
    }

    fn subtitled_clip() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        for name in ["clip.mp4", "clip.en.srt", "clip.fr.srt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let media = dir.path().join("clip.mp4").to_string_lossy().into_owned();
        (dir, media)
    }

    #[test]
    fn subtitle_selection_is_reported_back() {
        let (_dir, media) = subtitled_clip();
        let rig = Rig::start();
        let item = ItemHandle(4);

        open(&rig, item, &media);
        rig.send(EngineCommand::Select {
            item,
            characteristic: Characteristic::Legible,
            option: 2,
        });

        assert_eq!(
            rig.next_event(),
            EngineEvent::TrackSelected {
                item,
                characteristic: Characteristic::Legible,
                option: TrackOption::new(2, "French"),
            }
        );
        rig.stop();
    }

    #[test]
    fn unknown_or_repeated_selection_is_rejected() {
        let (_dir, media) = subtitled_clip();
        let rig = Rig::start();
        let item = ItemHandle(5);

        open(&rig, item, &media);
        rig.send(EngineCommand::Select {
            item,
            characteristic: Characteristic::Legible,
            option: 1,
        });
        assert!(matches!(rig.next_event(), EngineEvent::TrackSelected { .. }));

        for (characteristic, option) in [
            (Characteristic::Legible, 99),
            (Characteristic::Legible, 1),
            (Characteristic::Audible, 1),
        ] {
            rig.send(EngineCommand::Select {
                item,
                characteristic,
                option,
            });
        }
        rig.send(EngineCommand::Seek {
            item,
            ticket: SeekTicket(1),
            target: Duration::from_secs(1),
        });

        // Nothing was emitted for the rejected selections
        assert_eq!(
            rig.next_event(),
            EngineEvent::SeekCompleted {
                item,
                ticket: SeekTicket(1),
                finished: true,
            }
        );
        rig.stop();
    }
}
