use super::{
    EngineEvent, ItemHandle, MediaEngine, ObserverToken, PlaybackBackend, RodioBackend,
    SeekTicket, command::EngineCommand, core::EngineCore, shared::EngineShared,
};
use crate::domain::{Characteristic, OpenRequest, TrackGroup, TrackOption};
use anyhow::Result;
use crossbeam_channel::Sender;
use std::{sync::Arc, thread::JoinHandle, time::Duration};

/// UI-thread side of the engine worker.
pub struct EngineHandle {
    commands: Sender<EngineCommand>,
    shared: Arc<EngineShared>,
    next_id: u64,
    thread: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Spawn a worker rendering through the default audio device.
    pub fn spawn(events: Sender<EngineEvent>) -> Self {
        Self::spawn_with(RodioBackend::new, events)
    }

    pub fn spawn_with<B, F>(make_backend: F, events: Sender<EngineEvent>) -> Self
    where
        B: PlaybackBackend,
        F: FnOnce() -> Result<B> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let shared = EngineShared::new();

        let thread = EngineCore::spawn(make_backend, cmd_rx, events, Arc::clone(&shared));

        Self {
            commands: cmd_tx,
            shared,
            next_id: 0,
            thread: Some(thread),
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn send(&self, cmd: EngineCommand) {
        if self.commands.send(cmd).is_err() {
            log::error!("Engine worker is gone, request dropped");
        }
    }
}

impl MediaEngine for EngineHandle {
    fn open(&mut self, request: OpenRequest) -> ItemHandle {
        let item = ItemHandle(self.next_id());
        log::info!("Opening {} as {item:?}", request.source);
        self.send(EngineCommand::Open { item, request });
        item
    }

    fn observe_status(&mut self, item: ItemHandle) -> ObserverToken {
        let token = ObserverToken(self.next_id());
        self.send(EngineCommand::ObserveStatus { item, token });
        token
    }

    fn observe_position(&mut self, item: ItemHandle, interval: Duration) -> ObserverToken {
        let token = ObserverToken(self.next_id());
        self.send(EngineCommand::ObservePosition {
            item,
            token,
            interval,
        });
        token
    }

    fn remove_observer(&mut self, token: ObserverToken) {
        self.send(EngineCommand::RemoveObserver(token));
    }

    fn play(&mut self, item: ItemHandle) {
        self.send(EngineCommand::Play(item));
    }

    fn pause(&mut self, item: ItemHandle) {
        self.send(EngineCommand::Pause(item));
    }

    fn seek(&mut self, item: ItemHandle, target: Duration) -> SeekTicket {
        let ticket = SeekTicket(self.next_id());
        self.send(EngineCommand::Seek {
            item,
            ticket,
            target,
        });
        ticket
    }

    fn track_group(
        &self,
        item: ItemHandle,
        characteristic: Characteristic,
    ) -> Option<TrackGroup> {
        self.shared.group(item, characteristic)
    }

    fn select_track(&mut self, item: ItemHandle, group: &TrackGroup, option: &TrackOption) {
        self.send(EngineCommand::Select {
            item,
            characteristic: group.characteristic,
            option: option.id,
        });
    }

    fn release(&mut self, item: ItemHandle) {
        self.send(EngineCommand::Release(item));
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.commands.send(EngineCommand::Shutdown);
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            log::error!("Engine worker panicked");
        }
    }
}
