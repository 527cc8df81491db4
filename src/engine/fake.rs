//! Recording engine for controller tests.

use super::{ItemHandle, MediaEngine, ObserverToken, SeekTicket};
use crate::domain::{Characteristic, OpenRequest, TrackGroup, TrackOption};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Open(ItemHandle),
    ObserveStatus(ItemHandle),
    ObservePosition(ItemHandle, Duration),
    RemoveObserver(ObserverToken),
    Play,
    Pause,
    Seek(Duration, SeekTicket),
    Select(Characteristic, TrackOption),
    Release(ItemHandle),
}

#[derive(Default)]
pub(crate) struct FakeEngine {
    pub calls: Vec<Call>,
    pub groups: Vec<TrackGroup>,
    next_id: u64,
    // track_group takes &self
    queried: std::cell::RefCell<Vec<Characteristic>>,
}

impl FakeEngine {
    pub fn with_groups(groups: Vec<TrackGroup>) -> Self {
        FakeEngine {
            groups,
            ..Default::default()
        }
    }

    /// Play, pause and seek requests in issue order.
    pub fn transport_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Play | Call::Pause | Call::Seek(..)))
            .cloned()
            .collect()
    }

    pub fn group_queries(&self) -> Vec<Characteristic> {
        self.queried.borrow().clone()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.queried.borrow_mut().clear();
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MediaEngine for FakeEngine {
    fn open(&mut self, _request: OpenRequest) -> ItemHandle {
        let item = ItemHandle(self.next_id());
        self.calls.push(Call::Open(item));
        item
    }

    fn observe_status(&mut self, item: ItemHandle) -> ObserverToken {
        self.calls.push(Call::ObserveStatus(item));
        ObserverToken(self.next_id())
    }

    fn observe_position(&mut self, item: ItemHandle, interval: Duration) -> ObserverToken {
        self.calls.push(Call::ObservePosition(item, interval));
        ObserverToken(self.next_id())
    }

    fn remove_observer(&mut self, token: ObserverToken) {
        self.calls.push(Call::RemoveObserver(token));
    }

    fn play(&mut self, _item: ItemHandle) {
        self.calls.push(Call::Play);
    }

    fn pause(&mut self, _item: ItemHandle) {
        self.calls.push(Call::Pause);
    }

    fn seek(&mut self, _item: ItemHandle, target: Duration) -> SeekTicket {
        let ticket = SeekTicket(self.next_id());
        self.calls.push(Call::Seek(target, ticket));
        ticket
    }

    fn track_group(
        &self,
        _item: ItemHandle,
        characteristic: Characteristic,
    ) -> Option<TrackGroup> {
        self.queried.borrow_mut().push(characteristic);
        self.groups
            .iter()
            .find(|g| g.characteristic == characteristic)
            .cloned()
    }

    fn select_track(&mut self, _item: ItemHandle, group: &TrackGroup, option: &TrackOption) {
        self.calls
            .push(Call::Select(group.characteristic, option.clone()));
    }

    fn release(&mut self, item: ItemHandle) {
        self.calls.push(Call::Release(item));
    }
}
