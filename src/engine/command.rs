use super::{ItemHandle, ObserverToken, SeekTicket};
use crate::domain::{Characteristic, OpenRequest};
use std::time::Duration;

pub(crate) enum EngineCommand {
    Open {
        item: ItemHandle,
        request: OpenRequest,
    },
    ObserveStatus {
        item: ItemHandle,
        token: ObserverToken,
    },
    ObservePosition {
        item: ItemHandle,
        token: ObserverToken,
        interval: Duration,
    },
    RemoveObserver(ObserverToken),
    Play(ItemHandle),
    Pause(ItemHandle),
    Seek {
        item: ItemHandle,
        ticket: SeekTicket,
        target: Duration,
    },
    Select {
        item: ItemHandle,
        characteristic: Characteristic,
        option: u64,
    },
    Release(ItemHandle),
    Shutdown,
}
