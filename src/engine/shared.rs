use super::ItemHandle;
use crate::domain::{Characteristic, TrackGroup};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Track groups the engine worker publishes for synchronous reads on the UI
/// thread.
pub(crate) struct EngineShared {
    groups: Mutex<HashMap<ItemHandle, Vec<TrackGroup>>>,
}

impl EngineShared {
    pub fn new() -> Arc<Self> {
        Arc::new(EngineShared {
            groups: Mutex::new(HashMap::new()),
        })
    }

    pub fn group(&self, item: ItemHandle, characteristic: Characteristic) -> Option<TrackGroup> {
        let groups = self.groups.lock().ok()?;
        groups
            .get(&item)?
            .iter()
            .find(|g| g.characteristic == characteristic)
            .cloned()
    }

    pub fn publish_groups(&self, item: ItemHandle, groups: Vec<TrackGroup>) {
        if let Ok(mut all) = self.groups.lock() {
            all.insert(item, groups);
        }
    }

    pub fn clear(&self, item: ItemHandle) {
        if let Ok(mut all) = self.groups.lock() {
            all.remove(&item);
        }
    }
}
