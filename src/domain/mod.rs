mod source;
mod status;
mod track;

pub use source::{AssetKey, OpenRequest, SourceLocator};
pub use status::SessionStatus;
pub use track::{Characteristic, TrackGroup, TrackKind, TrackOption};
