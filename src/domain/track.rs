use std::fmt;

/// Which picker a track button drives.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum TrackKind {
    #[default]
    Audio,
    Subtitle,
}

impl TrackKind {
    pub fn characteristic(self) -> Characteristic {
        match self {
            TrackKind::Audio => Characteristic::Audible,
            TrackKind::Subtitle => Characteristic::Legible,
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Audio => write!(f, "Audio"),
            TrackKind::Subtitle => write!(f, "Subtitles"),
        }
    }
}

/// Engine classification of alternate track groups.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Characteristic {
    Audible,
    Legible,
}

impl Characteristic {
    pub fn kind(self) -> TrackKind {
        match self {
            Characteristic::Audible => TrackKind::Audio,
            Characteristic::Legible => TrackKind::Subtitle,
        }
    }
}

/// One selectable entry in a track group.
///
/// `id` is opaque to everything but the engine that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOption {
    pub id: u64,
    pub display_name: String,
}

impl TrackOption {
    pub fn new(id: u64, display_name: impl Into<String>) -> Self {
        TrackOption {
            id,
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGroup {
    pub characteristic: Characteristic,
    pub options: Vec<TrackOption>,
}

impl TrackGroup {
    pub fn display_names(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| o.display_name.clone())
            .collect()
    }
}
