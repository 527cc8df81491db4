/// Readiness of a loaded item as reported by the engine.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum SessionStatus {
    #[default]
    Unknown,
    ReadyToPlay,
    Failed,
}

impl SessionStatus {
    pub fn is_ready(self) -> bool {
        self == SessionStatus::ReadyToPlay
    }
}
