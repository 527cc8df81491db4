mod control_bar;
mod progress;
mod track_picker;

pub use control_bar::ControlBar;
pub use progress::Progress;
pub use track_picker::TrackPicker;

const DUR_WIDTH: u16 = 5;
const PAUSE_ICON: &str = "⏸";
const PLAY_ICON: &str = "▶";
