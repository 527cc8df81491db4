mod picker;
mod screen;
mod surface;

pub use picker::PickerView;
pub use screen::ScreenState;
pub use surface::ControlSurface;
