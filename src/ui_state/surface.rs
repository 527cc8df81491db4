use crate::domain::TrackKind;

/// Output side of the playback screen.
///
/// Implementors only display what they are told; every decision about what
/// to show is made by [`crate::PlaybackController`].
pub trait ControlSurface {
    fn set_controls_enabled(&mut self, enabled: bool);
    fn set_time_text(&mut self, text: &str);
    fn set_duration_text(&mut self, text: &str);
    fn set_slider_range(&mut self, max: f64);
    fn set_slider_value(&mut self, value: f64);
    fn show_picker(&mut self, kind: TrackKind, items: &[String]);
    fn hide_picker(&mut self);
    /// `None` clears the label for `kind`.
    fn set_active_track(&mut self, kind: TrackKind, name: Option<&str>);
}
