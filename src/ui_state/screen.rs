use super::{ControlSurface, PickerView};
use crate::{domain::TrackKind, format_clock};

/// Terminal rendition of the playback screen's widgets.
pub struct ScreenState {
    pub title: String,
    pub controls_enabled: bool,
    pub time_text: String,
    pub duration_text: String,
    pub slider_value: f64,
    pub slider_max: f64,
    pub picker: Option<PickerView>,
    pub audio_track: Option<String>,
    pub subtitle_track: Option<String>,

    // Widget-local drag feedback, invisible to the controller
    scrubbing: bool,
}

impl Default for ScreenState {
    fn default() -> Self {
        ScreenState {
            title: String::new(),
            controls_enabled: false,
            time_text: format_clock(0.0),
            duration_text: format_clock(0.0),
            slider_value: 0.0,
            slider_max: 0.0,
            picker: None,
            audio_track: None,
            subtitle_track: None,

            scrubbing: false,
        }
    }
}

impl ScreenState {
    pub fn new(title: impl Into<String>) -> Self {
        ScreenState {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Fraction of the slider range covered, for gauge widgets.
    pub fn slider_ratio(&self) -> f64 {
        match self.slider_max > 0.0 {
            true => (self.slider_value / self.slider_max).clamp(0.0, 1.0),
            false => 0.0,
        }
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// Move the slider thumb the way a finger would, within the range.
    pub fn scrub_by(&mut self, delta: f64) {
        self.scrubbing = true;
        self.slider_value = (self.slider_value + delta).clamp(0.0, self.slider_max);
    }

    /// Release the thumb, returning where it was let go.
    pub fn release_scrub(&mut self) -> f64 {
        self.scrubbing = false;
        self.slider_value
    }

    pub fn picker_kind(&self) -> Option<TrackKind> {
        self.picker.as_ref().map(|p| p.kind)
    }

    pub fn active_track(&self, kind: TrackKind) -> Option<&str> {
        match kind {
            TrackKind::Audio => self.audio_track.as_deref(),
            TrackKind::Subtitle => self.subtitle_track.as_deref(),
        }
    }
}

impl ControlSurface for ScreenState {
    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
        if !enabled {
            self.scrubbing = false;
        }
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_text.clear();
        self.time_text.push_str(text);
    }

    fn set_duration_text(&mut self, text: &str) {
        self.duration_text.clear();
        self.duration_text.push_str(text);
    }

    fn set_slider_range(&mut self, max: f64) {
        self.slider_max = max.max(0.0);
        self.slider_value = self.slider_value.min(self.slider_max);
    }

    fn set_slider_value(&mut self, value: f64) {
        self.slider_value = value;
    }

    fn show_picker(&mut self, kind: TrackKind, items: &[String]) {
        self.picker = Some(PickerView::new(kind, items));
    }

    fn hide_picker(&mut self) {
        self.picker = None;
    }

    fn set_active_track(&mut self, kind: TrackKind, name: Option<&str>) {
        let slot = match kind {
            TrackKind::Audio => &mut self.audio_track,
            TrackKind::Subtitle => &mut self.subtitle_track,
        };
        *slot = name.map(str::to_owned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_stays_inside_range() {
        let mut screen = ScreenState::new("clip");
        screen.set_slider_range(30.0);

        screen.scrub_by(-5.0);
        assert_eq!(screen.slider_value, 0.0);

        screen.scrub_by(45.0);
        assert_eq!(screen.slider_value, 30.0);
        assert!(screen.is_scrubbing());

        assert_eq!(screen.release_scrub(), 30.0);
        assert!(!screen.is_scrubbing());
    }

    #[test]
    fn ratio_is_zero_without_range() {
        let mut screen = ScreenState::default();
        screen.set_slider_value(12.0);
        assert_eq!(screen.slider_ratio(), 0.0);

        screen.set_slider_range(48.0);
        assert_eq!(screen.slider_ratio(), 0.25);
    }

    #[test]
    fn picker_cursor_is_bounded() {
        let mut screen = ScreenState::default();
        screen.show_picker(
            TrackKind::Subtitle,
            &["English".to_string(), "French".to_string()],
        );

        let picker = screen.picker.as_mut().unwrap();
        assert_eq!(picker.cursor(), Some(0));
        picker.cursor_up();
        assert_eq!(picker.cursor(), Some(0));
        picker.cursor_down();
        picker.cursor_down();
        assert_eq!(picker.cursor(), Some(1));

        screen.hide_picker();
        assert_eq!(screen.picker_kind(), None);
    }
}
