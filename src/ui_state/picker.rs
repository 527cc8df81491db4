use crate::domain::TrackKind;
use ratatui::widgets::ListState;

/// Track list as currently drawn, plus the row the user has highlighted.
pub struct PickerView {
    pub kind: TrackKind,
    pub items: Vec<String>,
    pub selection: ListState,
}

impl PickerView {
    pub(crate) fn new(kind: TrackKind, items: &[String]) -> Self {
        let mut selection = ListState::default();
        if !items.is_empty() {
            selection.select(Some(0));
        }

        PickerView {
            kind,
            items: items.to_vec(),
            selection,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn cursor_up(&mut self) {
        if let Some(idx) = self.selection.selected() {
            self.selection.select(Some(idx.saturating_sub(1)));
        }
    }

    pub fn cursor_down(&mut self) {
        if let Some(idx) = self.selection.selected() {
            let last = self.items.len().saturating_sub(1);
            self.selection.select(Some((idx + 1).min(last)));
        }
    }
}
