use crate::{
    Settings,
    domain::SourceLocator,
    engine::{EngineEvent, EngineHandle},
    key_handler::{self, Action},
    player::PlaybackController,
    tui::{self, Transport},
    ui_state::ScreenState,
};
use anyhow::Result;
use crossbeam_channel::Receiver;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event, KeyEventKind},
};

pub struct Kinescope {
    controller: PlaybackController<EngineHandle, ScreenState>,
    events: Receiver<EngineEvent>,
    source: SourceLocator,
    scrub_step: f64,
    quit: bool,
}

impl Kinescope {
    pub fn new(source: SourceLocator, settings: &Settings) -> Self {
        let (evt_tx, evt_rx) = crossbeam_channel::unbounded();
        let engine = EngineHandle::spawn(evt_tx);
        let screen = ScreenState::new(source.display_name());

        Kinescope {
            controller: PlaybackController::new(engine, screen, settings),
            events: evt_rx,
            source,
            scrub_step: settings.scrub_step_secs,
            quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        self.controller.initialize(self.source.clone());

        // Restore the terminal even when the loop bails out
        let result = self.main_loop(&mut terminal);

        self.controller.teardown();
        ratatui::restore();

        result
    }

    fn main_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.quit {
            self.drain_engine_events();

            match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let screen = self.controller.surface();
                    if let Some(action) = key_handler::handle_key_event(key, screen, self.scrub_step)
                    {
                        self.handle_action(action);
                    }
                }
                _ => (),
            }

            let transport = Transport {
                playing: self.controller.is_playing(),
                status: self.controller.status(),
            };
            terminal.draw(|f| tui::render(f, self.controller.surface_mut(), transport))?;
        }
        Ok(())
    }

    fn drain_engine_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.controller.handle_event(event);
        }
    }

    #[rustfmt::skip]
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::TogglePause     => self.controller.on_play_pause_toggled(),
            Action::Scrub(delta)    => self.scrub(delta),
            Action::CommitScrub     => self.commit_scrub(),

            Action::ToggleTracks(k) => self.controller.on_track_button_toggled(k),
            Action::PickerUp        => self.move_picker_cursor(false),
            Action::PickerDown      => self.move_picker_cursor(true),
            Action::PickerConfirm   => self.confirm_picker(),
            Action::ClosePicker     => self.close_picker(),

            Action::QUIT            => self.quit = true,
        }
    }

    fn scrub(&mut self, delta: f64) {
        if !self.controller.surface().is_scrubbing() {
            self.controller.on_seek_drag_began();
        }
        if !self.controller.is_dragging() {
            return;
        }

        self.controller.surface_mut().scrub_by(delta);
        self.controller.on_seek_drag_moved();
    }

    fn commit_scrub(&mut self) {
        let target = self.controller.surface_mut().release_scrub();
        self.controller.on_seek_drag_ended(target);
    }

    fn move_picker_cursor(&mut self, down: bool) {
        if let Some(picker) = self.controller.surface_mut().picker.as_mut() {
            match down {
                true => picker.cursor_down(),
                false => picker.cursor_up(),
            }
        }
    }

    fn confirm_picker(&mut self) {
        let choice = self
            .controller
            .surface()
            .picker
            .as_ref()
            .and_then(|p| p.cursor().map(|idx| (p.kind, idx)));

        if let Some((kind, idx)) = choice {
            self.controller.on_track_option_selected(kind, idx);
        }
    }

    fn close_picker(&mut self) {
        if let Some(kind) = self.controller.surface().picker_kind() {
            self.controller.on_track_button_toggled(kind);
        }
    }
}
