//! The frame loop: [`Model`] implementation tying input, session and view
//! together.

use std::time::Instant;

use gridplate_core::{
    Scene,
    app::{Effect, Model},
    messages::{FrameInput, Key, MouseButton},
};

use crate::assets::Atlases;
use crate::config::GameConfig;
use crate::layout::Layout;
use crate::session::{GameState, Gameplay, Placeholder, Session, Verdict};
use crate::view::View;

/// The template game model.
pub struct GridModel<G: Gameplay = Placeholder> {
    layout: Layout,
    view: View,
    session: Session,
    gameplay: G,
    restart_key: char,
}

impl GridModel<Placeholder> {
    /// A model whose picks have no effect.
    pub fn new(config: &GameConfig, atlases: Atlases, now: Instant) -> Self {
        Self::with_gameplay(config, atlases, Placeholder, now)
    }
}

impl<G: Gameplay> GridModel<G> {
    /// A model that hands picked cells to `gameplay`. The first session
    /// starts at `now`.
    pub fn with_gameplay(config: &GameConfig, atlases: Atlases, gameplay: G, now: Instant) -> Self {
        let layout = Layout::new(config);
        Self {
            layout,
            view: View::new(layout, atlases, config.restart_key),
            session: Session::new(config.cols, config.rows, now),
            gameplay,
            restart_key: config.restart_key,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn gameplay(&self) -> &G {
        &self.gameplay
    }

    fn try_pick(&mut self, input: &FrameInput, now: Instant) {
        let Some(cell) = self.session.pick_cell(&self.layout, input.pointer()) else {
            return;
        };
        log::debug!("picked cell ({}, {})", cell.i(), cell.j());
        if self.gameplay.cell_picked(cell) == Verdict::GameOver && self.session.end(now) {
            log::info!("game over after {:?}", self.session.play_time(now));
        }
    }

    fn restart(&mut self, now: Instant) {
        if self.session.restart(now) {
            self.gameplay.reset();
            log::info!("new session started");
        }
    }
}

impl<G: Gameplay> Model for GridModel<G> {
    fn update(&mut self, input: &FrameInput, now: Instant) -> Option<Effect> {
        if input.is_key_pressed(|k| *k == Key::Escape) {
            return Some(Effect::End);
        }

        if input.is_button_released(MouseButton::Main) && self.session.state() != GameState::Ended
        {
            self.try_pick(input, now);
        }

        let restart_key = self.restart_key;
        if self.session.state() == GameState::Ended
            && input.is_key_pressed(|k| k.is_char_ignore_case(restart_key))
        {
            self.restart(now);
        }

        None
    }

    fn draw(&self, scene: &mut Scene, now: Instant) {
        self.view.draw(&self.session, scene, now);
    }
}
