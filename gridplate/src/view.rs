//! Frame composition: turns a [`Session`] into draw commands.

use std::time::Instant;

use gridplate_core::{Color, DigitAlign, Rect, Scene, Vec2};

use crate::assets::{Atlases, TILE_ATLAS};
use crate::cell::Cell;
use crate::hud::PlayTime;
use crate::layout::Layout;
use crate::session::{GameState, Session};

pub const TEXT_GAME_OVER: &str = "GAME OVER!";

const TEXT_COLOR: Color = Color::DARKGRAY;

pub struct View {
    layout: Layout,
    atlases: Atlases,
    restart_hint: String,
}

impl View {
    pub fn new(layout: Layout, atlases: Atlases, restart_key: char) -> Self {
        Self {
            layout,
            atlases,
            restart_hint: format!("Press '{restart_key}' to play again!"),
        }
    }

    /// The instruction shown on the game-over screen.
    pub fn restart_hint(&self) -> &str {
        &self.restart_hint
    }

    pub fn draw(&self, session: &Session, scene: &mut Scene, now: Instant) {
        scene.clear_background(Color::RAYWHITE);

        // Border first so the tiles' outer edges blend into it.
        scene.texture(
            TILE_ATLAS,
            self.atlases.tile_source(),
            self.layout.border_rect(),
            Color::WHITE,
        );
        for cell in session.grid() {
            self.draw_cell(scene, cell);
        }

        match session.state() {
            GameState::Ended => self.draw_game_over(scene, session, now),
            GameState::Playing => self.draw_hud(scene, session, now),
        }
    }

    fn draw_cell(&self, scene: &mut Scene, cell: &Cell) {
        scene.texture(
            TILE_ATLAS,
            self.atlases.tile_source(),
            self.layout.cell_rect(cell.i(), cell.j()),
            Color::WHITE,
        );
    }

    fn draw_game_over(&self, scene: &mut Scene, session: &Session, now: Instant) {
        let (sw, sh) = (self.layout.screen_width(), self.layout.screen_height());
        scene.fill_rect(Rect::new(0.0, 0.0, sw, sh), Color::WHITE.fade(0.8));

        let center_x = (sw as i32 / 2) as f32;
        scene.text_centered(
            TEXT_GAME_OVER,
            center_x,
            (sh as i32 / 2 - 10) as f32,
            40.0,
            TEXT_COLOR,
        );
        scene.text_centered(
            self.restart_hint.as_str(),
            center_x,
            sh * 0.75 - 10.0,
            20.0,
            TEXT_COLOR,
        );

        let played = PlayTime::from_elapsed(session.play_time(now));
        scene.text(
            played.to_string(),
            Vec2::new(20.0, sh - 40.0),
            20.0,
            TEXT_COLOR,
        );
    }

    /// Running play time, in whole seconds, drawn from the digit atlas.
    fn draw_hud(&self, scene: &mut Scene, session: &Session, now: Instant) {
        let hud = self.layout.hud_rect();
        if hud.height <= 0.0 || hud.width <= 0.0 {
            return;
        }
        let seconds = PlayTime::from_elapsed(session.play_time(now)).total_seconds();
        self.atlases.digits().draw_number(
            scene,
            u32::try_from(seconds).unwrap_or(u32::MAX),
            hud,
            DigitAlign::Right,
            TEXT_COLOR,
        );
    }
}
