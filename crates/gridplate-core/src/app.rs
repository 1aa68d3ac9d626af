//! The frame-driven application loop: [`Model`], [`Effect`], [`AppRunner`],
//! [`EventLoopDriver`].

use std::time::Instant;

use crate::messages::{FrameInput, Msg};
use crate::scene::Scene;

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model.
///
/// `update` is called exactly once per display tick with the input gathered
/// since the previous tick, followed by exactly one `draw`.
pub trait Model {
    /// Apply this tick's input, optionally returning a side-effect.
    fn update(&mut self, input: &FrameInput, now: Instant) -> Option<Effect>;

    /// Render the current state into `scene`.
    fn draw(&self, scene: &mut Scene, now: Instant);
}

// ---------------------------------------------------------------------------
// EventLoopDriver
// ---------------------------------------------------------------------------

/// A backend that owns the host event loop (e.g. winit) and pumps an
/// [`AppRunner`] from it. `run` returns when the window closes.
pub trait EventLoopDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn std::error::Error>>;
}

// ---------------------------------------------------------------------------
// AppRunner
// ---------------------------------------------------------------------------

/// Owns the model and turns a stream of [`Msg`]s plus periodic ticks into
/// frames.
pub struct AppRunner {
    model: Box<dyn Model>,
    input: FrameInput,
    scene: Scene,
    quit: bool,
}

impl AppRunner {
    pub fn new(model: Box<dyn Model>) -> Self {
        Self {
            model,
            input: FrameInput::new(),
            scene: Scene::new(),
            quit: false,
        }
    }

    /// Queue a message for the next tick. `Msg::Quit` stops the runner
    /// immediately.
    pub fn handle_msg(&mut self, msg: Msg) {
        if matches!(msg, Msg::Quit) {
            log::debug!("quit requested by host");
            self.quit = true;
        }
        self.input.apply(&msg);
    }

    /// Run one frame: update the model with the queued input, then draw.
    ///
    /// Returns `None` once the runner has stopped.
    pub fn tick(&mut self, now: Instant) -> Option<&Scene> {
        if self.quit {
            return None;
        }
        let effect = self.model.update(&self.input, now);
        self.input.end_frame();
        if let Some(Effect::End) = effect {
            log::debug!("model requested end");
            self.quit = true;
            return None;
        }
        self.scene.clear();
        self.model.draw(&mut self.scene, now);
        Some(&self.scene)
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vec2;
    use crate::messages::{Key, MouseAction, MouseButton};
    use crate::style::Color;

    /// Counts released clicks, ends on Escape.
    #[derive(Default)]
    struct Clicks {
        count: u32,
    }

    impl Model for Clicks {
        fn update(&mut self, input: &FrameInput, _now: Instant) -> Option<Effect> {
            if input.is_key_pressed(|k| *k == Key::Escape) {
                return Some(Effect::End);
            }
            if input.is_button_released(MouseButton::Main) {
                self.count += 1;
            }
            None
        }

        fn draw(&self, scene: &mut Scene, _now: Instant) {
            scene.clear_background(Color::BLACK);
            scene.text(self.count.to_string(), Vec2::ZERO, 10.0, Color::WHITE);
        }
    }

    fn release() -> Msg {
        Msg::mouse(MouseAction::Release(MouseButton::Main), Vec2::ZERO)
    }

    #[test]
    fn edges_are_consumed_by_one_tick() {
        let mut runner = AppRunner::new(Box::new(Clicks::default()));
        runner.handle_msg(release());
        let now = Instant::now();
        let scene = runner.tick(now).map(|s| s.texts().collect::<Vec<_>>().join(""));
        assert_eq!(scene.as_deref(), Some("1"));
        let scene = runner.tick(now).map(|s| s.texts().collect::<Vec<_>>().join(""));
        assert_eq!(scene.as_deref(), Some("1"));
    }

    #[test]
    fn end_effect_stops_runner() {
        let mut runner = AppRunner::new(Box::new(Clicks::default()));
        runner.handle_msg(Msg::key(Key::Escape));
        assert!(runner.tick(Instant::now()).is_none());
        assert!(runner.should_quit());
        assert!(runner.tick(Instant::now()).is_none());
    }

    #[test]
    fn quit_message_stops_before_update() {
        let mut runner = AppRunner::new(Box::new(Clicks::default()));
        runner.handle_msg(Msg::Quit);
        assert!(runner.should_quit());
        assert!(runner.tick(Instant::now()).is_none());
    }
}
