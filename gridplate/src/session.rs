//! One play-through: the grid, the [`GameState`] machine, and the session
//! timestamps. Also the [`Gameplay`] extension point that picked cells are
//! handed to.

use std::time::{Duration, Instant};

use gridplate_core::geom::Vec2;

use crate::cell::Cell;
use crate::grid::Grid;
use crate::layout::Layout;

/// Whether a session is running or over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Playing,
    Ended,
}

/// What gameplay decided after handling a pick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    /// The session is over; the end time is recorded now.
    GameOver,
}

/// Game-specific rules, invoked for every successful cell pick while the
/// session is playing.
pub trait Gameplay {
    fn cell_picked(&mut self, cell: &mut Cell) -> Verdict;

    /// Called when a new session starts. Implementations holding per-session
    /// state must clear it here.
    fn reset(&mut self) {}
}

/// The template's rules: picking a cell does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct Placeholder;

impl Gameplay for Placeholder {
    fn cell_picked(&mut self, _cell: &mut Cell) -> Verdict {
        Verdict::Continue
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    state: GameState,
    started: Instant,
    ended: Option<Instant>,
}

impl Session {
    /// Start a session at `now`.
    pub fn new(cols: usize, rows: usize, now: Instant) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            state: GameState::Playing,
            started: now,
            ended: None,
        }
    }

    /// Reinitialize unconditionally: fresh grid, `Playing`, timestamps reset.
    pub fn reset(&mut self, now: Instant) {
        self.grid.initialize();
        self.state = GameState::Playing;
        self.started = now;
        self.ended = None;
    }

    /// `Ended -> Playing`. Returns `false` (and changes nothing) if the
    /// session is still playing.
    pub fn restart(&mut self, now: Instant) -> bool {
        match self.state {
            GameState::Ended => {
                self.reset(now);
                true
            }
            GameState::Playing => false,
        }
    }

    /// `Playing -> Ended`, recording `now` as the end time. Returns `false`
    /// (and changes nothing) if the session already ended.
    pub fn end(&mut self, now: Instant) -> bool {
        match self.state {
            GameState::Playing => {
                self.state = GameState::Ended;
                self.ended = Some(now);
                true
            }
            GameState::Ended => false,
        }
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn started(&self) -> Instant {
        self.started
    }

    #[inline]
    pub fn ended(&self) -> Option<Instant> {
        self.ended
    }

    /// Time from start to end; while playing, from start to `now`.
    pub fn play_time(&self, now: Instant) -> Duration {
        self.ended
            .unwrap_or(now)
            .saturating_duration_since(self.started)
    }

    /// The cell under `pos`, if any.
    pub fn pick_cell(&mut self, layout: &Layout, pos: Vec2) -> Option<&mut Cell> {
        layout.pick_cell(&mut self.grid, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn starts_playing_with_initialized_grid() {
        let t0 = Instant::now();
        let s = Session::new(4, 4, t0);
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.started(), t0);
        assert!(s.ended().is_none());
        assert_eq!(s.grid(), &Grid::new(4, 4));
    }

    #[test]
    fn end_records_timestamp_once() {
        let t0 = Instant::now();
        let mut s = Session::new(4, 4, t0);
        assert!(s.end(t0 + secs(10)));
        assert_eq!(s.state(), GameState::Ended);
        assert!(!s.end(t0 + secs(99)));
        assert_eq!(s.ended(), Some(t0 + secs(10)));
        assert_eq!(s.play_time(t0 + secs(500)), secs(10));
    }

    #[test]
    fn restart_only_from_ended() {
        let t0 = Instant::now();
        let mut s = Session::new(4, 4, t0);
        assert!(!s.restart(t0 + secs(5)));
        assert_eq!(s.started(), t0);

        s.end(t0 + secs(5));
        assert!(s.restart(t0 + secs(8)));
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.started(), t0 + secs(8));
        assert!(s.ended().is_none());
    }

    #[test]
    fn reset_always_returns_to_playing() {
        let t0 = Instant::now();
        let mut s = Session::new(2, 3, t0);
        s.reset(t0 + secs(1));
        assert_eq!(s.state(), GameState::Playing);
        s.end(t0 + secs(2));
        s.reset(t0 + secs(3));
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.grid(), &Grid::new(2, 3));
    }

    #[test]
    fn play_time_runs_while_playing() {
        let t0 = Instant::now();
        let s = Session::new(4, 4, t0);
        assert_eq!(s.play_time(t0 + secs(42)), secs(42));
        assert_eq!(s.play_time(t0), Duration::ZERO);
    }

    #[test]
    fn pick_cell_uses_layout() {
        let layout = Layout::new(&GameConfig::default());
        let mut s = Session::new(4, 4, Instant::now());
        let c = s.pick_cell(&layout, Vec2::new(130.0, 10.0)).expect("inside");
        assert_eq!((c.i(), c.j()), (1, 0));
        assert!(s.pick_cell(&layout, Vec2::new(590.0, 10.0)).is_none());
    }

    #[test]
    fn picked_cell_is_the_grid_slot() {
        let layout = Layout::new(&GameConfig::default());
        let mut s = Session::new(4, 4, Instant::now());
        let picked: *const Cell = s.pick_cell(&layout, Vec2::new(300.0, 140.0)).expect("inside");
        let stored: *const Cell = s.grid().get(2, 1).expect("in bounds");
        assert!(std::ptr::eq(picked, stored));
    }

    #[test]
    fn placeholder_never_ends_the_game() {
        let mut s = Session::new(4, 4, Instant::now());
        let layout = Layout::new(&GameConfig::default());
        let before = s.grid().clone();
        let cell = s.pick_cell(&layout, Vec2::new(10.0, 10.0)).expect("inside");
        assert_eq!(Placeholder.cell_picked(cell), Verdict::Continue);
        assert_eq!(s.grid(), &before);
    }
}
