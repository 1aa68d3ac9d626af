//! Compile-time configuration.
//!
//! There is no runtime configuration surface: the constants below are the
//! whole of it, and [`GameConfig::default`] bundles them.

use std::path::PathBuf;

use gridplate_core::geom::Rect;

/// Grid columns.
pub const COLS: usize = 4;
/// Grid rows.
pub const ROWS: usize = 4;

pub const SCREEN_WIDTH: u32 = 600;
pub const SCREEN_HEIGHT: u32 = 600;

/// Where the grid is drawn on screen, in logical pixels.
pub const GRID_AREA: Rect = Rect::new(50.0, 50.0, 500.0, 500.0);

/// Tile variant drawn for every cell; the shipped atlas holds 8 (0..=7).
pub const CELL_VARIANT: u32 = 0;

pub const TILE_ATLAS_PATH: &str = "resources/tile.png";
pub const DIGIT_ATLAS_PATH: &str = "resources/digits.png";

/// Key that starts a new session from the game-over screen.
pub const RESTART_KEY: char = 'r';

pub const TITLE: &str = "Grid Template";

/// All tunables of one game, grouped.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub title: String,
    pub cols: usize,
    pub rows: usize,
    pub screen_width: u32,
    pub screen_height: u32,
    pub grid_area: Rect,
    pub cell_variant: u32,
    pub tile_atlas: PathBuf,
    pub digit_atlas: PathBuf,
    pub restart_key: char,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: TITLE.into(),
            cols: COLS,
            rows: ROWS,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            grid_area: GRID_AREA,
            cell_variant: CELL_VARIANT,
            tile_atlas: TILE_ATLAS_PATH.into(),
            digit_atlas: DIGIT_ATLAS_PATH.into(),
            restart_key: RESTART_KEY,
        }
    }
}
