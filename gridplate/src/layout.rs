//! Screen geometry of the grid and the pointer-to-cell mapping.
//!
//! Cell sizes are integers: the grid area's width and height divided by the
//! column and row counts, truncated. Tiles are laid out from the grid-area
//! origin, while pointer picks are resolved in grid-logical space whose
//! origin is the screen origin.

use gridplate_core::geom::{Point, Rect, Vec2};

use crate::cell::Cell;
use crate::config::GameConfig;
use crate::grid::Grid;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    screen_width: f32,
    screen_height: f32,
    grid_area: Rect,
    cell_width: i32,
    cell_height: i32,
}

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        let cols = config.cols.max(1) as f32;
        let rows = config.rows.max(1) as f32;
        Self {
            screen_width: config.screen_width as f32,
            screen_height: config.screen_height as f32,
            grid_area: config.grid_area,
            cell_width: (config.grid_area.width / cols) as i32,
            cell_height: (config.grid_area.height / rows) as i32,
        }
    }

    #[inline]
    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    #[inline]
    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    #[inline]
    pub fn grid_area(&self) -> Rect {
        self.grid_area
    }

    #[inline]
    pub fn cell_width(&self) -> i32 {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> i32 {
        self.cell_height
    }

    /// Screen rectangle of the tile at `(i, j)`.
    pub fn cell_rect(&self, i: i32, j: i32) -> Rect {
        Rect::new(
            (i * self.cell_width) as f32 + self.grid_area.x,
            (j * self.cell_height) as f32 + self.grid_area.y,
            self.cell_width as f32,
            self.cell_height as f32,
        )
    }

    /// The decorative border behind the grid: the grid area grown by 1/32 of
    /// a cell on every side.
    pub fn border_rect(&self) -> Rect {
        let (cw, ch) = (self.cell_width, self.cell_height);
        Rect::new(
            self.grid_area.x - (cw / 32) as f32,
            self.grid_area.y - (ch / 32) as f32,
            self.grid_area.width + (cw / 16) as f32,
            self.grid_area.height + (ch / 16) as f32,
        )
    }

    /// The strip between the top of the screen and the border, with an
    /// 8-pixel margin above and below. Empty when the grid hugs the top.
    pub fn hud_rect(&self) -> Rect {
        let border = self.border_rect();
        Rect::new(border.x, 8.0, border.width, (border.y - 16.0).max(0.0))
    }

    /// Grid indices under `pos`, unvalidated: `floor(x / cell_width)`,
    /// `floor(y / cell_height)`. `None` for non-finite input or degenerate
    /// cells.
    pub fn index_at(&self, pos: Vec2) -> Option<Point> {
        if !pos.x.is_finite() || !pos.y.is_finite() || self.cell_width <= 0 || self.cell_height <= 0
        {
            return None;
        }
        let i = (pos.x / self.cell_width as f32).floor();
        let j = (pos.y / self.cell_height as f32).floor();
        Some(Point::new(i as i32, j as i32))
    }

    /// The cell under `pos`, or `None` if `pos` is outside the grid.
    pub fn pick_cell<'g>(&self, grid: &'g mut Grid, pos: Vec2) -> Option<&'g mut Cell> {
        let p = self.index_at(pos)?;
        grid.get_mut(p.x, p.y)
    }
}
