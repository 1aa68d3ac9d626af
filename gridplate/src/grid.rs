//! The [`Grid`] type — a fixed COLS×ROWS array of [`Cell`]s.
//!
//! Storage is a flat vector indexed `i * rows + j`, so iteration visits
//! every row of column 0, then column 1, and so on.

use gridplate_core::geom::{Point, Range};

use crate::cell::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an initialized grid of `cols` × `rows` cells.
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut grid = Self {
            cols,
            rows,
            cells: Vec::with_capacity(cols * rows),
        };
        grid.initialize();
        grid
    }

    /// Overwrite every cell with its default state. Idempotent.
    pub fn initialize(&mut self) {
        let bounds = self.bounds();
        self.cells.clear();
        self.cells.extend(bounds.iter().map(|p| Cell::new(p.x, p.y)));
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `[0, cols) × [0, rows)` as a range.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols as i32, self.rows as i32)
    }

    /// Whether `(i, j)` addresses a cell.
    #[inline]
    pub fn is_valid_index(&self, i: i32, j: i32) -> bool {
        self.bounds().contains(Point::new(i, j))
    }

    #[inline]
    fn offset(&self, i: i32, j: i32) -> Option<usize> {
        self.is_valid_index(i, j)
            .then(|| i as usize * self.rows + j as usize)
    }

    pub fn get(&self, i: i32, j: i32) -> Option<&Cell> {
        self.offset(i, j).map(|k| &self.cells[k])
    }

    pub fn get_mut(&mut self, i: i32, j: i32) -> Option<&mut Cell> {
        self.offset(i, j).map(|k| &mut self.cells[k])
    }

    /// Iterate over all cells, column by column.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
