//! The [`Cell`] type: one addressable grid position.

use gridplate_core::geom::Point;

/// A grid cell. It knows its own column `i` and row `j`.
///
/// The indices are fixed at construction. A game built on this template
/// adds its per-cell state as fields here, in this crate, along with the
/// methods its [`Gameplay`](crate::session::Gameplay) uses to mutate them;
/// `cell_picked` receives `&mut Cell` for that purpose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    i: i32,
    j: i32,
}

impl Cell {
    /// A cell in its default state at column `i`, row `j`.
    #[inline]
    pub(crate) const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Column index.
    #[inline]
    pub const fn i(&self) -> i32 {
        self.i
    }

    /// Row index.
    #[inline]
    pub const fn j(&self) -> i32 {
        self.j
    }

    /// `(i, j)` as a point.
    #[inline]
    pub const fn index(&self) -> Point {
        Point::new(self.i, self.j)
    }
}
