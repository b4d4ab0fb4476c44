//! The [`Cell`] type: wall state plus presentation annotations.

use crate::direction::Direction;

/// A single maze cell.
///
/// `open[d]` is true when the wall on side `d` has been carved. The
/// annotation fields are written by the generator and the searches and are
/// only meaningful to a presentation layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Indexed by [`Direction::index`].
    pub open: [bool; 4],
    /// Order in which the generator first reached this cell.
    pub generated: Option<usize>,
    pub visited: bool,
    pub on_path: bool,
}

impl Cell {
    /// Whether the wall on side `d` is carved.
    #[inline]
    pub const fn is_open(&self, d: Direction) -> bool {
        self.open[d.index()]
    }

    /// Carve the wall on side `d`.
    #[inline]
    pub fn open_side(&mut self, d: Direction) {
        self.open[d.index()] = true;
    }

    /// Carved sides, in [`Direction::SEARCH_ORDER`].
    pub fn open_sides(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::SEARCH_ORDER
            .into_iter()
            .filter(move |d| self.is_open(*d))
    }

    /// Number of carved sides.
    #[inline]
    pub fn degree(&self) -> usize {
        self.open.iter().filter(|o| **o).count()
    }

    /// Set the visited flag. Returns whether the flag changed.
    #[inline]
    pub fn mark_visited(&mut self) -> bool {
        !std::mem::replace(&mut self.visited, true)
    }

    /// Drop the search annotations, keeping walls and generation order.
    #[inline]
    pub fn clear_marks(&mut self) {
        self.visited = false;
        self.on_path = false;
    }
}
