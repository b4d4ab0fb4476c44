//! The maze [`Grid`]: a flat row-major array of [`Cell`]s.
//!
//! Walls only change through [`Grid::carve`], which opens both sides of a
//! wall at once, so `open(a, d)` always equals `open(a + d, opposite(d))`.

use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::MazeError;
use crate::geom::{Bounds, Neighbors, Point};

/// A 2D grid of maze cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every wall standing. Empty bounds give an empty grid.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![Cell::default(); bounds.len()],
        }
    }

    /// The grid dimensions.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is a cell of this grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        let i = self.bounds.index(p)?;
        Some(&self.cells[i])
    }

    /// Mutable access to the cell at `p`.
    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        let i = self.bounds.index(p)?;
        Some(&mut self.cells[i])
    }

    /// In-bounds neighbours of `p`, bottom/right/top/left.
    #[inline]
    pub fn neighbors(&self, p: Point) -> Neighbors {
        self.bounds.neighbors(p)
    }

    /// Whether the wall on side `d` of `p` is carved. False out of bounds.
    #[inline]
    pub fn is_open(&self, p: Point, d: Direction) -> bool {
        self.cell(p).is_some_and(|c| c.is_open(d))
    }

    /// Whether `a` and `b` are adjacent with the wall between them carved.
    pub fn open_between(&self, a: Point, b: Point) -> bool {
        match Direction::between(a, b) {
            Some(d) => self.is_open(a, d) && self.is_open(b, d.opposite()),
            None => false,
        }
    }

    /// Carve the wall on side `d` of `p`, and the matching wall of the
    /// neighbour. Returns the neighbour.
    pub fn carve(&mut self, p: Point, d: Direction) -> Result<Point, MazeError> {
        let next = p.step(d);
        let out = MazeError::OutOfBounds {
            from: p,
            direction: d,
        };
        let (Some(a), Some(b)) = (self.bounds.index(p), self.bounds.index(next)) else {
            return Err(out);
        };
        self.cells[a].open_side(d);
        self.cells[b].open_side(d.opposite());
        Ok(next)
    }

    /// Record the generator's visit order for `p`.
    pub fn mark_generated(&mut self, p: Point, order: usize) {
        if let Some(c) = self.cell_mut(p) {
            c.generated = Some(order);
        }
    }

    /// Flag `p` as visited by a search. Returns whether the flag changed;
    /// marking twice leaves the same state as marking once.
    pub fn mark_visited(&mut self, p: Point) -> bool {
        self.cell_mut(p).is_some_and(Cell::mark_visited)
    }

    /// Flag `p` as lying on the found path.
    pub fn mark_on_path(&mut self, p: Point) {
        if let Some(c) = self.cell_mut(p) {
            c.on_path = true;
        }
    }

    /// Clear visited and on-path flags everywhere.
    pub fn clear_marks(&mut self) {
        for c in self.cells.iter_mut() {
            c.clear_marks();
        }
    }

    /// Number of carved wall pairs (undirected edges).
    pub fn carved_pairs(&self) -> usize {
        let sides: usize = self.cells.iter().map(Cell::degree).sum();
        sides / 2
    }

    /// Iterate over `(Point, &Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_walled() {
        let g = Grid::new(Bounds::new(4, 3));
        assert_eq!(g.len(), 12);
        assert_eq!(g.carved_pairs(), 0);
        assert!(g.iter().all(|(_, c)| c.degree() == 0));
    }

    #[test]
    fn carve_is_symmetric() {
        let mut g = Grid::new(Bounds::new(3, 3));
        let a = Point::new(1, 1);
        let b = g.carve(a, Direction::Right).unwrap();
        assert_eq!(b, Point::new(2, 1));
        assert!(g.is_open(a, Direction::Right));
        assert!(g.is_open(b, Direction::Left));
        assert!(g.open_between(a, b));
        assert!(g.open_between(b, a));
        assert_eq!(g.carved_pairs(), 1);
    }

    #[test]
    fn carve_out_of_bounds_is_rejected() {
        let mut g = Grid::new(Bounds::new(2, 2));
        let err = g.carve(Point::new(0, 0), Direction::Top).unwrap_err();
        assert_eq!(
            err,
            MazeError::OutOfBounds {
                from: Point::new(0, 0),
                direction: Direction::Top
            }
        );
        assert_eq!(g.carved_pairs(), 0);
    }

    #[test]
    fn open_between_requires_adjacency() {
        let mut g = Grid::new(Bounds::new(3, 3));
        g.carve(Point::new(0, 0), Direction::Bottom).unwrap();
        assert!(!g.open_between(Point::new(0, 0), Point::new(0, 2)));
        assert!(!g.open_between(Point::new(0, 0), Point::new(1, 0)));
        assert!(!g.open_between(Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn mark_visited_twice_equals_once() {
        let mut once = Grid::new(Bounds::new(2, 2));
        let mut twice = once.clone();
        let p = Point::new(1, 0);
        assert!(once.mark_visited(p));
        twice.mark_visited(p);
        assert!(!twice.mark_visited(p));
        assert_eq!(once, twice);
        assert!(!once.mark_visited(Point::new(9, 9)));
    }

    #[test]
    fn clear_marks_resets_annotations() {
        let mut g = Grid::new(Bounds::new(2, 1));
        g.carve(Point::ZERO, Direction::Right).unwrap();
        g.mark_generated(Point::ZERO, 0);
        g.mark_visited(Point::ZERO);
        g.mark_on_path(Point::new(1, 0));
        g.clear_marks();
        assert!(g.iter().all(|(_, c)| !c.visited && !c.on_path));
        assert_eq!(g.cell(Point::ZERO).unwrap().generated, Some(0));
        assert_eq!(g.carved_pairs(), 1);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(Bounds::new(3, 2));
        g.carve(Point::ZERO, Direction::Right).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
