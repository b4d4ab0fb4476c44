use maze_core::{Grid, Point};

use crate::distance::manhattan;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}

/// Passable neighbours are those behind a carved wall, bottom/right/top/left.
impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let Some(cell) = self.cell(p) else {
            return;
        };
        for adj in Grid::neighbors(self, p) {
            if cell.is_open(adj.dir) {
                buf.push(adj.pos);
            }
        }
    }
}

impl WeightedPather for Grid {
    #[inline]
    fn cost(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl AstarPather for Grid {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
