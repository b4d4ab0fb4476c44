use std::collections::VecDeque;

use maze_core::{Bounds, Point};

use crate::search::{Frontier, GraphSearch, SearchNode};
use crate::traits::Pather;

/// Distance value for cells a breadth-first sweep did not reach.
pub const UNREACHABLE: i32 = i32::MAX;

/// First-in first-out frontier: cells are expanded by discovery depth.
#[derive(Clone, Debug, Default)]
pub struct Fifo(VecDeque<SearchNode>);

impl Frontier for Fifo {
    #[inline]
    fn push(&mut self, node: SearchNode) {
        self.0.push_back(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop_front()
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Breadth-first search. Finds a path with the fewest moves.
pub type Bfs = GraphSearch<Fifo>;

/// Unit-cost distance from `source` to every cell of `bounds`, indexed like
/// [`Bounds::index`]. Cells that cannot be reached hold [`UNREACHABLE`].
pub fn distance_map<P: Pather>(pather: &P, bounds: Bounds, source: Point) -> Vec<i32> {
    let mut dist = vec![UNREACHABLE; bounds.len()];
    let Some(si) = bounds.index(source) else {
        return dist;
    };
    dist[si] = 0;

    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(si);
    let mut nbuf = Vec::with_capacity(4);

    while let Some(ci) = queue.pop_front() {
        let current = dist[ci];
        nbuf.clear();
        pather.neighbors(bounds.point(ci), &mut nbuf);
        for &np in &nbuf {
            let Some(ni) = bounds.index(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = current + 1;
            queue.push_back(ni);
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Direction, Grid, NullObserver, Scene};

    fn corridor(len: i32) -> Grid {
        let mut g = Grid::new(Bounds::new(len, 1));
        for x in 0..len - 1 {
            g.carve(Point::new(x, 0), Direction::Right).unwrap();
        }
        g
    }

    #[test]
    fn distance_map_counts_moves() {
        let g = corridor(5);
        let d = distance_map(&g, g.bounds(), Point::new(1, 0));
        assert_eq!(d, [1, 0, 1, 2, 3]);
    }

    #[test]
    fn distance_map_marks_unreached() {
        let g = Grid::new(Bounds::new(2, 1));
        let d = distance_map(&g, g.bounds(), Point::ZERO);
        assert_eq!(d, [0, UNREACHABLE]);
        assert!(distance_map(&g, g.bounds(), Point::new(9, 9)).iter().all(|&v| v == UNREACHABLE));
    }

    #[test]
    fn bfs_walks_the_corridor() {
        let mut g = corridor(4);
        let bounds = g.bounds();
        let mut obs = NullObserver;
        let mut scene = Scene::new(&mut g, &mut obs);
        let mut bfs = Bfs::new(bounds, Point::ZERO, Point::new(3, 0));
        while bfs.is_running() {
            bfs.expand(&mut scene);
        }
        assert_eq!(bfs.outcome().edges(), Some(3));
        assert_eq!(bfs.visited_count(), 4);
    }
}
