use std::cmp::Ordering;

use crate::pqueue::PriorityQueue;
use crate::search::{Frontier, GraphSearch, SearchNode};

fn by_estimate(a: &SearchNode, b: &SearchNode) -> Ordering {
    a.f.cmp(&b.f)
}

/// Best-first frontier ordered by ascending `f`.
///
/// A cell can sit in the heap several times; the search skips the stale
/// copies when it pops them.
#[derive(Debug)]
pub struct BestFirst(PriorityQueue<SearchNode>);

impl Default for BestFirst {
    fn default() -> Self {
        Self(PriorityQueue::new(by_estimate as fn(&SearchNode, &SearchNode) -> Ordering))
    }
}

impl Frontier for BestFirst {
    #[inline]
    fn push(&mut self, node: SearchNode) {
        self.0.push(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop()
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// A* with the Manhattan heuristic. Optimal on 4-connected grids.
pub type AStar = GraphSearch<BestFirst>;

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Bounds, Direction, Grid, NullObserver, Point, Scene};

    #[test]
    fn frontier_pops_lowest_f() {
        let mut q = BestFirst::default();
        for f in [7, 3, 5] {
            q.push(SearchNode {
                pos: Point::ZERO,
                g: 0,
                f,
                from: None,
            });
        }
        assert_eq!(q.pop().map(|n| n.f), Some(3));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn open_room_path_is_shortest() {
        // Open 3x3 room: every wall carved, so the shortest path has 4 moves.
        let mut g = Grid::new(Bounds::new(3, 3));
        for p in g.bounds() {
            if p.x < 2 {
                g.carve(p, Direction::Right).unwrap();
            }
            if p.y < 2 {
                g.carve(p, Direction::Bottom).unwrap();
            }
        }
        let bounds = g.bounds();
        let mut obs = NullObserver;
        let mut scene = Scene::new(&mut g, &mut obs);
        let mut astar = AStar::new(bounds, Point::ZERO, Point::new(2, 2));
        while astar.is_running() {
            astar.expand(&mut scene);
        }
        assert_eq!(astar.outcome().edges(), Some(4));
    }
}
