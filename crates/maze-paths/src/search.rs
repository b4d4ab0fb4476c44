//! The shared frontier search behind BFS, DFS and A*.
//!
//! A [`GraphSearch`] is a resumable traversal: each [`expand`] pops one node
//! from its frontier, finalizes it, and pushes its undiscovered open
//! neighbours. The three algorithms only differ in the [`Frontier`] they
//! plug in.
//!
//! [`expand`]: GraphSearch::expand

use std::convert::Infallible;

use maze_core::{Bounds, Grid, MazeEvent, Point, Scene, Stepper};

use crate::traits::{AstarPather, Pather, WeightedPather};

/// A discovered cell waiting in a frontier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchNode {
    pub pos: Point,
    /// Cost from the start.
    pub g: i32,
    /// `g` plus the estimate to the target.
    pub f: i32,
    /// The cell this entry was pushed from; `None` for the start.
    pub from: Option<Point>,
}

/// The container deciding which discovered cell is expanded next.
pub trait Frontier {
    fn push(&mut self, node: SearchNode);
    fn pop(&mut self) -> Option<SearchNode>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of a finished search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// Cells from start to target, both included.
    Found(Vec<Point>),
    /// The frontier ran dry before the target was finalized.
    Unreachable,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found(path) => Some(path),
            Self::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Number of moves along the path.
    pub fn edges(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    pub fn into_path(self) -> Option<Vec<Point>> {
        match self {
            Self::Found(path) => Some(path),
            Self::Unreachable => None,
        }
    }
}

/// A resumable search from `start` to `target` over carved walls.
#[derive(Debug)]
pub struct GraphSearch<F> {
    frontier: F,
    bounds: Bounds,
    start: Point,
    target: Point,
    current: Option<Point>,
    visited: Vec<bool>,
    predecessor: Vec<Option<Point>>,
    visited_count: usize,
    nbuf: Vec<Point>,
}

impl<F: Frontier + Default> GraphSearch<F> {
    /// A search seeded with `start`.
    pub fn new(bounds: Bounds, start: Point, target: Point) -> Self {
        Self::with_frontier(F::default(), bounds, start, target)
    }
}

impl<F: Frontier> GraphSearch<F> {
    pub fn with_frontier(mut frontier: F, bounds: Bounds, start: Point, target: Point) -> Self {
        frontier.push(SearchNode {
            pos: start,
            g: 0,
            f: 0,
            from: None,
        });
        Self {
            frontier,
            bounds,
            start,
            target,
            current: None,
            visited: vec![false; bounds.len()],
            predecessor: vec![None; bounds.len()],
            visited_count: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// The most recently finalized cell.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// Cells finalized so far.
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether another expansion is due: the frontier is not empty and the
    /// target has not been finalized yet.
    pub fn is_running(&self) -> bool {
        !self.frontier.is_empty() && self.current != Some(self.target)
    }

    /// The cell `p` was finalized from, if any.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        let i = self.bounds.index(p)?;
        self.predecessor[i]
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.bounds.index(p).is_some_and(|i| self.visited[i])
    }

    /// Pop one node and expand it.
    ///
    /// Stale entries (cells finalized through an earlier, cheaper entry) are
    /// dropped without further effect. The predecessor of a cell is taken
    /// from the entry that finalizes it, not from its first discovery.
    pub fn expand(&mut self, scene: &mut Scene<'_>) {
        let Some(node) = self.frontier.pop() else {
            return;
        };
        let Some(i) = self.bounds.index(node.pos) else {
            return;
        };
        if self.visited[i] {
            return;
        }
        self.visited[i] = true;
        self.predecessor[i] = node.from;
        self.visited_count += 1;
        self.current = Some(node.pos);
        scene.grid.mark_visited(node.pos);
        scene.emit(MazeEvent::CellVisited(node.pos));
        if node.pos == self.target {
            return;
        }

        let grid: &Grid = scene.grid;
        self.nbuf.clear();
        Pather::neighbors(grid, node.pos, &mut self.nbuf);
        for &np in &self.nbuf {
            let Some(ni) = self.bounds.index(np) else {
                continue;
            };
            if self.visited[ni] {
                continue;
            }
            let g = node.g + grid.cost(node.pos, np);
            self.frontier.push(SearchNode {
                pos: np,
                g,
                f: g + grid.estimate(np, self.target),
                from: Some(node.pos),
            });
        }
    }

    /// Reconstruct the path once the search stopped.
    pub fn outcome(&self) -> SearchOutcome {
        if !self.is_visited(self.target) {
            return SearchOutcome::Unreachable;
        }
        let mut path = vec![self.target];
        let mut p = self.target;
        while p != self.start {
            let Some(prev) = self.predecessor(p) else {
                return SearchOutcome::Unreachable;
            };
            path.push(prev);
            p = prev;
        }
        path.reverse();
        SearchOutcome::Found(path)
    }
}

impl<'a, F: Frontier> Stepper<Scene<'a>> for GraphSearch<F> {
    type Error = Infallible;

    #[inline]
    fn proceed(&self, _scene: &Scene<'a>) -> bool {
        self.is_running()
    }

    fn step(&mut self, scene: &mut Scene<'a>) -> Result<(), Infallible> {
        self.expand(scene);
        Ok(())
    }
}
