use crate::search::{Frontier, GraphSearch, SearchNode};

/// Last-in first-out frontier: the newest discovery is expanded first.
#[derive(Clone, Debug, Default)]
pub struct Lifo(Vec<SearchNode>);

impl Frontier for Lifo {
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

/// Depth-first search. Finds *a* path; on a perfect maze it is also the
/// only one, otherwise it may be longer than needed.
pub type Dfs = GraphSearch<Lifo>;

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Bounds, Direction, Grid, MazeEvent, Point, Scene};

    #[test]
    fn dives_along_the_latest_neighbour() {
        // Plus-shaped 3x3: centre open on all four sides.
        let mut g = Grid::new(Bounds::new(3, 3));
        let c = Point::new(1, 1);
        for d in Direction::ALL {
            g.carve(c, d).unwrap();
        }
        let bounds = g.bounds();
        let mut obs: Vec<MazeEvent> = Vec::new();
        let mut scene = Scene::new(&mut g, &mut obs);
        let mut dfs = Dfs::new(bounds, c, Point::new(1, 2));
        while dfs.is_running() {
            dfs.expand(&mut scene);
        }
        // Bottom is pushed first, so it is expanded last.
        let visited: Vec<Point> = obs
            .iter()
            .filter_map(|e| match e {
                MazeEvent::CellVisited(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(
            visited,
            [c, Point::new(0, 1), Point::new(1, 0), Point::new(2, 1), Point::new(1, 2)]
        );
        assert_eq!(dfs.outcome().path(), Some(&[c, Point::new(1, 2)][..]));
    }
}
