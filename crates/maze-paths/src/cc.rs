//! Connectivity checks over carved walls.

use maze_core::{Grid, Point};

use crate::traits::Pather;

/// Flood-fill from `p` and return every cell connected to it, `p` first.
pub fn reachable(grid: &Grid, p: Point) -> Vec<Point> {
    let bounds = grid.bounds();
    let mut result = Vec::new();
    let Some(si) = bounds.index(p) else {
        return result;
    };

    let mut seen = vec![false; bounds.len()];
    let mut stack = vec![p];
    let mut nbuf = Vec::with_capacity(4);
    seen[si] = true;
    result.push(p);

    while let Some(cp) = stack.pop() {
        nbuf.clear();
        Pather::neighbors(grid, cp, &mut nbuf);
        for &np in &nbuf {
            let Some(ni) = bounds.index(np) else {
                continue;
            };
            if !seen[ni] {
                seen[ni] = true;
                stack.push(np);
                result.push(np);
            }
        }
    }
    result
}

/// Whether every cell can be reached from every other.
pub fn is_connected(grid: &Grid) -> bool {
    if grid.is_empty() {
        return true;
    }
    reachable(grid, Point::ZERO).len() == grid.len()
}

/// Whether the carved graph is a spanning tree: connected, with exactly
/// `cells - 1` passages, hence a unique path between any two cells.
pub fn is_perfect(grid: &Grid) -> bool {
    is_connected(grid) && grid.carved_pairs() + 1 == grid.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Bounds, Direction};

    #[test]
    fn fresh_grid_is_disconnected() {
        let g = Grid::new(Bounds::new(2, 2));
        assert_eq!(reachable(&g, Point::ZERO), [Point::ZERO]);
        assert!(!is_connected(&g));
        assert!(!is_perfect(&g));
    }

    #[test]
    fn single_cell_is_perfect() {
        let g = Grid::new(Bounds::new(1, 1));
        assert!(is_perfect(&g));
    }

    #[test]
    fn loop_is_connected_but_not_perfect() {
        let mut g = Grid::new(Bounds::new(2, 2));
        g.carve(Point::ZERO, Direction::Right).unwrap();
        g.carve(Point::ZERO, Direction::Bottom).unwrap();
        g.carve(Point::new(1, 0), Direction::Bottom).unwrap();
        assert!(is_perfect(&g));
        g.carve(Point::new(0, 1), Direction::Right).unwrap();
        assert!(is_connected(&g));
        assert!(!is_perfect(&g));
    }

    #[test]
    fn reachable_outside_is_empty() {
        let g = Grid::new(Bounds::new(2, 2));
        assert!(reachable(&g, Point::new(5, 5)).is_empty());
    }
}
