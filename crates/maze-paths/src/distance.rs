use maze_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for 4-directional unit moves.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (b.x - a.x).abs() + (b.y - a.y).abs()
}
