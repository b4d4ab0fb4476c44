//! Geometry primitives: [`Point`] and [`Bounds`].

use std::fmt;
use std::ops::{Add, Sub};

use crate::direction::{Adjacent, Direction};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down (row 0 is the top row).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The point one step away in direction `d`.
    #[inline]
    pub fn step(self, d: Direction) -> Self {
        self + d.offset()
    }

    /// Canonical key for set/map membership.
    #[inline]
    pub const fn key(self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Whether the point lies inside `bounds`.
    #[inline]
    pub fn in_bounds(self, bounds: Bounds) -> bool {
        bounds.contains(self)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    #[inline]
    fn from(p: Point) -> Self {
        p.key()
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Grid dimensions. Valid coordinates are `[0, width) x [0, height)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Create bounds of the given size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Size as a `Point` (x = width, y = height).
    #[inline]
    pub const fn size(self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width as usize) * (self.height as usize)
    }

    /// Whether the bounds describe no cell at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// `0 <= p.x < width` and `0 <= p.y < height`.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// The bottom-right cell.
    #[inline]
    pub const fn corner(self) -> Point {
        Point::new(self.width - 1, self.height - 1)
    }

    /// Flat row-major index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn point(self, idx: usize) -> Point {
        let w = self.width.max(1) as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The in-bounds neighbours of `p`, in [`Direction::SEARCH_ORDER`].
    pub fn neighbors(self, p: Point) -> Neighbors {
        Neighbors {
            bounds: self,
            origin: p,
            next: 0,
        }
    }

    /// Row-major iterator over every point.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: Point::ZERO,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Point;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Row-major iterator over the points of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Point,
}

impl Iterator for BoundsIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.height {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.width {
            self.cur.x = 0;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.height {
            return (0, Some(0));
        }
        let w = self.bounds.width as usize;
        let remaining_in_row = (self.bounds.width - self.cur.x) as usize;
        let remaining_rows = (self.bounds.height - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

/// Iterator over the in-bounds neighbours of a point.
///
/// Yields bottom, right, top, left; this order fixes search tie-breaks.
#[derive(Clone, Debug)]
pub struct Neighbors {
    bounds: Bounds,
    origin: Point,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Adjacent;

    fn next(&mut self) -> Option<Adjacent> {
        while self.next < Direction::SEARCH_ORDER.len() {
            let dir = Direction::SEARCH_ORDER[self.next];
            self.next += 1;
            let pos = self.origin.step(dir);
            if self.bounds.contains(pos) {
                return Some(Adjacent {
                    pos,
                    dir,
                    back: dir.opposite(),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a.shift(-1, 1), Point::new(0, 3));
    }

    #[test]
    fn point_key_is_canonical() {
        let mut seen = HashSet::new();
        seen.insert(Point::new(3, 7).key());
        assert!(seen.contains(&(3, 7)));
        assert_eq!(Point::from((3, 7)), Point::new(3, 7));
        assert_eq!(Point::new(3, 7).to_string(), "(3, 7)");
    }

    #[test]
    fn bounds_contains() {
        let b = Bounds::new(3, 2);
        assert!(b.contains(Point::new(0, 0)));
        assert!(b.contains(Point::new(2, 1)));
        assert!(!b.contains(Point::new(3, 0)));
        assert!(!b.contains(Point::new(0, 2)));
        assert!(!b.contains(Point::new(-1, 0)));
        assert!(Point::new(1, 1).in_bounds(b));
    }

    #[test]
    fn bounds_index_round_trip() {
        let b = Bounds::new(4, 3);
        for p in b {
            let i = b.index(p).unwrap();
            assert_eq!(b.point(i), p);
        }
        assert_eq!(b.index(Point::new(4, 0)), None);
        assert_eq!(b.corner(), Point::new(3, 2));
    }

    #[test]
    fn bounds_iter_count() {
        let b = Bounds::new(3, 2);
        let pts: Vec<_> = b.iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(b.iter().len(), 6);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[5], Point::new(2, 1));
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::new(0, 5);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
        assert!(Bounds::new(-2, 3).is_empty());
    }

    #[test]
    fn neighbors_fixed_order() {
        let b = Bounds::new(3, 3);
        let dirs: Vec<_> = b.neighbors(Point::new(1, 1)).map(|a| a.dir).collect();
        assert_eq!(
            dirs,
            [Direction::Bottom, Direction::Right, Direction::Top, Direction::Left]
        );
        let positions: Vec<_> = b.neighbors(Point::new(1, 1)).map(|a| a.pos).collect();
        assert_eq!(
            positions,
            [
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn neighbors_skip_out_of_bounds() {
        let b = Bounds::new(2, 2);
        let adj: Vec<_> = b.neighbors(Point::ZERO).collect();
        assert_eq!(adj.len(), 2);
        assert_eq!(adj[0].dir, Direction::Bottom);
        assert_eq!(adj[0].back, Direction::Top);
        assert_eq!(adj[1].dir, Direction::Right);
        assert_eq!(adj[1].back, Direction::Left);
        assert_eq!(Bounds::new(1, 1).neighbors(Point::ZERO).count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point::new(-4, 9);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn bounds_round_trip() {
        let b = Bounds::new(20, 10);
        let json = serde_json::to_string(&b).unwrap();
        let back: Bounds = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }
}
