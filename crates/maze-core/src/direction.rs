//! The four wall [`Direction`]s and the [`Adjacent`] neighbour record.

use std::fmt;

use crate::geom::Point;

/// A side of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Clockwise from the top; also the storage order of wall flags.
    pub const ALL: [Direction; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Neighbour enumeration order: bottom, right, top, left.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Self::Bottom, Self::Right, Self::Top, Self::Left];

    /// Unit offset of one step in this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Self::Top => Point::new(0, -1),
            Self::Right => Point::new(1, 0),
            Self::Bottom => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
        }
    }

    /// top <-> bottom, left <-> right.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Slot of this direction in [`Direction::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// The direction leading from `from` to the adjacent point `to`.
    ///
    /// Returns `None` when the points are not orthogonally adjacent.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let d = to - from;
        Self::ALL.into_iter().find(|dir| dir.offset() == d)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// A neighbour of some cell: where it is, the direction taken to reach it,
/// and the direction it would use to come back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Adjacent {
    pub pos: Point,
    pub dir: Direction,
    pub back: Direction,
}
