//! Error types shared by the maze crates.

use std::fmt;

use crate::direction::Direction;
use crate::geom::{Bounds, Point};

/// Long-running operations that hold a session busy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Generating,
    Solving,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generating => f.write_str("generation"),
            Self::Solving => f.write_str("solve"),
        }
    }
}

/// Runtime errors. None of them leave the grid in a partial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A step from `from` towards `direction` would leave the grid.
    OutOfBounds { from: Point, direction: Direction },
    /// The neighbour exists but the wall towards it is not carved.
    WallBlocked { from: Point, direction: Direction },
    /// Another generation or solve is still in flight.
    Busy(Operation),
    /// The target has already been reached.
    AlreadySolved,
    /// Construction parameters were rejected.
    Config(ConfigError),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { from, direction } => {
                write!(f, "moving {direction} from {from} leaves the grid")
            }
            Self::WallBlocked { from, direction } => {
                write!(f, "wall on the {direction} side of {from} is not carved")
            }
            Self::Busy(op) => write!(f, "rejected: a {op} is already in progress"),
            Self::AlreadySolved => f.write_str("the maze is already solved"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for MazeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Invalid construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width and height must both be at least 1.
    EmptyBounds(Bounds),
    StartOutOfBounds { start: Point, bounds: Bounds },
    TargetOutOfBounds { target: Point, bounds: Bounds },
    /// A schedule must run at least one step per tick.
    ZeroChunkSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBounds(b) => write!(f, "grid size {b} must be at least 1x1"),
            Self::StartOutOfBounds { start, bounds } => {
                write!(f, "start {start} is outside the {bounds} grid")
            }
            Self::TargetOutOfBounds { target, bounds } => {
                write!(f, "target {target} is outside the {bounds} grid")
            }
            Self::ZeroChunkSize => f.write_str("schedule chunk size must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = MazeError::WallBlocked {
            from: Point::new(1, 2),
            direction: Direction::Left,
        };
        assert_eq!(e.to_string(), "wall on the left side of (1, 2) is not carved");
        assert_eq!(
            MazeError::Busy(Operation::Solving).to_string(),
            "rejected: a solve is already in progress"
        );
        let c = ConfigError::TargetOutOfBounds {
            target: Point::new(5, 5),
            bounds: Bounds::new(3, 3),
        };
        assert_eq!(c.to_string(), "target (5, 5) is outside the 3x3 grid");
    }

    #[test]
    fn config_errors_convert_and_chain() {
        use std::error::Error;
        let e: MazeError = ConfigError::EmptyBounds(Bounds::new(0, 3)).into();
        assert_eq!(e.to_string(), "invalid configuration: grid size 0x3 must be at least 1x1");
        assert!(e.source().is_some());
        assert!(MazeError::AlreadySolved.source().is_none());
    }

    #[test]
    fn errors_box_into_dyn_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(ConfigError::ZeroChunkSize);
        assert!(boxed.to_string().contains("chunk size"));
    }
}
