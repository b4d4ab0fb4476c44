use maze_core::{Bounds, ConfigError, Point, Schedule};
use maze_gen::CarvePolicy;

/// Schedules for the four kinds of scheduled work a session runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pacing {
    /// Carving the maze.
    pub generate: Schedule,
    /// Search expansions.
    pub explore: Schedule,
    /// Marking the found path, target first.
    pub mark_path: Schedule,
    /// Walking the player along the found path.
    pub walk: Schedule,
}

impl Pacing {
    /// Everything runs in a single tick per phase, with no waits.
    pub const fn instant() -> Self {
        Self {
            generate: Schedule::unpaced(),
            explore: Schedule::unpaced(),
            mark_path: Schedule::unpaced(),
            walk: Schedule::unpaced(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generate.validate()?;
        self.explore.validate()?;
        self.mark_path.validate()?;
        self.walk.validate()
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            generate: Schedule::paced(100, 0),
            explore: Schedule::paced(10, 0),
            mark_path: Schedule::paced(1, 5),
            walk: Schedule::paced(1, 100),
        }
    }
}

/// Session configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    pub bounds: Bounds,
    /// Where the player starts and where carving begins.
    pub start: Point,
    /// Goal cell. `None` means the bottom-right corner.
    pub target: Option<Point>,
    pub policy: CarvePolicy,
    pub pacing: Pacing,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(20, 10),
            start: Point::ZERO,
            target: None,
            policy: CarvePolicy::Uniform,
            pacing: Pacing::default(),
        }
    }
}

impl MazeConfig {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.bounds = Bounds::new(width, height);
        self
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    pub fn with_target(mut self, target: Point) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_policy(mut self, policy: CarvePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// The effective target cell.
    pub fn target(&self) -> Point {
        self.target.unwrap_or(self.bounds.corner())
    }

    /// Check that the grid is non-empty, both endpoints lie inside it and
    /// every schedule makes progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.is_empty() {
            return Err(ConfigError::EmptyBounds(self.bounds));
        }
        if !self.bounds.contains(self.start) {
            return Err(ConfigError::StartOutOfBounds {
                start: self.start,
                bounds: self.bounds,
            });
        }
        let target = self.target();
        if !self.bounds.contains(target) {
            return Err(ConfigError::TargetOutOfBounds {
                target,
                bounds: self.bounds,
            });
        }
        self.pacing.validate()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let c = MazeConfig::default().with_size(8, 6).with_target(Point::new(3, 3));
        let json = serde_json::to_string(&c).unwrap();
        let back: MazeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
