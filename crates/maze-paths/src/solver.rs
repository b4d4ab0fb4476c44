use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use maze_core::{Bounds, Grid, Observer, Point, Scene, Schedule, Stepper, Task};

use crate::astar::AStar;
use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::search::SearchOutcome;

/// The available search strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Self::Bfs, Self::Dfs, Self::AStar];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An algorithm name that is not one of `bfs`, `dfs` or `astar`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm {:?} (expected bfs, dfs or astar)", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A search of any [`Algorithm`], steppable through a [`Task`].
#[derive(Debug)]
pub enum Solver {
    Bfs(Bfs),
    Dfs(Dfs),
    AStar(AStar),
}

macro_rules! each {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Solver::Bfs($s) => $body,
            Solver::Dfs($s) => $body,
            Solver::AStar($s) => $body,
        }
    };
}

impl Solver {
    pub fn new(algorithm: Algorithm, bounds: Bounds, start: Point, target: Point) -> Self {
        match algorithm {
            Algorithm::Bfs => Self::Bfs(Bfs::new(bounds, start, target)),
            Algorithm::Dfs => Self::Dfs(Dfs::new(bounds, start, target)),
            Algorithm::AStar => Self::AStar(AStar::new(bounds, start, target)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Bfs(_) => Algorithm::Bfs,
            Self::Dfs(_) => Algorithm::Dfs,
            Self::AStar(_) => Algorithm::AStar,
        }
    }

    pub fn start(&self) -> Point {
        each!(self, s => s.start())
    }

    pub fn target(&self) -> Point {
        each!(self, s => s.target())
    }

    pub fn is_running(&self) -> bool {
        each!(self, s => s.is_running())
    }

    pub fn visited_count(&self) -> usize {
        each!(self, s => s.visited_count())
    }

    pub fn expand(&mut self, scene: &mut Scene<'_>) {
        each!(self, s => s.expand(scene))
    }

    pub fn outcome(&self) -> SearchOutcome {
        each!(self, s => s.outcome())
    }
}

impl<'a> Stepper<Scene<'a>> for Solver {
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

/// Run a whole search in one go, reporting every visited cell to `observer`.
pub fn solve(
    grid: &mut Grid,
    algorithm: Algorithm,
    start: Point,
    target: Point,
    observer: &mut dyn Observer,
) -> SearchOutcome {
    let solver = Solver::new(algorithm, grid.bounds(), start, target);
    let mut task = Task::new(solver, Schedule::unpaced());
    let mut scene = Scene::new(grid, observer);
    let Ok(_) = task.run(&mut scene);
    let outcome = task.stepper().outcome();
    log::debug!(
        "{algorithm} from {start} to {target}: {} cells visited, found={}",
        task.stepper().visited_count(),
        outcome.is_found()
    );
    outcome
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_and_algorithm_round_trip() {
        let out = SearchOutcome::Found(vec![Point::ZERO, Point::new(0, 1)]);
        let json = serde_json::to_string(&(Algorithm::Dfs, &out)).unwrap();
        let (alg, back): (Algorithm, SearchOutcome) = serde_json::from_str(&json).unwrap();
        assert_eq!(alg, Algorithm::Dfs);
        assert_eq!(back, out);
    }
}
