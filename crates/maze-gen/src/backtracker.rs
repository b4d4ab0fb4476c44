//! Randomized depth-first backtracking over the cell graph.
//!
//! The generator keeps an explicit stack seeded with the start cell. Each
//! step looks at the top of the stack, records its first visit, and either
//! carves into a random unvisited neighbour or backtracks. It stops once
//! every cell has been visited, which leaves the carved walls forming a
//! spanning tree.

use maze_core::{
    Adjacent, Bounds, ConfigError, Grid, MazeError, MazeEvent, Observer, Point, Schedule,
    Stepper, Task,
};

use crate::random::RandomSource;

/// How the next neighbour is picked among the unvisited candidates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarvePolicy {
    /// One uniformly random index into the candidates.
    #[default]
    Uniform,
    /// Shuffle the candidates and take the last one.
    Shuffled,
}

/// What a generation step works on: the grid, its observer and the source
/// of randomness.
pub struct CarveScene<'a, R> {
    pub grid: &'a mut Grid,
    pub observer: &'a mut dyn Observer,
    pub rng: &'a mut R,
}

impl<'a, R> CarveScene<'a, R> {
    pub fn new(grid: &'a mut Grid, observer: &'a mut dyn Observer, rng: &'a mut R) -> Self {
        Self {
            grid,
            observer,
            rng,
        }
    }

    #[inline]
    pub fn emit(&mut self, event: MazeEvent) {
        self.observer.notify(&event);
    }
}

/// The backtracker state machine.
#[derive(Clone, Debug)]
pub struct Backtracker {
    bounds: Bounds,
    policy: CarvePolicy,
    stack: Vec<Point>,
    visited: Vec<bool>,
    visited_count: usize,
    candidates: Vec<Adjacent>,
}

impl Backtracker {
    /// A generator over `bounds` that starts carving at `start`.
    pub fn new(bounds: Bounds, start: Point, policy: CarvePolicy) -> Result<Self, ConfigError> {
        if bounds.is_empty() {
            return Err(ConfigError::EmptyBounds(bounds));
        }
        if !bounds.contains(start) {
            return Err(ConfigError::StartOutOfBounds { start, bounds });
        }
        Ok(Self {
            bounds,
            policy,
            stack: vec![start],
            visited: vec![false; bounds.len()],
            visited_count: 0,
            candidates: Vec::with_capacity(4),
        })
    }

    pub fn policy(&self) -> CarvePolicy {
        self.policy
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Current depth of the backtracking stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether cells remain to be visited.
    pub fn is_running(&self) -> bool {
        self.visited_count < self.bounds.len() && !self.stack.is_empty()
    }

    fn is_visited(&self, p: Point) -> bool {
        self.bounds.index(p).is_some_and(|i| self.visited[i])
    }

    /// Advance by one step: visit, carve or backtrack.
    pub fn carve_step<R: RandomSource>(
        &mut self,
        scene: &mut CarveScene<'_, R>,
    ) -> Result<(), MazeError> {
        let Some(&current) = self.stack.last() else {
            return Ok(());
        };
        if let Some(i) = self.bounds.index(current) {
            if !self.visited[i] {
                self.visited[i] = true;
                let order = self.visited_count;
                self.visited_count += 1;
                scene.grid.mark_generated(current, order);
                scene.emit(MazeEvent::CellGenerated {
                    pos: current,
                    order,
                });
            }
        }

        self.candidates.clear();
        for adj in self.bounds.neighbors(current) {
            if !self.is_visited(adj.pos) {
                self.candidates.push(adj);
            }
        }

        let next = match self.policy {
            CarvePolicy::Uniform if !self.candidates.is_empty() => {
                let i = scene.rng.below(self.candidates.len());
                Some(self.candidates[i])
            }
            CarvePolicy::Uniform => None,
            CarvePolicy::Shuffled => {
                scene.rng.shuffle(&mut self.candidates);
                self.candidates.pop()
            }
        };
        let Some(next) = next else {
            self.stack.pop();
            return Ok(());
        };

        scene.grid.carve(current, next.dir)?;
        scene.emit(MazeEvent::CellCarved {
            pos: current,
            direction: next.dir,
        });
        self.stack.push(next.pos);
        Ok(())
    }
}

impl<'a, R: RandomSource> Stepper<CarveScene<'a, R>> for Backtracker {
    type Error = MazeError;

    #[inline]
    fn proceed(&self, _scene: &CarveScene<'a, R>) -> bool {
        self.is_running()
    }

    fn step(&mut self, scene: &mut CarveScene<'a, R>) -> Result<(), MazeError> {
        self.carve_step(scene)
    }
}

/// Carve a complete maze into `grid` in one go.
///
/// `grid` should be fresh: walls that are already open stay open.
pub fn generate<R: RandomSource>(
    grid: &mut Grid,
    start: Point,
    policy: CarvePolicy,
    rng: &mut R,
    observer: &mut dyn Observer,
) -> Result<(), MazeError> {
    let backtracker = Backtracker::new(grid.bounds(), start, policy)?;
    let mut task = Task::new(backtracker, Schedule::unpaced());
    let mut scene = CarveScene::new(grid, observer, rng);
    task.run(&mut scene)?;
    log::debug!(
        "carved {} passages over {} cells ({} steps)",
        grid.carved_pairs(),
        grid.len(),
        task.steps()
    );
    Ok(())
}

/// Like [`generate`], but checks that every cell ended up connected and
/// starts over on a fresh grid when it did not. Gives up after `attempts`
/// tries and returns whether the final grid is connected.
pub fn generate_verified<R: RandomSource>(
    grid: &mut Grid,
    start: Point,
    policy: CarvePolicy,
    rng: &mut R,
    observer: &mut dyn Observer,
    attempts: usize,
) -> Result<bool, MazeError> {
    for attempt in 1..=attempts.max(1) {
        *grid = Grid::new(grid.bounds());
        generate(grid, start, policy, rng, observer)?;
        if maze_paths::is_connected(grid) {
            return Ok(true);
        }
        log::warn!("generated maze is disconnected (attempt {attempt}/{attempts}), regenerating");
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Direction, NullObserver};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn carve(w: i32, h: i32, seed: u64, policy: CarvePolicy) -> Grid {
        let mut grid = Grid::new(Bounds::new(w, h));
        let mut rng = StdRng::seed_from_u64(seed);
        generate(&mut grid, Point::ZERO, policy, &mut rng, &mut NullObserver).unwrap();
        grid
    }

    #[test]
    fn walls_are_symmetric() {
        let grid = carve(9, 7, 1, CarvePolicy::Uniform);
        for (p, cell) in grid.iter() {
            for adj in grid.neighbors(p) {
                let other = grid.cell(adj.pos).unwrap();
                assert_eq!(cell.is_open(adj.dir), other.is_open(adj.back), "{p} {}", adj.dir);
            }
        }
    }

    #[test]
    fn carves_a_spanning_tree() {
        for policy in [CarvePolicy::Uniform, CarvePolicy::Shuffled] {
            for seed in 0..8 {
                let grid = carve(12, 8, seed, policy);
                assert_eq!(grid.carved_pairs(), 12 * 8 - 1, "{policy:?} seed {seed}");
                assert!(maze_paths::is_perfect(&grid), "{policy:?} seed {seed}");
            }
        }
    }

    #[test]
    fn every_cell_gets_a_unique_order() {
        let grid = carve(6, 5, 42, CarvePolicy::Uniform);
        let mut orders: Vec<usize> = grid.iter().filter_map(|(_, c)| c.generated).collect();
        orders.sort_unstable();
        assert_eq!(orders, (0..30).collect::<Vec<_>>());
        assert_eq!(grid.cell(Point::ZERO).unwrap().generated, Some(0));
    }

    #[test]
    fn single_cell_grid_needs_no_carving() {
        let grid = carve(1, 1, 0, CarvePolicy::Uniform);
        assert_eq!(grid.carved_pairs(), 0);
        assert_eq!(grid.cell(Point::ZERO).unwrap().generated, Some(0));
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(
            carve(10, 10, 5, CarvePolicy::Uniform),
            carve(10, 10, 5, CarvePolicy::Uniform)
        );
    }

    /// Always picks index 0.
    struct FirstChoice;

    impl RandomSource for FirstChoice {
        fn unit(&mut self) -> f64 {
            0.0
        }
    }

    #[test]
    fn scripted_source_follows_search_order() {
        // With index 0 every time the walk prefers bottom, then right.
        let mut grid = Grid::new(Bounds::new(2, 2));
        let mut events: Vec<MazeEvent> = Vec::new();
        generate(&mut grid, Point::ZERO, CarvePolicy::Uniform, &mut FirstChoice, &mut events)
            .unwrap();
        let carved: Vec<(Point, Direction)> = events
            .iter()
            .filter_map(|e| match e {
                MazeEvent::CellCarved { pos, direction } => Some((*pos, *direction)),
                _ => None,
            })
            .collect();
        assert_eq!(
            carved,
            [
                (Point::new(0, 0), Direction::Bottom),
                (Point::new(0, 1), Direction::Right),
                (Point::new(1, 1), Direction::Top),
            ]
        );
        assert!(maze_paths::is_perfect(&grid));
    }

    #[test]
    fn stepping_through_a_task_reports_progress() {
        let bounds = Bounds::new(5, 5);
        let mut grid = Grid::new(bounds);
        let mut rng = StdRng::seed_from_u64(11);
        let mut obs = NullObserver;
        let gen_task = Backtracker::new(bounds, Point::new(2, 2), CarvePolicy::Shuffled).unwrap();
        let mut task = Task::new(gen_task, Schedule::paced(3, 0));
        let mut scene = CarveScene::new(&mut grid, &mut obs, &mut rng);
        let mut ticks = 0;
        while !task.is_finished() {
            task.tick(&mut scene).unwrap();
            ticks += 1;
        }
        assert!(ticks > 1);
        assert_eq!(task.stepper().visited_count(), 25);
        assert_eq!(grid.carved_pairs(), 24);
    }

    #[test]
    fn invalid_start_is_rejected() {
        let bounds = Bounds::new(3, 3);
        assert_eq!(
            Backtracker::new(bounds, Point::new(3, 0), CarvePolicy::Uniform).unwrap_err(),
            ConfigError::StartOutOfBounds {
                start: Point::new(3, 0),
                bounds
            }
        );
        assert!(matches!(
            Backtracker::new(Bounds::new(0, 4), Point::ZERO, CarvePolicy::Uniform),
            Err(ConfigError::EmptyBounds(_))
        ));
    }

    #[test]
    fn generate_reports_bad_start() {
        let mut grid = Grid::new(Bounds::new(2, 2));
        let err = generate(
            &mut grid,
            Point::new(-1, 0),
            CarvePolicy::Uniform,
            &mut FirstChoice,
            &mut NullObserver,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MazeError::Config(ConfigError::StartOutOfBounds { .. })
        ));
        assert_eq!(grid.carved_pairs(), 0);
    }

    #[test]
    fn verified_generation_is_connected() {
        let mut grid = Grid::new(Bounds::new(7, 4));
        let mut rng = StdRng::seed_from_u64(2024);
        let ok = generate_verified(
            &mut grid,
            Point::ZERO,
            CarvePolicy::Shuffled,
            &mut rng,
            &mut NullObserver,
            3,
        )
        .unwrap();
        assert!(ok);
        assert!(maze_paths::is_perfect(&grid));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn policy_round_trip() {
        let json = serde_json::to_string(&CarvePolicy::Shuffled).unwrap();
        let back: CarvePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CarvePolicy::Shuffled);
    }
}
