use std::time::Duration;

use maze_core::{
    CancelToken, Completion, ConfigError, Direction, Grid, MazeError, MazeEvent, Observer,
    Operation, Point, Rejection, Scene, Schedule, Task, Tick,
};
use maze_gen::{Backtracker, CarveScene, RandomSource};
use maze_paths::{Algorithm, Solver};

use crate::config::MazeConfig;
use crate::replay::{PathMarker, PathWalker, Stage};

/// Summary of one solve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    pub algorithm: Algorithm,
    pub start: Point,
    pub target: Point,
    /// Cells the search finalized.
    pub visited: usize,
    /// Start to target, both included; `None` when unsolvable.
    pub path: Option<Vec<Point>>,
}

impl SolveReport {
    fn from_solver(solver: &Solver) -> Self {
        Self {
            algorithm: solver.algorithm(),
            start: solver.start(),
            target: solver.target(),
            visited: solver.visited_count(),
            path: solver.outcome().into_path(),
        }
    }

    /// Number of moves along the path.
    pub fn moves(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// How a scheduled job ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finished {
    /// Every cell was carved.
    Generated,
    /// The path was found, marked and walked.
    Solved(SolveReport),
    /// The search exhausted its frontier.
    Unsolvable(SolveReport),
    Cancelled,
}

/// Result of [`Session::tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// No job is scheduled.
    Idle,
    /// A chunk ran; more work remains.
    Working,
    /// The job is pacing itself; call again after this long.
    Waiting(Duration),
    /// The job just ended.
    Finished(Finished),
}

/// The two paced passes over a found path. They advance side by side, each
/// at its own pace.
struct Replay {
    marker: Task<PathMarker>,
    walker: Task<PathWalker>,
    report: SolveReport,
}

enum Job {
    Generating(Task<Backtracker>),
    Exploring(Task<Solver>),
    Replaying(Replay),
}

impl Job {
    fn operation(&self) -> Operation {
        match self {
            Self::Generating(_) => Operation::Generating,
            Self::Exploring(_) | Self::Replaying(_) => Operation::Solving,
        }
    }
}

/// Fold one replay pass's tick into the combined progress.
fn merge(progress: Option<Progress>, tick: Tick) -> Option<Progress> {
    match (progress, tick) {
        (Some(Progress::Working), _) | (_, Tick::Ran(_) | Tick::Complete(_)) => {
            Some(Progress::Working)
        }
        (Some(Progress::Waiting(a)), Tick::Waiting(b)) => Some(Progress::Waiting(a.min(b))),
        (None, Tick::Waiting(d)) => Some(Progress::Waiting(d)),
        (p, _) => p,
    }
}

type Advance = (Option<Job>, Progress);

/// One maze and its player.
///
/// A session owns the grid, the random source and the observer. At most one
/// job (a generation or a solve with its replay) is active at a time, and it
/// only advances when the host calls [`tick`](Self::tick).
pub struct Session<R, O> {
    config: MazeConfig,
    grid: Grid,
    rng: R,
    observer: O,
    player: Point,
    target: Point,
    solved: bool,
    job: Option<Job>,
    cancel: CancelToken,
    on_solved: Option<Box<dyn FnMut()>>,
    last_report: Option<SolveReport>,
}

impl<R: RandomSource, O: Observer> Session<R, O> {
    /// A session over an uncarved grid. Call [`reset`](Self::reset) to
    /// generate the first maze.
    pub fn new(config: MazeConfig, rng: R, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.bounds),
            player: config.start,
            target: config.target(),
            config,
            rng,
            observer,
            solved: false,
            job: None,
            cancel: CancelToken::new(),
            on_solved: None,
            last_report: None,
        })
    }

    /// Called whenever the player lands on the target outside a solve: by a
    /// manual move, or by being placed on it after generation or a restart.
    pub fn with_on_solved(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_solved = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player's current cell.
    pub fn position(&self) -> Point {
        self.player
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    /// The operation currently holding the session, if any.
    pub fn active(&self) -> Option<Operation> {
        self.job.as_ref().map(Job::operation)
    }

    pub fn last_report(&self) -> Option<&SolveReport> {
        self.last_report.as_ref()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// A handle that cancels the active job at its next chunk boundary.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Cancel the active job, if any.
    pub fn cancel(&mut self) {
        if self.job.is_some() {
            self.cancel.cancel();
        }
    }

    /// Wipe the grid and schedule a new generation.
    pub fn reset(&mut self) -> Result<(), MazeError> {
        self.ensure_idle()?;
        let bounds = self.config.bounds;
        let backtracker = Backtracker::new(bounds, self.config.start, self.config.policy)?;
        self.grid = Grid::new(bounds);
        self.player = self.config.start;
        self.solved = false;
        self.last_report = None;
        self.cancel = CancelToken::new();
        self.emit(MazeEvent::TargetPlaced(self.target));
        log::info!(
            "generating {bounds} maze from {} ({:?})",
            self.config.start,
            self.config.policy
        );
        let task = self.task(backtracker, self.config.pacing.generate);
        self.job = Some(Job::Generating(task));
        Ok(())
    }

    /// Move the target to a random cell, then [`reset`](Self::reset).
    pub fn randomize_target(&mut self) -> Result<Point, MazeError> {
        self.ensure_idle()?;
        let bounds = self.config.bounds;
        self.target = bounds.point(self.rng.below(bounds.len()));
        self.reset()?;
        Ok(self.target)
    }

    /// Search from the player's position to the target, then replay the
    /// path: mark it while walking the player along it.
    pub fn solve(&mut self, algorithm: Algorithm) -> Result<(), MazeError> {
        self.ensure_idle()?;
        self.wipe_marks();
        self.cancel = CancelToken::new();
        log::info!("solving with {algorithm} from {} to {}", self.player, self.target);
        let solver = Solver::new(algorithm, self.config.bounds, self.player, self.target);
        let task = self.task(solver, self.config.pacing.explore);
        self.job = Some(Job::Exploring(task));
        Ok(())
    }

    /// Drive the active job by one chunk.
    pub fn tick(&mut self) -> Result<Progress, MazeError> {
        let Some(job) = self.job.take() else {
            return Ok(Progress::Idle);
        };
        let (next, progress) = self.advance(job)?;
        self.job = next;
        Ok(progress)
    }

    /// Tick until no job is left, sleeping through the pacing waits.
    /// Returns how the last job ended.
    pub fn run_until_idle(&mut self) -> Result<Option<Finished>, MazeError> {
        let mut last = None;
        loop {
            match self.tick()? {
                Progress::Idle => return Ok(last),
                Progress::Working => {}
                Progress::Waiting(d) => std::thread::sleep(d),
                Progress::Finished(f) => last = Some(f),
            }
        }
    }

    /// Move the player one cell through a carved wall.
    ///
    /// Refused moves leave everything unchanged and emit a
    /// [`MazeEvent::MoveRejected`].
    pub fn move_player(&mut self, direction: Direction) -> Result<Point, MazeError> {
        self.ensure_idle()?;
        if self.solved {
            return Err(MazeError::AlreadySolved);
        }
        let from = self.player;
        if !self.grid.contains(from.step(direction)) {
            self.reject(from, direction, Rejection::OutOfBounds);
            return Err(MazeError::OutOfBounds { from, direction });
        }
        if !self.grid.is_open(from, direction) {
            self.reject(from, direction, Rejection::WallBlocked);
            return Err(MazeError::WallBlocked { from, direction });
        }
        let to = from.step(direction);
        self.place_player(to);
        Ok(to)
    }

    /// Remove visited and path annotations.
    pub fn clear_marks(&mut self) -> Result<(), MazeError> {
        self.ensure_idle()?;
        self.wipe_marks();
        Ok(())
    }

    /// Remove annotations and put the player back on the start cell,
    /// keeping the maze.
    pub fn clear_and_restart(&mut self) -> Result<(), MazeError> {
        self.ensure_idle()?;
        self.wipe_marks();
        self.solved = false;
        self.place_player(self.config.start);
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), MazeError> {
        match &self.job {
            Some(job) => Err(MazeError::Busy(job.operation())),
            None => Ok(()),
        }
    }

    /// Wrap `stepper` under the current job's cancel token.
    fn task<S>(&self, stepper: S, schedule: Schedule) -> Task<S> {
        Task::new(stepper, schedule).with_cancel(self.cancel.clone())
    }

    #[inline]
    fn emit(&mut self, event: MazeEvent) {
        self.observer.notify(&event);
    }

    fn reject(&mut self, from: Point, direction: Direction, reason: Rejection) {
        log::debug!("move {direction} from {from} rejected: {reason:?}");
        self.emit(MazeEvent::MoveRejected {
            from,
            direction,
            reason,
        });
    }

    fn wipe_marks(&mut self) {
        self.grid.clear_marks();
        self.emit(MazeEvent::MarksCleared);
    }

    /// Put the player on `p`. Landing on the target here counts as solving
    /// it by hand.
    fn place_player(&mut self, p: Point) {
        self.player = p;
        self.emit(MazeEvent::PlayerMoved(p));
        if p == self.target && !self.solved {
            self.reach_target();
            if let Some(callback) = self.on_solved.as_mut() {
                callback();
            }
        }
    }

    fn reach_target(&mut self) {
        self.solved = true;
        log::info!("target {} reached", self.target);
        self.emit(MazeEvent::Solved);
    }

    fn cancelled(&self, op: Operation) -> Advance {
        log::info!("{op} cancelled");
        (None, Progress::Finished(Finished::Cancelled))
    }

    fn advance(&mut self, job: Job) -> Result<Advance, MazeError> {
        match job {
            Job::Generating(mut task) => {
                let mut scene = CarveScene::new(&mut self.grid, &mut self.observer, &mut self.rng);
                match task.tick(&mut scene)? {
                    Tick::Complete(Completion::Finished) => {
                        log::info!(
                            "maze generated: {} passages in {} steps",
                            self.grid.carved_pairs(),
                            task.steps()
                        );
                        self.place_player(self.player);
                        Ok((None, Progress::Finished(Finished::Generated)))
                    }
                    Tick::Complete(Completion::Cancelled) | Tick::Spent => {
                        Ok(self.cancelled(Operation::Generating))
                    }
                    Tick::Waiting(d) => Ok((Some(Job::Generating(task)), Progress::Waiting(d))),
                    Tick::Ran(_) => Ok((Some(Job::Generating(task)), Progress::Working)),
                }
            }
            Job::Exploring(mut task) => {
                let mut scene = Scene::new(&mut self.grid, &mut self.observer);
                let Ok(tick) = task.tick(&mut scene);
                match tick {
                    Tick::Complete(Completion::Finished) => Ok(self.explored(task.into_inner())),
                    Tick::Complete(Completion::Cancelled) | Tick::Spent => {
                        Ok(self.cancelled(Operation::Solving))
                    }
                    Tick::Waiting(d) => Ok((Some(Job::Exploring(task)), Progress::Waiting(d))),
                    Tick::Ran(_) => Ok((Some(Job::Exploring(task)), Progress::Working)),
                }
            }
            Job::Replaying(mut replay) => {
                let mut stage = Stage {
                    grid: &mut self.grid,
                    observer: &mut self.observer,
                    player: &mut self.player,
                };
                let mut progress = None;
                for tick in [
                    replay.marker.tick(&mut stage),
                    replay.walker.tick(&mut stage),
                ] {
                    let Ok(tick) = tick;
                    if tick == Tick::Complete(Completion::Cancelled) {
                        return Ok(self.cancelled(Operation::Solving));
                    }
                    progress = merge(progress, tick);
                }
                if !replay.marker.is_finished() || !replay.walker.is_finished() {
                    let progress = progress.unwrap_or(Progress::Working);
                    return Ok((Some(Job::Replaying(replay)), progress));
                }
                if self.player == self.target && !self.solved {
                    self.reach_target();
                }
                let report = replay.report;
                self.last_report = Some(report.clone());
                Ok((None, Progress::Finished(Finished::Solved(report))))
            }
        }
    }

    fn explored(&mut self, solver: Solver) -> Advance {
        let report = SolveReport::from_solver(&solver);
        match report.path.clone() {
            Some(path) => {
                log::info!(
                    "{} found a {}-move path after visiting {} cells",
                    report.algorithm,
                    path.len().saturating_sub(1),
                    report.visited
                );
                let replay = Replay {
                    marker: self.task(PathMarker::new(path.clone()), self.config.pacing.mark_path),
                    walker: self.task(PathWalker::new(path), self.config.pacing.walk),
                    report,
                };
                (Some(Job::Replaying(replay)), Progress::Working)
            }
            None => {
                log::warn!(
                    "{} found no path from {} to {}",
                    report.algorithm,
                    report.start,
                    report.target
                );
                self.last_report = Some(report.clone());
                (None, Progress::Finished(Finished::Unsolvable(report)))
            }
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn report_round_trip() {
        let report = SolveReport {
            algorithm: Algorithm::AStar,
            start: Point::ZERO,
            target: Point::new(1, 0),
            visited: 2,
            path: Some(vec![Point::ZERO, Point::new(1, 0)]),
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: SolveReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
