//! Replay of a found path: marking it on the grid while the player walks
//! along it.

use std::convert::Infallible;

use maze_core::{Grid, MazeEvent, Observer, Point, Stepper};

/// What a replay step works on.
pub struct Stage<'a> {
    pub grid: &'a mut Grid,
    pub observer: &'a mut dyn Observer,
    pub player: &'a mut Point,
}

impl Stage<'_> {
    #[inline]
    fn emit(&mut self, event: MazeEvent) {
        self.observer.notify(&event);
    }
}

/// Marks path cells as on-path, from the target back towards the start.
/// The start cell itself is left unmarked.
#[derive(Clone, Debug)]
pub struct PathMarker {
    path: Vec<Point>,
    remaining: usize,
}

impl PathMarker {
    /// `path` runs from start to target.
    pub fn new(path: Vec<Point>) -> Self {
        let remaining = path.len();
        Self { path, remaining }
    }
}

impl<'a> Stepper<Stage<'a>> for PathMarker {
    type Error = Infallible;

    fn proceed(&self, _stage: &Stage<'a>) -> bool {
        self.remaining > 1
    }

    fn step(&mut self, stage: &mut Stage<'a>) -> Result<(), Infallible> {
        self.remaining -= 1;
        let p = self.path[self.remaining];
        stage.grid.mark_on_path(p);
        stage.emit(MazeEvent::CellOnPath(p));
        Ok(())
    }
}

/// Moves the player one cell along the path per step. The first cell is
/// where the player already stands and is skipped.
#[derive(Clone, Debug)]
pub struct PathWalker {
    path: Vec<Point>,
    next: usize,
}

impl PathWalker {
    pub fn new(path: Vec<Point>) -> Self {
        Self { path, next: 1 }
    }

    /// Moves still to come.
    pub fn remaining(&self) -> usize {
        self.path.len().saturating_sub(self.next)
    }
}

impl<'a> Stepper<Stage<'a>> for PathWalker {
    type Error = Infallible;

    fn proceed(&self, _stage: &Stage<'a>) -> bool {
        self.next < self.path.len()
    }

    fn step(&mut self, stage: &mut Stage<'a>) -> Result<(), Infallible> {
        let p = self.path[self.next];
        self.next += 1;
        *stage.player = p;
        stage.emit(MazeEvent::PlayerMoved(p));
        Ok(())
    }
}
