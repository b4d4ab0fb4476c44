//! State-change notifications: [`MazeEvent`] and the [`Observer`] sink.
//!
//! The engine never draws anything. Every visible change is reported as an
//! event, synchronously, at the moment it happens; an observer decides how
//! (or whether) to render it.

use std::sync::mpsc::Sender;

use crate::direction::Direction;
use crate::geom::Point;
use crate::grid::Grid;

// ---------------------------------------------------------------------------
// MazeEvent
// ---------------------------------------------------------------------------

/// Why a player move was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// No cell in that direction.
    OutOfBounds,
    /// The cell exists but the wall is standing.
    WallBlocked,
}

/// A single state change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeEvent {
    /// The target cell was (re)placed, typically on reset.
    TargetPlaced(Point),
    /// The generator reached `pos` for the first time.
    CellGenerated { pos: Point, order: usize },
    /// The wall on side `direction` of `pos` was carved. The matching wall
    /// of the neighbour is opened in the same operation.
    CellCarved { pos: Point, direction: Direction },
    /// A search finalized `pos`.
    CellVisited(Point),
    /// `pos` belongs to the found path.
    CellOnPath(Point),
    /// Visited and path annotations were cleared.
    MarksCleared,
    /// The player cursor moved to `pos`.
    PlayerMoved(Point),
    /// A player move was refused. Transient; nothing changed.
    MoveRejected {
        from: Point,
        direction: Direction,
        reason: Rejection,
    },
    /// The player reached the target.
    Solved,
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// A sink for [`MazeEvent`]s.
pub trait Observer {
    fn notify(&mut self, event: &MazeEvent);
}

/// Discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    #[inline]
    fn notify(&mut self, _event: &MazeEvent) {}
}

/// Records events in order.
impl Observer for Vec<MazeEvent> {
    fn notify(&mut self, event: &MazeEvent) {
        self.push(event.clone());
    }
}

/// Publishes events on a channel. A disconnected receiver is ignored: the
/// engine keeps running without a presentation layer.
impl Observer for Sender<MazeEvent> {
    fn notify(&mut self, event: &MazeEvent) {
        let _ = self.send(event.clone());
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    #[inline]
    fn notify(&mut self, event: &MazeEvent) {
        (**self).notify(event);
    }
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    #[inline]
    fn notify(&mut self, event: &MazeEvent) {
        (**self).notify(event);
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The mutable state a generator or search step works on.
pub struct Scene<'a> {
    pub grid: &'a mut Grid,
    pub observer: &'a mut dyn Observer,
}

impl<'a> Scene<'a> {
    /// Bundle a grid with the observer that should hear about its changes.
    pub fn new(grid: &'a mut Grid, observer: &'a mut dyn Observer) -> Self {
        Self { grid, observer }
    }

    /// Forward an event to the observer.
    #[inline]
    pub fn emit(&mut self, event: MazeEvent) {
        self.observer.notify(&event);
    }
}
