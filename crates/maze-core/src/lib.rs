//! **maze-core**: core types for the grid maze engine.
//!
//! This crate provides the foundational types shared by the other maze
//! crates: geometry primitives, wall directions, cells, the wall-carrying
//! grid, state-change events, error types, and the cooperative step
//! scheduler that paces generation and solving.

pub mod cell;
pub mod direction;
pub mod error;
pub mod events;
pub mod geom;
pub mod grid;
pub mod schedule;

pub use cell::Cell;
pub use direction::{Adjacent, Direction};
pub use error::{ConfigError, MazeError, Operation};
pub use events::{MazeEvent, NullObserver, Observer, Rejection, Scene};
pub use geom::{Bounds, Point};
pub use grid::Grid;
pub use schedule::{CancelToken, Completion, Schedule, Stepper, Task, Tick, WhileLoop};
