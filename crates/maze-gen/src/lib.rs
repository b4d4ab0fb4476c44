//! Maze generation: a randomized backtracker that carves a spanning tree
//! into a [`maze_core::Grid`].
//!
//! The [`Backtracker`] is a [`maze_core::Stepper`] over a [`CarveScene`],
//! so it can be paced by a [`maze_core::Task`]; [`generate`] runs it to
//! completion in one call. Randomness comes from any [`RandomSource`],
//! which every `rand` generator already is.

mod backtracker;
mod random;

pub use backtracker::{Backtracker, CarvePolicy, CarveScene, generate, generate_verified};
pub use random::RandomSource;
