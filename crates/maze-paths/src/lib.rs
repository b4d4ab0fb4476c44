//! Graph search over carved maze grids.
//!
//! This crate provides the pathfinders that run on a [`maze_core::Grid`]:
//!
//! - **BFS** ([`Bfs`]): fewest moves, frontier in discovery order
//! - **DFS** ([`Dfs`]): some path, frontier as a stack
//! - **A\*** ([`AStar`]): fewest moves, frontier as a [`PriorityQueue`] on
//!   `f = g + h` with the [`manhattan`] heuristic
//!
//! All three are a [`GraphSearch`] over a different [`Frontier`]. A search
//! is resumable one expansion at a time, so it can be paced by a
//! [`maze_core::Task`]; [`solve`] runs one to completion.
//!
//! Connectivity helpers ([`reachable`], [`is_connected`], [`is_perfect`])
//! and a unit-cost [`distance_map`] are provided for verification.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, connectivity |
//! | [`WeightedPather`] : [`Pather`] | path cost `g` |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod cc;
mod dfs;
mod distance;
mod pqueue;
mod search;
mod solver;
mod traits;

pub use astar::{AStar, BestFirst};
pub use bfs::{Bfs, Fifo, UNREACHABLE, distance_map};
pub use cc::{is_connected, is_perfect, reachable};
pub use dfs::{Dfs, Lifo};
pub use distance::manhattan;
pub use pqueue::PriorityQueue;
pub use search::{Frontier, GraphSearch, SearchNode, SearchOutcome};
pub use solver::{Algorithm, Solver, UnknownAlgorithm, solve};
pub use traits::{AstarPather, Pather, WeightedPather};
