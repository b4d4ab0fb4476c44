//! **maze-session**: one interactive maze.
//!
//! A [`Session`] ties the engine together. It generates mazes, runs a
//! chosen pathfinder and replays the found path, all as paced jobs the
//! host advances with [`Session::tick`]. It also moves the player on
//! request. Every change is reported to an [`maze_core::Observer`].
//!
//! ```no_run
//! use maze_paths::Algorithm;
//! use maze_session::{MazeConfig, Session};
//! use rand::SeedableRng;
//!
//! let rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut session = Session::new(MazeConfig::default(), rng, maze_core::NullObserver)?;
//! session.reset()?;
//! session.run_until_idle()?;
//! session.solve(Algorithm::AStar)?;
//! session.run_until_idle()?;
//! assert!(session.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod replay;
mod session;

pub use config::{MazeConfig, Pacing};
pub use replay::{PathMarker, PathWalker, Stage};
pub use session::{Finished, Progress, Session, SolveReport};
