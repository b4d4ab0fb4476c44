//! Terminal maze demo: generate, solve and print.
//!
//! Run: cargo run --bin maze -- --width 30 --height 12 --algorithm astar
//!      cargo run --bin maze -- --animate --seed 7

use clap::Parser;
use maze_demos::{EventTally, render};
use maze_gen::CarvePolicy;
use maze_paths::Algorithm;
use maze_session::{Finished, MazeConfig, Pacing, Progress, Session};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Generate a perfect maze and solve it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 20)]
    width: i32,

    /// Maze height in cells
    #[arg(long, default_value_t = 10)]
    height: i32,

    /// Search strategy: bfs, dfs or astar
    #[arg(short, long, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,

    /// Seed for a reproducible maze
    #[arg(short, long)]
    seed: Option<u64>,

    /// Shuffle neighbour candidates instead of indexing them
    #[arg(long)]
    shuffled: bool,

    /// Put the target on a random cell
    #[arg(long)]
    random_target: bool,

    /// Redraw while generating and solving, at the default pace
    #[arg(long)]
    animate: bool,
}

type DemoSession = Session<StdRng, EventTally>;

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let policy = if args.shuffled {
        CarvePolicy::Shuffled
    } else {
        CarvePolicy::Uniform
    };
    let pacing = if args.animate {
        Pacing::default()
    } else {
        Pacing::instant()
    };
    let config = MazeConfig::default()
        .with_size(args.width, args.height)
        .with_policy(policy)
        .with_pacing(pacing);
    let mut session: DemoSession =
        Session::new(config, StdRng::seed_from_u64(seed), EventTally::default())?;
    log::info!("seed {seed}");

    if args.random_target {
        session.randomize_target()?;
    } else {
        session.reset()?;
    }
    drive(&mut session, args.animate)?;

    session.solve(args.algorithm)?;
    let outcome = drive(&mut session, args.animate)?;

    println!("{}", frame(&session));
    let tally = session.observer();
    match outcome {
        Some(Finished::Solved(report)) => println!(
            "{}: {} moves, {} cells visited (seed {seed})",
            report.algorithm,
            report.moves().unwrap_or(0),
            report.visited
        ),
        Some(Finished::Unsolvable(report)) => println!(
            "{}: no path after {} cells (seed {seed})",
            report.algorithm, report.visited
        ),
        _ => println!("stopped early (seed {seed})"),
    }
    log::debug!("events: {tally:?}");
    Ok(())
}

fn frame(session: &DemoSession) -> String {
    render(session.grid(), session.position(), session.target())
}

/// Tick the session until idle, redrawing after every chunk when animating.
fn drive(
    session: &mut DemoSession,
    animate: bool,
) -> Result<Option<Finished>, Box<dyn std::error::Error>> {
    if !animate {
        return Ok(session.run_until_idle()?);
    }
    let mut last = None;
    loop {
        match session.tick()? {
            Progress::Idle => return Ok(last),
            Progress::Working => print!("\x1b[H\x1b[2J{}", frame(session)),
            Progress::Waiting(d) => std::thread::sleep(d),
            Progress::Finished(f) => last = Some(f),
        }
    }
}
