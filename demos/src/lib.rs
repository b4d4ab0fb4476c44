//! Terminal presentation for the maze demo: an ASCII renderer and an
//! observer that tallies engine events.

use maze_core::{Direction, Grid, MazeEvent, Observer, Point};

/// Draw `grid` with box-drawing in plain ASCII, three columns per cell.
///
/// `@` is the player, `T` the target, `*` a path cell and `.` a visited one.
pub fn render(grid: &Grid, player: Point, target: Point) -> String {
    let bounds = grid.bounds();
    let mut out = String::new();
    for y in 0..bounds.height {
        out.push('+');
        for x in 0..bounds.width {
            let open = grid.is_open(Point::new(x, y), Direction::Top);
            out.push_str(if open { "   +" } else { "---+" });
        }
        out.push('\n');

        out.push('|');
        for x in 0..bounds.width {
            let p = Point::new(x, y);
            out.push(' ');
            out.push(glyph(grid, p, player, target));
            out.push(' ');
            out.push(if grid.is_open(p, Direction::Right) { ' ' } else { '|' });
        }
        out.push('\n');
    }
    out.push('+');
    for _ in 0..bounds.width {
        out.push_str("---+");
    }
    out.push('\n');
    out
}

fn glyph(grid: &Grid, p: Point, player: Point, target: Point) -> char {
    if p == player {
        return '@';
    }
    if p == target {
        return 'T';
    }
    match grid.cell(p) {
        Some(c) if c.on_path => '*',
        Some(c) if c.visited => '.',
        _ => ' ',
    }
}

/// Counts what happened, for the end-of-run summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventTally {
    pub generated: usize,
    pub carved: usize,
    pub visited: usize,
    pub on_path: usize,
    pub moves: usize,
    pub rejected: usize,
    pub solved: bool,
}

impl Observer for EventTally {
    fn notify(&mut self, event: &MazeEvent) {
        match event {
            MazeEvent::CellGenerated { .. } => self.generated += 1,
            MazeEvent::CellCarved { .. } => self.carved += 1,
            MazeEvent::CellVisited(_) => self.visited += 1,
            MazeEvent::CellOnPath(_) => self.on_path += 1,
            MazeEvent::PlayerMoved(_) => self.moves += 1,
            MazeEvent::MoveRejected { .. } => self.rejected += 1,
            MazeEvent::Solved => self.solved = true,
            MazeEvent::MarksCleared => {
                self.visited = 0;
                self.on_path = 0;
            }
            MazeEvent::TargetPlaced(_) => {}
        }
    }
}
