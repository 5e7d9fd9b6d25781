//! Plain-text renderer for terminals and tests
//!
//! ```text
//! +---+---+
//! | @     |
//! +---+   +
//! | G     |
//! +---+---+
//! ```

use std::convert::Infallible;

use super::MazeRenderer;
use crate::sim::{Coord, Direction, Maze, TraversalState};

/// Default interior width of a cell in characters
pub const DEFAULT_CELL_WIDTH: usize = 3;

const PLAYER: char = '@';
const GOAL: char = 'G';
const TRAIL: char = '.';

/// Renders a maze to a `String` frame
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cell_width: usize,
    show_trail: bool,
    frame: String,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AsciiRenderer {
    pub fn new(show_trail: bool) -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            show_trail,
            frame: String::new(),
        }
    }

    /// Last rendered frame
    pub fn frame(&self) -> &str {
        &self.frame
    }
}

impl MazeRenderer for AsciiRenderer {
    type Error = Infallible;

    fn resize(&mut self, cell_size: f32) {
        self.cell_width = (cell_size.round() as usize).max(1);
    }

    fn draw_maze(&mut self, maze: &Maze) -> Result<(), Self::Error> {
        self.frame = render_text(maze, None, false, self.cell_width);
        Ok(())
    }

    fn draw_player(&mut self, maze: &Maze, state: &TraversalState) -> Result<(), Self::Error> {
        self.frame = render_text(maze, Some(state), self.show_trail, self.cell_width);
        Ok(())
    }
}

fn marker(coord: Coord, maze: &Maze, state: Option<&TraversalState>, show_trail: bool) -> char {
    if let Some(state) = state {
        if state.position == coord {
            return PLAYER;
        }
    }
    if maze.goal() == coord {
        return GOAL;
    }
    match state {
        Some(state) if show_trail && state.trail.contains(&coord) => TRAIL,
        _ => ' ',
    }
}

/// Render the maze with an optional player overlay
pub fn render_text(
    maze: &Maze,
    state: Option<&TraversalState>,
    show_trail: bool,
    cell_width: usize,
) -> String {
    let n = maze.dimension();
    let w = cell_width.max(1);
    let wall = "-".repeat(w);
    let open = " ".repeat(w);
    let left_pad = " ".repeat((w - 1) / 2);
    let right_pad = " ".repeat(w - 1 - (w - 1) / 2);

    let mut out = String::new();
    for y in 0..n {
        // North walls
        for x in 0..n {
            out.push('+');
            out.push_str(if maze.is_open(Coord::new(x, y), Direction::North) {
                &open
            } else {
                &wall
            });
        }
        out.push_str("+\n");

        // West walls and contents
        for x in 0..n {
            let coord = Coord::new(x, y);
            out.push(if maze.is_open(coord, Direction::West) { ' ' } else { '|' });
            out.push_str(&left_pad);
            out.push(marker(coord, maze, state, show_trail));
            out.push_str(&right_pad);
        }
        let edge = Coord::new(n - 1, y);
        out.push(if maze.is_open(edge, Direction::East) { ' ' } else { '|' });
        out.push('\n');
    }

    // Bottom border
    for x in 0..n {
        out.push('+');
        out.push_str(if maze.is_open(Coord::new(x, n - 1), Direction::South) {
            &open
        } else {
            &wall
        });
    }
    out.push_str("+\n");
    out
}
