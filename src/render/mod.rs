//! Rendering module
//!
//! The core never draws. Front ends own a `MazeRenderer` and call it after
//! every `GameEvent`. Geometry lives in `layout` so every renderer agrees on
//! where walls, flag and player go.

pub mod ascii;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod layout;

pub use ascii::AsciiRenderer;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use layout::{FlagSquare, WallSegment};

use crate::sim::{Maze, TraversalState};

/// Renderer sink
pub trait MazeRenderer {
    type Error;

    /// New cell size in pixels (or characters) after a viewport change
    fn resize(&mut self, cell_size: f32);

    /// Draw the grid: walls wherever a passage flag is false, plus the goal flag
    fn draw_maze(&mut self, maze: &Maze) -> Result<(), Self::Error>;

    /// Draw the player marker (and breadcrumbs) for the current state
    fn draw_player(&mut self, maze: &Maze, state: &TraversalState) -> Result<(), Self::Error>;

    /// Full redraw
    fn redraw(&mut self, maze: &Maze, state: &TraversalState) -> Result<(), Self::Error> {
        self.draw_maze(maze)?;
        self.draw_player(maze, state)
    }
}
