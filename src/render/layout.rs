//! Pixel geometry for a square maze view

use glam::Vec2;

use crate::sim::{Coord, Direction, Maze, TraversalState};

/// Checkered goal flag is FLAG_GRID × FLAG_GRID squares
pub const FLAG_GRID: usize = 4;

/// A wall line between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub from: Vec2,
    pub to: Vec2,
}

/// One square of the goal flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagSquare {
    pub origin: Vec2,
    pub size: f32,
    pub dark: bool,
}

/// Side of the square canvas that fits the view, less a 1% margin
pub fn canvas_side(view_width: f32, view_height: f32) -> f32 {
    let side = view_width.min(view_height);
    side - side / 100.0
}

/// Cell size for a square canvas of `side` pixels
pub fn cell_size(side: f32, dimension: usize) -> f32 {
    side / dimension.max(1) as f32
}

/// Stroke width for walls
#[inline]
pub fn line_width(cell_size: f32) -> f32 {
    cell_size / 50.0
}

/// Top-left corner of a cell
#[inline]
pub fn cell_origin(coord: Coord, cell_size: f32) -> Vec2 {
    Vec2::new(coord.x as f32, coord.y as f32) * cell_size
}

#[inline]
pub fn cell_center(coord: Coord, cell_size: f32) -> Vec2 {
    cell_origin(coord, cell_size) + Vec2::splat(cell_size / 2.0)
}

/// Player disc radius, a little inside the cell
#[inline]
pub fn player_radius(cell_size: f32) -> f32 {
    (cell_size / 2.0 - 2.0).max(1.0)
}

/// Radius of a breadcrumb dot
#[inline]
pub fn trail_radius(cell_size: f32) -> f32 {
    (cell_size / 8.0).max(1.0)
}

/// Segment for one side of a cell
pub fn side_segment(coord: Coord, dir: Direction, cell_size: f32) -> WallSegment {
    let o = cell_origin(coord, cell_size);
    let s = cell_size;
    let (from, to) = match dir {
        Direction::North => (o, o + Vec2::new(s, 0.0)),
        Direction::South => (o + Vec2::new(0.0, s), o + Vec2::new(s, s)),
        Direction::East => (o + Vec2::new(s, 0.0), o + Vec2::new(s, s)),
        Direction::West => (o, o + Vec2::new(0.0, s)),
    };
    WallSegment { from, to }
}

/// Every closed side, shared walls emitted once.
///
/// Each cell contributes its north and west walls; the last row and column
/// also contribute the outer south and east border.
pub fn wall_segments(maze: &Maze, cell_size: f32) -> Vec<WallSegment> {
    let last = maze.dimension().saturating_sub(1);
    let mut segments = Vec::new();
    for (coord, cell) in maze.cells() {
        let mut sides = vec![Direction::North, Direction::West];
        if coord.y == last {
            sides.push(Direction::South);
        }
        if coord.x == last {
            sides.push(Direction::East);
        }
        for dir in sides {
            if !cell.is_open(dir) {
                segments.push(side_segment(coord, dir, cell_size));
            }
        }
    }
    segments
}

/// Visited cells that get a breadcrumb: not the player's cell, not the goal
pub fn trail_cells<'a>(
    maze: &'a Maze,
    state: &'a TraversalState,
) -> impl Iterator<Item = Coord> + 'a {
    state
        .trail
        .iter()
        .copied()
        .filter(move |&c| c != state.position && c != maze.goal())
}

/// Checkered flag squares covering the goal cell
pub fn goal_flag(goal: Coord, cell_size: f32) -> Vec<FlagSquare> {
    let inset = cell_size / 10.0;
    let size = (cell_size - 2.0 * inset) / FLAG_GRID as f32;
    let origin = cell_origin(goal, cell_size) + Vec2::splat(inset);

    let mut squares = Vec::with_capacity(FLAG_GRID * FLAG_GRID);
    for row in 0..FLAG_GRID {
        for col in 0..FLAG_GRID {
            squares.push(FlagSquare {
                origin: origin + Vec2::new(col as f32, row as f32) * size,
                size,
                dark: (row + col) % 2 == 0,
            });
        }
    }
    squares
}
