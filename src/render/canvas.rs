//! Canvas 2D renderer (WASM only)

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::MazeRenderer;
use super::layout::{
    cell_center, cell_origin, goal_flag, line_width, player_radius, trail_cells, trail_radius,
    wall_segments,
};
use crate::sim::{Coord, Maze, TraversalState};

const WALL_COLOR: &str = "#ffffff";
const PLAYER_COLOR: &str = "yellow";
const TRAIL_COLOR: &str = "rgba(255, 255, 0, 0.25)";
const FLAG_DARK: &str = "rgba(0, 0, 0, 0.8)";
const FLAG_LIGHT: &str = "rgba(255, 255, 255, 0.8)";

/// Draws onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    cell_size: f32,
    show_trail: bool,
    /// Where the player marker was last drawn, cleared before the next draw
    last_player: Option<Coord>,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, cell_size: f32, show_trail: bool) -> Self {
        Self {
            ctx,
            cell_size,
            show_trail,
            last_player: None,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Clear a cell's interior without touching its walls
    fn clear_cell(&self, coord: Coord) {
        let size = self.cell_size as f64;
        let inset = size / 25.0;
        let o = cell_origin(coord, self.cell_size);
        self.ctx.clear_rect(
            o.x as f64 + inset,
            o.y as f64 + inset,
            size - 2.0 * inset,
            size - 2.0 * inset,
        );
    }

    fn fill_disc(&self, coord: Coord, radius: f32, color: &str) -> Result<(), JsValue> {
        let c = cell_center(coord, self.cell_size);
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.arc(c.x as f64, c.y as f64, radius as f64, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }
}

impl MazeRenderer for CanvasRenderer {
    type Error = JsValue;

    fn resize(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
        self.last_player = None;
    }

    fn draw_maze(&mut self, maze: &Maze) -> Result<(), Self::Error> {
        let side = (self.cell_size * maze.dimension() as f32) as f64;
        self.ctx.clear_rect(0.0, 0.0, side + 1.0, side + 1.0);
        self.last_player = None;

        self.ctx.set_stroke_style_str(WALL_COLOR);
        self.ctx.set_line_width(line_width(self.cell_size).max(1.0) as f64);
        self.ctx.begin_path();
        for seg in wall_segments(maze, self.cell_size) {
            self.ctx.move_to(seg.from.x as f64, seg.from.y as f64);
            self.ctx.line_to(seg.to.x as f64, seg.to.y as f64);
        }
        self.ctx.stroke();

        for square in goal_flag(maze.goal(), self.cell_size) {
            let color = if square.dark { FLAG_DARK } else { FLAG_LIGHT };
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                square.origin.x as f64,
                square.origin.y as f64,
                square.size as f64,
                square.size as f64,
            );
        }
        Ok(())
    }

    fn draw_player(&mut self, maze: &Maze, state: &TraversalState) -> Result<(), Self::Error> {
        if let Some(prev) = self.last_player.take() {
            self.clear_cell(prev);
            if prev == maze.goal() {
                // Flag lives inside the cell, redraw it
                self.draw_maze(maze)?;
            }
        }

        if self.show_trail {
            // Translucent discs, so each cell is cleared before it is painted again
            for coord in trail_cells(maze, state) {
                self.clear_cell(coord);
                self.fill_disc(coord, trail_radius(self.cell_size), TRAIL_COLOR)?;
            }
        }

        self.fill_disc(state.position, player_radius(self.cell_size), PLAYER_COLOR)?;
        self.last_player = Some(state.position);
        Ok(())
    }
}
