//! Hard Maze - procedurally generated perfect mazes
//!
//! Core modules:
//! - `sim`: Deterministic maze generation and player traversal
//! - `difficulty`: Difficulty labels and grid sizes
//! - `input`: Key name to move mapping
//! - `render`: Renderer sink contract, geometry, text and canvas renderers
//! - `settings`: Persisted preferences

pub mod difficulty;
pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use difficulty::Difficulty;
pub use error::{MazeError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Smallest grid that still has distinct start and goal corners
    pub const MIN_DIMENSION: usize = 2;

    /// Reshuffle hold bound is `dimension / DEFAULT_RESHUFFLE_DIVISOR`
    pub const DEFAULT_RESHUFFLE_DIVISOR: usize = 8;

    /// Grid sizes per difficulty
    pub const EASY_DIMENSION: usize = 10;
    pub const MEDIUM_DIMENSION: usize = 15;
    pub const HARD_DIMENSION: usize = 25;
    pub const EXTREME_DIMENSION: usize = 38;
}
