//! Error types

use thiserror::Error;

/// Errors surfaced by maze generation and traversal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Grid too small to hold a start and a distinct goal
    #[error("maze dimension must be at least 2, got {dimension}")]
    Configuration { dimension: usize },

    /// Direction name outside the four cardinal directions
    #[error("invalid direction: {0:?}")]
    InvalidInput(String),

    /// Carver backtracked past its origin before visiting every cell
    #[error("generation stalled after visiting {visited} of {total} cells")]
    GenerationStalled { visited: usize, total: usize },
}

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}
