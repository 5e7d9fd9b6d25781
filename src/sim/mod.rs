//! Deterministic maze module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `Rng`
//! - Generation runs to completion before any move is accepted
//! - No rendering or platform dependencies

pub mod direction;
pub mod generator;
pub mod maze;
pub mod session;
pub mod traversal;

pub use direction::Direction;
pub use generator::{CornerPairing, GeneratorConfig, MazeGenerator, generate};
pub use maze::{Cell, Coord, Maze};
pub use session::{GameEvent, GameSession};
pub use traversal::{GamePhase, MoveResult, PlayerTraversal, TraversalState};
