//! Player position state machine
//!
//! `InProgress` loops on `Moved`/`Blocked` until the goal is reached, then
//! `Completed` absorbs every further move without changing state.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::maze::{Coord, Maze};
use crate::error::MazeError;

/// Whether the goal has been reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    InProgress,
    Completed,
}

/// Outcome of a single move attempt. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// Stepped through an open passage
    Moved { to: Coord, moves: u32 },
    /// Wall in the way, nothing changed
    Blocked,
    /// Stepped onto the goal
    Completed { moves: u32 },
    /// Late input after the goal was reached, nothing changed
    AlreadyCompleted,
}

impl MoveResult {
    /// Whether the move changed the player's position
    pub fn advanced(&self) -> bool {
        matches!(self, MoveResult::Moved { .. } | MoveResult::Completed { .. })
    }
}

/// Mutable traversal state for one maze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalState {
    pub position: Coord,
    pub move_count: u32,
    pub phase: GamePhase,
    /// Cells the player has stood on, start included
    pub trail: HashSet<Coord>,
}

impl TraversalState {
    pub fn new(start: Coord) -> Self {
        Self {
            position: start,
            move_count: 0,
            phase: GamePhase::InProgress,
            trail: HashSet::from([start]),
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.phase == GamePhase::Completed
    }
}

/// Validates moves against a maze's wall state
#[derive(Debug, Clone)]
pub struct PlayerTraversal {
    maze: Arc<Maze>,
    state: TraversalState,
}

impl PlayerTraversal {
    pub fn new(maze: Arc<Maze>) -> Self {
        let state = TraversalState::new(maze.start());
        Self { maze, state }
    }

    pub fn maze(&self) -> &Arc<Maze> {
        &self.maze
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn position(&self) -> Coord {
        self.state.position
    }

    pub fn move_count(&self) -> u32 {
        self.state.move_count
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Try to step one cell in `direction`
    pub fn attempt_move(&mut self, direction: Direction) -> MoveResult {
        if self.state.is_completed() {
            return MoveResult::AlreadyCompleted;
        }

        let Some(next) = self.maze.passage(self.state.position, direction) else {
            return MoveResult::Blocked;
        };

        self.state.position = next;
        self.state.move_count += 1;
        self.state.trail.insert(next);

        if next == self.maze.goal() {
            self.state.phase = GamePhase::Completed;
            log::info!("Goal reached in {} moves", self.state.move_count);
            MoveResult::Completed {
                moves: self.state.move_count,
            }
        } else {
            MoveResult::Moved {
                to: next,
                moves: self.state.move_count,
            }
        }
    }

    /// Parse a direction name and attempt the move.
    ///
    /// Unknown names are a caller bug and fail without touching state.
    pub fn attempt_move_named(&mut self, direction: &str) -> Result<MoveResult, MazeError> {
        let direction = direction.parse::<Direction>().inspect_err(|e| {
            log::warn!("Rejected move: {}", e);
        })?;
        Ok(self.attempt_move(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2×2 U-shape: (0,0) -> (0,1) -> (1,1) -> (1,0), goal at (1,1)
    fn u_maze() -> Arc<Maze> {
        let mut maze = Maze::walled(2, Coord::new(0, 0), Coord::new(1, 1));
        maze.open_passage(Coord::new(0, 0), Direction::South);
        maze.open_passage(Coord::new(0, 1), Direction::East);
        maze.open_passage(Coord::new(1, 1), Direction::North);
        Arc::new(maze)
    }

    #[test]
    fn test_initial_state() {
        let player = PlayerTraversal::new(u_maze());
        assert_eq!(player.position(), Coord::new(0, 0));
        assert_eq!(player.move_count(), 0);
        assert!(!player.is_completed());
        assert!(player.state().trail.contains(&Coord::new(0, 0)));
    }

    #[test]
    fn test_wall_blocks_without_state_change() {
        let mut player = PlayerTraversal::new(u_maze());
        assert_eq!(player.attempt_move(Direction::East), MoveResult::Blocked);
        assert_eq!(player.attempt_move(Direction::North), MoveResult::Blocked);
        assert_eq!(player.attempt_move(Direction::West), MoveResult::Blocked);
        assert_eq!(player.position(), Coord::new(0, 0));
        assert_eq!(player.move_count(), 0);
    }

    #[test]
    fn test_reaching_goal_completes() {
        let mut player = PlayerTraversal::new(u_maze());
        assert_eq!(
            player.attempt_move(Direction::South),
            MoveResult::Moved {
                to: Coord::new(0, 1),
                moves: 1
            }
        );
        assert_eq!(
            player.attempt_move(Direction::East),
            MoveResult::Completed { moves: 2 }
        );
        assert!(player.is_completed());
        assert_eq!(player.state().trail.len(), 3);
    }

    #[test]
    fn test_completed_is_absorbing() {
        let mut player = PlayerTraversal::new(u_maze());
        player.attempt_move(Direction::South);
        player.attempt_move(Direction::East);

        for dir in Direction::ALL {
            assert_eq!(player.attempt_move(dir), MoveResult::AlreadyCompleted);
        }
        assert_eq!(player.position(), Coord::new(1, 1));
        assert_eq!(player.move_count(), 2);
    }

    #[test]
    fn test_backtracking_counts_moves() {
        let mut player = PlayerTraversal::new(u_maze());
        player.attempt_move(Direction::South);
        player.attempt_move(Direction::North);
        player.attempt_move(Direction::South);
        assert_eq!(player.move_count(), 3);
        assert_eq!(player.position(), Coord::new(0, 1));
        assert_eq!(player.state().trail.len(), 2);
    }

    #[test]
    fn test_invalid_direction_name() {
        let mut player = PlayerTraversal::new(u_maze());
        assert_eq!(
            player.attempt_move_named("up-left"),
            Err(MazeError::InvalidInput("up-left".to_string()))
        );
        assert_eq!(player.position(), Coord::new(0, 0));
        assert_eq!(player.move_count(), 0);

        assert_eq!(
            player.attempt_move_named("down"),
            Ok(MoveResult::Moved {
                to: Coord::new(0, 1),
                moves: 1
            })
        );
    }

    #[test]
    fn test_advanced() {
        assert!(MoveResult::Completed { moves: 1 }.advanced());
        assert!(!MoveResult::Blocked.advanced());
        assert!(!MoveResult::AlreadyCompleted.advanced());
    }
}
