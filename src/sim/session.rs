//! Game session: owns the current maze and its traversal
//!
//! A new game discards the previous maze and traversal wholesale. Every maze
//! is generated from its own seed drawn from the session RNG, so logging the
//! maze seed is enough to reproduce it.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::generator::{GeneratorConfig, MazeGenerator};
use super::maze::{Coord, Maze};
use super::traversal::{MoveResult, PlayerTraversal, TraversalState};
use crate::difficulty::Difficulty;
use crate::error::MazeError;
use crate::input::{KeyAction, action_for_key};
use crate::settings::Settings;

/// Events for the renderer and HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh maze replaced the previous one
    NewMaze { dimension: usize, seed: u64 },
    Moved { to: Coord, moves: u32 },
    Blocked,
    /// Goal reached; `optimal` is the length of the unique start-goal path
    Completed { moves: u32, optimal: u32 },
    /// Input arrived after completion
    Ignored,
}

/// One player's sequence of mazes
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session seed for reproducibility
    seed: u64,
    rng: Pcg32,
    generator: MazeGenerator,
    difficulty: Difficulty,
    /// Seed of the current maze
    maze_seed: u64,
    player: PlayerTraversal,
}

impl GameSession {
    /// Start a session and generate its first maze
    pub fn new(
        seed: u64,
        difficulty: Difficulty,
        config: GeneratorConfig,
    ) -> Result<Self, MazeError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let generator = MazeGenerator::new(config);
        let (maze_seed, maze) = Self::build(&generator, &mut rng, difficulty.dimension())?;

        log::info!(
            "Session seed {}: {} maze (seed {})",
            seed,
            difficulty.as_str(),
            maze_seed
        );

        Ok(Self {
            seed,
            rng,
            generator,
            difficulty,
            maze_seed,
            player: PlayerTraversal::new(Arc::new(maze)),
        })
    }

    /// Start a session from persisted settings; a fixed seed there wins over `fallback_seed`
    pub fn from_settings(settings: &Settings, fallback_seed: u64) -> Result<Self, MazeError> {
        Self::new(
            settings.seed.unwrap_or(fallback_seed),
            settings.difficulty,
            settings.generator_config(),
        )
    }

    fn build(
        generator: &MazeGenerator,
        rng: &mut Pcg32,
        dimension: usize,
    ) -> Result<(u64, Maze), MazeError> {
        let maze_seed: u64 = rng.random();
        let mut maze_rng = Pcg32::seed_from_u64(maze_seed);
        let maze = generator.generate(dimension, &mut maze_rng)?;
        Ok((maze_seed, maze))
    }

    /// Discard the current maze and traversal and generate a new pair
    pub fn new_game(&mut self) -> Result<GameEvent, MazeError> {
        let dimension = self.difficulty.dimension();
        let (maze_seed, maze) = Self::build(&self.generator, &mut self.rng, dimension)?;
        self.maze_seed = maze_seed;
        self.player = PlayerTraversal::new(Arc::new(maze));

        log::info!(
            "New {} maze ({}x{}, seed {})",
            self.difficulty.as_str(),
            dimension,
            dimension,
            maze_seed
        );
        Ok(GameEvent::NewMaze {
            dimension,
            seed: maze_seed,
        })
    }

    /// Select the difficulty used by the next `new_game`
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn maze_seed(&self) -> u64 {
        self.maze_seed
    }

    pub fn maze(&self) -> &Arc<Maze> {
        self.player.maze()
    }

    pub fn player(&self) -> &PlayerTraversal {
        &self.player
    }

    pub fn state(&self) -> &TraversalState {
        self.player.state()
    }

    /// Route one move into the traversal
    pub fn apply_move(&mut self, direction: Direction) -> GameEvent {
        match self.player.attempt_move(direction) {
            MoveResult::Moved { to, moves } => GameEvent::Moved { to, moves },
            MoveResult::Blocked => GameEvent::Blocked,
            MoveResult::Completed { moves } => {
                let optimal = self
                    .maze()
                    .optimal_moves()
                    .map_or(moves, |m| m as u32);
                GameEvent::Completed { moves, optimal }
            }
            MoveResult::AlreadyCompleted => GameEvent::Ignored,
        }
    }

    /// Handle a decoded key action. `Quit` belongs to the front end and yields nothing.
    pub fn handle_action(&mut self, action: KeyAction) -> Result<Option<GameEvent>, MazeError> {
        match action {
            KeyAction::Move(dir) => Ok(Some(self.apply_move(dir))),
            KeyAction::NewGame => self.new_game().map(Some),
            KeyAction::Quit => Ok(None),
        }
    }

    /// Handle a raw key name; unmapped keys yield nothing
    pub fn handle_key(&mut self, key: &str) -> Result<Option<GameEvent>, MazeError> {
        match action_for_key(key) {
            Some(action) => self.handle_action(action),
            None => Ok(None),
        }
    }
}
