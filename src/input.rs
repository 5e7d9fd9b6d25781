//! Keyboard input mapping
//!
//! Key names follow `KeyboardEvent.key` (`"ArrowUp"`, `"w"`, ...). The native
//! front end feeds single characters through the same table.

use crate::sim::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    NewGame,
    Quit,
}

/// Arrow keys and WASD, letters case-insensitive
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => return Some(Direction::North),
        "ArrowDown" => return Some(Direction::South),
        "ArrowLeft" => return Some(Direction::West),
        "ArrowRight" => return Some(Direction::East),
        _ => {}
    }
    match key.to_ascii_lowercase().as_str() {
        "w" => Some(Direction::North),
        "s" => Some(Direction::South),
        "a" => Some(Direction::West),
        "d" => Some(Direction::East),
        _ => None,
    }
}

/// Full key table, `None` for keys the game ignores
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    if let Some(dir) = direction_for_key(key) {
        return Some(KeyAction::Move(dir));
    }
    match key {
        "n" | "N" => Some(KeyAction::NewGame),
        "q" | "Q" | "Escape" => Some(KeyAction::Quit),
        _ => None,
    }
}
