//! Cardinal directions on the maze grid
//!
//! North is toward row 0 (screen up), east is toward the last column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in canonical order (the carver's initial preference)
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The direction pointing back the way we came
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Grid offset (dx, dy)
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Index into per-cell opening arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Mirror across the vertical axis (east <-> west)
    pub(crate) fn flip_x(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            other => other,
        }
    }

    /// Mirror across the horizontal axis (north <-> south)
    pub(crate) fn flip_y(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            other => other,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    /// Accepts compass names, their initials, and screen-relative names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" | "up" => Ok(Direction::North),
            "south" | "s" | "down" => Ok(Direction::South),
            "east" | "e" | "right" => Ok(Direction::East),
            "west" | "w" | "left" => Ok(Direction::West),
            _ => Err(MazeError::InvalidInput(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
        }
    }

    #[test]
    fn test_delta_cancels_with_opposite() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("North".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("s".parse::<Direction>(), Ok(Direction::South));
        assert_eq!(" RIGHT ".parse::<Direction>(), Ok(Direction::East));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::West));
    }

    #[test]
    fn test_parse_rejects_diagonal() {
        assert_eq!(
            "up-left".parse::<Direction>(),
            Err(MazeError::InvalidInput("up-left".to_string()))
        );
    }

    #[test]
    fn test_indices_are_distinct() {
        let mut seen = [false; 4];
        for dir in Direction::ALL {
            assert!(!seen[dir.index()]);
            seen[dir.index()] = true;
        }
    }
}
