//! Difficulty selection
//!
//! Each label maps to the side length of the square grid.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    /// Parse a label or the numeric grid size a select box submits
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "10" => Some(Difficulty::Easy),
            "medium" | "med" | "15" => Some(Difficulty::Medium),
            "hard" | "25" => Some(Difficulty::Hard),
            "extreme" | "38" => Some(Difficulty::Extreme),
            _ => None,
        }
    }

    /// Side length N of the N×N grid
    pub fn dimension(&self) -> usize {
        match self {
            Difficulty::Easy => EASY_DIMENSION,
            Difficulty::Medium => MEDIUM_DIMENSION,
            Difficulty::Hard => HARD_DIMENSION,
            Difficulty::Extreme => EXTREME_DIMENSION,
        }
    }

    /// Resolve an optional selector, falling back to the default when unset or unknown
    pub fn resolve(selector: Option<&str>) -> Self {
        match selector {
            Some(s) => Self::from_str(s).unwrap_or_else(|| {
                log::warn!("Unknown difficulty {:?}, using {}", s, Self::default().as_str());
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Grid dimension for an optional selector
    pub fn dimension_for(selector: Option<&str>) -> usize {
        Self::resolve(selector).dimension()
    }
}
