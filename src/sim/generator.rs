//! Randomized backtracking maze carver
//!
//! The carver walks depth-first from a fixed corner of its local frame, only
//! ever opening a passage toward an unvisited cell, so the openings form a
//! spanning tree (a perfect maze). The preferred direction order is held for
//! a random number of steps before being reshuffled, which produces long
//! corridors mixed with tight turning clusters.
//!
//! The local frame is mirrored at the end so that the carve origin lands on
//! the randomly chosen start corner.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::maze::{Coord, Maze};
use crate::consts::{DEFAULT_RESHUFFLE_DIVISOR, MIN_DIMENSION};
use crate::error::MazeError;

/// Tuning for the carver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Reshuffle hold is drawn from `0..=dimension / reshuffle_divisor`
    pub reshuffle_divisor: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            reshuffle_divisor: DEFAULT_RESHUFFLE_DIVISOR,
        }
    }
}

impl GeneratorConfig {
    /// Upper bound (inclusive) of the reshuffle hold for a grid size
    pub fn reshuffle_bound(&self, dimension: usize) -> usize {
        dimension / self.reshuffle_divisor.max(1)
    }
}

/// Which diagonal pair of corners holds the start and the goal.
///
/// Named by the start corner; the goal is always the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CornerPairing {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerPairing {
    pub const ALL: [CornerPairing; 4] = [
        CornerPairing::TopLeft,
        CornerPairing::TopRight,
        CornerPairing::BottomLeft,
        CornerPairing::BottomRight,
    ];

    /// Uniform choice among the four pairings
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Whether the start corner sits on the right / bottom edge
    fn mirrored(self) -> (bool, bool) {
        match self {
            CornerPairing::TopLeft => (false, false),
            CornerPairing::TopRight => (true, false),
            CornerPairing::BottomLeft => (false, true),
            CornerPairing::BottomRight => (true, true),
        }
    }

    pub fn start(self, dimension: usize) -> Coord {
        let last = dimension.saturating_sub(1);
        let (right, bottom) = self.mirrored();
        Coord::new(if right { last } else { 0 }, if bottom { last } else { 0 })
    }

    pub fn goal(self, dimension: usize) -> Coord {
        let last = dimension.saturating_sub(1);
        let (right, bottom) = self.mirrored();
        Coord::new(if right { 0 } else { last }, if bottom { 0 } else { last })
    }
}

/// Preferred direction order, reshuffled after being held for a random
/// number of carve steps. A hold of 0 or 1 both mean "reshuffle every step".
#[derive(Debug, Clone)]
struct ReshuffleSchedule {
    order: [Direction; 4],
    bound: usize,
    hold: usize,
    held: usize,
}

impl ReshuffleSchedule {
    fn new(bound: usize) -> Self {
        Self {
            order: Direction::ALL,
            bound,
            hold: 0,
            held: 0,
        }
    }

    /// Advance one carve step; true when the order was reshuffled
    fn step(&mut self, rng: &mut impl Rng) -> bool {
        let reshuffle = self.held >= self.hold;
        if reshuffle {
            self.order.shuffle(rng);
            self.hold = rng.random_range(0..=self.bound);
            self.held = 0;
        }
        self.held += 1;
        reshuffle
    }
}

/// Generation-only bookkeeping, one slot per cell
#[derive(Debug, Clone, Copy, Default)]
struct CarveSlot {
    visited: bool,
    /// Index of the cell we arrived from
    backlink: Option<usize>,
    /// Open sides in the local frame, indexed by `Direction::index`
    open: [bool; 4],
}

/// Builds perfect mazes
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    config: GeneratorConfig,
}

impl MazeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate an N×N maze with a random corner pairing
    pub fn generate(&self, dimension: usize, rng: &mut impl Rng) -> Result<Maze, MazeError> {
        if dimension < MIN_DIMENSION {
            return Err(MazeError::Configuration { dimension });
        }
        let pairing = CornerPairing::random(rng);
        self.generate_with_pairing(dimension, pairing, rng)
    }

    /// Generate an N×N maze with a fixed corner pairing
    pub fn generate_with_pairing(
        &self,
        dimension: usize,
        pairing: CornerPairing,
        rng: &mut impl Rng,
    ) -> Result<Maze, MazeError> {
        if dimension < MIN_DIMENSION {
            return Err(MazeError::Configuration { dimension });
        }

        let slots = self.carve(dimension, rng)?;
        let maze = place(dimension, pairing, &slots);

        log::debug!(
            "Generated {}x{} maze, start {} goal {} ({:?})",
            dimension,
            dimension,
            maze.start(),
            maze.goal(),
            pairing
        );
        Ok(maze)
    }

    /// Depth-first carve in the local frame, origin at (0, 0)
    fn carve(&self, dimension: usize, rng: &mut impl Rng) -> Result<Vec<CarveSlot>, MazeError> {
        let total = dimension * dimension;
        let mut schedule = ReshuffleSchedule::new(self.config.reshuffle_bound(dimension));
        let mut slots = vec![CarveSlot::default(); total];
        let mut pos = 0usize;
        let mut visited = 1usize;
        let mut steps = 0usize;

        while visited < total {
            slots[pos].visited = true;
            steps += 1;

            schedule.step(rng);

            let (x, y) = (pos % dimension, pos / dimension);
            let next = schedule.order.iter().find_map(|&dir| {
                let (dx, dy) = dir.delta();
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                if nx >= dimension || ny >= dimension {
                    return None;
                }
                let idx = ny * dimension + nx;
                (!slots[idx].visited).then_some((dir, idx))
            });

            match next {
                Some((dir, idx)) => {
                    slots[pos].open[dir.index()] = true;
                    slots[idx].open[dir.opposite().index()] = true;
                    slots[idx].backlink = Some(pos);
                    slots[idx].visited = true;
                    pos = idx;
                    visited += 1;
                }
                None => match slots[pos].backlink {
                    Some(prev) => pos = prev,
                    None => return Err(MazeError::GenerationStalled { visited, total }),
                },
            }
        }

        log::debug!("Carved {} cells in {} steps", total, steps);
        Ok(slots)
    }
}

/// Mirror the local carve so its origin lands on the start corner, dropping
/// the scratch fields.
fn place(dimension: usize, pairing: CornerPairing, slots: &[CarveSlot]) -> Maze {
    let (flip_x, flip_y) = pairing.mirrored();
    let last = dimension - 1;
    let mut maze = Maze::walled(dimension, pairing.start(dimension), pairing.goal(dimension));

    for (i, slot) in slots.iter().enumerate() {
        let (x, y) = (i % dimension, i / dimension);
        let at = Coord::new(
            if flip_x { last - x } else { x },
            if flip_y { last - y } else { y },
        );
        // East and south cover every passage exactly once
        for dir in [Direction::East, Direction::South] {
            if !slot.open[dir.index()] {
                continue;
            }
            let mut placed = dir;
            if flip_x {
                placed = placed.flip_x();
            }
            if flip_y {
                placed = placed.flip_y();
            }
            maze.open_passage(at, placed);
        }
    }
    maze
}

/// Generate with the default carver configuration
pub fn generate(dimension: usize, rng: &mut impl Rng) -> Result<Maze, MazeError> {
    MazeGenerator::default().generate(dimension, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rejects_degenerate_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            generate(0, &mut rng),
            Err(MazeError::Configuration { dimension: 0 })
        );
        assert_eq!(
            generate(1, &mut rng),
            Err(MazeError::Configuration { dimension: 1 })
        );
    }

    #[test]
    fn test_two_by_two_has_three_passages() {
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let maze = generate(2, &mut rng).unwrap();
            assert_eq!(maze.passage_count(), 3);
            assert_eq!(maze.reachable_count(maze.start()), 4);
            let moves = maze.optimal_moves().unwrap();
            assert!((1..=3).contains(&moves), "moves={moves}");
        }
    }

    #[test]
    fn test_spanning_tree_for_difficulty_sizes() {
        let mut rng = Pcg32::seed_from_u64(42);
        for n in [10, 15, 25, 38] {
            let maze = generate(n, &mut rng).unwrap();
            assert_eq!(maze.passage_count(), n * n - 1);
            assert_eq!(maze.reachable_count(maze.start()), n * n);
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate(15, &mut Pcg32::seed_from_u64(7)).unwrap();
        let b = generate(15, &mut Pcg32::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pairings_are_diagonal() {
        for pairing in CornerPairing::ALL {
            let start = pairing.start(5);
            let goal = pairing.goal(5);
            assert_ne!(start, goal);
            assert_eq!(start.x + goal.x, 4);
            assert_eq!(start.y + goal.y, 4);
        }
    }

    #[test]
    fn test_fixed_pairing_is_honored() {
        let generator = MazeGenerator::default();
        for pairing in CornerPairing::ALL {
            let mut rng = Pcg32::seed_from_u64(3);
            let maze = generator.generate_with_pairing(6, pairing, &mut rng).unwrap();
            assert_eq!(maze.start(), pairing.start(6));
            assert_eq!(maze.goal(), pairing.goal(6));
            assert_eq!(maze.passage_count(), 35);
            assert_eq!(maze.reachable_count(maze.goal()), 36);
        }
    }

    #[test]
    fn test_mirroring_preserves_shape() {
        // Same RNG stream, different pairing: the carve is identical, only mirrored
        let generator = MazeGenerator::default();
        let base = generator
            .generate_with_pairing(8, CornerPairing::TopLeft, &mut Pcg32::seed_from_u64(11))
            .unwrap();
        let mirrored = generator
            .generate_with_pairing(8, CornerPairing::BottomRight, &mut Pcg32::seed_from_u64(11))
            .unwrap();
        for (coord, cell) in base.cells() {
            let other = mirrored.cell(Coord::new(7 - coord.x, 7 - coord.y)).unwrap();
            assert_eq!(cell.north, other.south);
            assert_eq!(cell.east, other.west);
        }
    }

    #[test]
    fn test_reshuffle_bound() {
        let config = GeneratorConfig::default();
        assert_eq!(config.reshuffle_bound(2), 0);
        assert_eq!(config.reshuffle_bound(10), 1);
        assert_eq!(config.reshuffle_bound(38), 4);

        let zero = GeneratorConfig {
            reshuffle_divisor: 0,
        };
        assert_eq!(zero.reshuffle_bound(10), 10);
    }

    #[test]
    fn test_large_divisor_still_perfect() {
        // Bound 0 reshuffles every step
        let generator = MazeGenerator::new(GeneratorConfig {
            reshuffle_divisor: 1000,
        });
        let maze = generator.generate(12, &mut Pcg32::seed_from_u64(5)).unwrap();
        assert_eq!(maze.passage_count(), 143);
        assert_eq!(maze.reachable_count(maze.start()), 144);
    }

    #[test]
    fn test_reshuffle_hold_length() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut schedule = ReshuffleSchedule::new(4);
        assert!(schedule.step(&mut rng));

        let mut holds = Vec::new();
        let mut run = 1;
        let mut hold = schedule.hold;
        for _ in 0..2000 {
            let order = schedule.order;
            if schedule.step(&mut rng) {
                assert_eq!(run, hold.max(1));
                holds.push(hold);
                hold = schedule.hold;
                run = 1;
            } else {
                assert_eq!(schedule.order, order);
                run += 1;
            }
        }
        assert!(holds.iter().all(|&h| h <= 4));
        assert!(holds.contains(&0));
        assert!(holds.contains(&4));
    }

    #[test]
    fn test_zero_bound_reshuffles_every_step() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut schedule = ReshuffleSchedule::new(0);
        for _ in 0..50 {
            assert!(schedule.step(&mut rng));
        }
    }
}
