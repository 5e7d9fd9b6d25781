//! Immutable maze graph
//!
//! A maze is an N×N grid of cells. Each cell carries four open-passage flags
//! (true = passage to that neighbor, false = wall). Passages are always carved
//! in matching pairs, so the flags double as the edges of an undirected graph.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Grid coordinate, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Direction of a single orthogonal step from `self` to `other`
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| {
            let (dx, dy) = dir.delta();
            self.x.checked_add_signed(dx) == Some(other.x)
                && self.y.checked_add_signed(dy) == Some(other.y)
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Open-passage flags for one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Cell {
    #[inline]
    pub fn is_open(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub(crate) fn open(&mut self, dir: Direction) {
        match dir {
            Direction::North => self.north = true,
            Direction::South => self.south = true,
            Direction::East => self.east = true,
            Direction::West => self.west = true,
        }
    }

    /// Number of open sides
    pub fn degree(&self) -> usize {
        Direction::ALL.iter().filter(|d| self.is_open(**d)).count()
    }
}

/// A generated maze: wall state plus start and goal corners
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Maze {
    dimension: usize,
    start: Coord,
    goal: Coord,
    /// Row-major, `y * dimension + x`
    cells: Vec<Cell>,
}

impl Maze {
    /// A fully walled grid, passages are added with `open_passage`
    pub(crate) fn walled(dimension: usize, start: Coord, goal: Coord) -> Self {
        Self {
            dimension,
            start,
            goal,
            cells: vec![Cell::default(); dimension * dimension],
        }
    }

    /// Open the passage from `from` toward `dir` on both sides.
    ///
    /// Returns false (and changes nothing) if the neighbor is off the grid.
    pub(crate) fn open_passage(&mut self, from: Coord, dir: Direction) -> bool {
        let Some(to) = self.neighbor(from, dir) else {
            return false;
        };
        let a = self.index(from);
        let b = self.index(to);
        self.cells[a].open(dir);
        self.cells[b].open(dir.opposite());
        true
    }

    /// Side length N of the N×N grid
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Total number of cells (N²)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.dimension && coord.y < self.dimension
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.y * self.dimension + coord.x
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if self.contains(coord) {
            self.cells.get(self.index(coord))
        } else {
            None
        }
    }

    /// Iterate all cells with their coordinates, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        let n = self.dimension;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i % n, i / n), cell))
    }

    /// Whether a passage leads from `coord` toward `dir`
    pub fn is_open(&self, coord: Coord, dir: Direction) -> bool {
        self.cell(coord).is_some_and(|c| c.is_open(dir))
    }

    /// In-bounds neighbor of `coord` in `dir`, ignoring walls
    pub fn neighbor(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let x = coord.x.checked_add_signed(dx)?;
        let y = coord.y.checked_add_signed(dy)?;
        let next = Coord::new(x, y);
        self.contains(next).then_some(next)
    }

    /// Neighbor reachable from `coord` through an open passage
    pub fn passage(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        if self.is_open(coord, dir) {
            self.neighbor(coord, dir)
        } else {
            None
        }
    }

    /// Number of undirected passages (each counted once)
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| usize::from(c.south) + usize::from(c.east))
            .sum()
    }

    /// The four grid corners: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Coord; 4] {
        let last = self.dimension.saturating_sub(1);
        [
            Coord::new(0, 0),
            Coord::new(last, 0),
            Coord::new(0, last),
            Coord::new(last, last),
        ]
    }

    /// Breadth-first distances from `origin`, `None` for unreachable cells
    pub fn distances_from(&self, origin: Coord) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.cells.len()];
        if !self.contains(origin) {
            return dist;
        }
        let mut queue = VecDeque::new();
        dist[self.index(origin)] = Some(0);
        queue.push_back(origin);

        while let Some(pos) = queue.pop_front() {
            let base = dist[self.index(pos)].unwrap_or(0);
            for dir in Direction::ALL {
                if let Some(next) = self.passage(pos, dir) {
                    let idx = self.index(next);
                    if dist[idx].is_none() {
                        dist[idx] = Some(base + 1);
                        queue.push_back(next);
                    }
                }
            }
        }
        dist
    }

    /// Number of cells reachable from `origin` (including itself)
    pub fn reachable_count(&self, origin: Coord) -> usize {
        self.distances_from(origin)
            .iter()
            .filter(|d| d.is_some())
            .count()
    }

    /// The path from start to goal, both ends included.
    ///
    /// In a perfect maze this path is unique. Empty if the goal is unreachable.
    pub fn solve(&self) -> Vec<Coord> {
        let dist = self.distances_from(self.start);
        let Some(mut remaining) = dist.get(self.index(self.goal)).copied().flatten() else {
            return Vec::new();
        };

        // Walk back from the goal along strictly decreasing distances
        let mut path = Vec::with_capacity(remaining + 1);
        let mut pos = self.goal;
        path.push(pos);
        while remaining > 0 {
            let prev = Direction::ALL
                .iter()
                .filter_map(|d| self.passage(pos, *d))
                .find(|n| dist[self.index(*n)] == Some(remaining - 1));
            match prev {
                Some(p) => {
                    pos = p;
                    path.push(pos);
                    remaining -= 1;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }

    /// Moves needed to walk from start to goal
    pub fn optimal_moves(&self) -> Option<usize> {
        let path = self.solve();
        (!path.is_empty()).then(|| path.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3×3 serpentine: (0,0)->(1,0)->(2,0)->(2,1)->(1,1)->(0,1)->(0,2)->(1,2)->(2,2)
    fn serpentine() -> Maze {
        let mut maze = Maze::walled(3, Coord::new(0, 0), Coord::new(2, 2));
        maze.open_passage(Coord::new(0, 0), Direction::East);
        maze.open_passage(Coord::new(1, 0), Direction::East);
        maze.open_passage(Coord::new(2, 0), Direction::South);
        maze.open_passage(Coord::new(2, 1), Direction::West);
        maze.open_passage(Coord::new(1, 1), Direction::West);
        maze.open_passage(Coord::new(0, 1), Direction::South);
        maze.open_passage(Coord::new(0, 2), Direction::East);
        maze.open_passage(Coord::new(1, 2), Direction::East);
        maze
    }

    #[test]
    fn test_open_passage_is_symmetric() {
        let maze = serpentine();
        assert!(maze.is_open(Coord::new(0, 0), Direction::East));
        assert!(maze.is_open(Coord::new(1, 0), Direction::West));
        assert!(!maze.is_open(Coord::new(0, 0), Direction::South));
        assert!(!maze.is_open(Coord::new(0, 1), Direction::North));
    }

    #[test]
    fn test_open_passage_off_grid_is_rejected() {
        let mut maze = Maze::walled(2, Coord::new(0, 0), Coord::new(1, 1));
        assert!(!maze.open_passage(Coord::new(0, 0), Direction::North));
        assert!(!maze.open_passage(Coord::new(1, 1), Direction::East));
        assert_eq!(maze.passage_count(), 0);
    }

    #[test]
    fn test_neighbor_bounds() {
        let maze = serpentine();
        assert_eq!(maze.neighbor(Coord::new(0, 0), Direction::West), None);
        assert_eq!(maze.neighbor(Coord::new(0, 0), Direction::North), None);
        assert_eq!(
            maze.neighbor(Coord::new(0, 0), Direction::South),
            Some(Coord::new(0, 1))
        );
        assert_eq!(maze.neighbor(Coord::new(2, 2), Direction::East), None);
    }

    #[test]
    fn test_passage_count_and_reachability() {
        let maze = serpentine();
        assert_eq!(maze.passage_count(), 8);
        assert_eq!(maze.reachable_count(maze.start()), 9);
    }

    #[test]
    fn test_solve_serpentine() {
        let maze = serpentine();
        let path = maze.solve();
        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.goal()));
        assert_eq!(maze.optimal_moves(), Some(8));
    }

    #[test]
    fn test_solve_unreachable_goal() {
        let maze = Maze::walled(2, Coord::new(0, 0), Coord::new(1, 1));
        assert!(maze.solve().is_empty());
        assert_eq!(maze.optimal_moves(), None);
    }

    #[test]
    fn test_cells_iterate_row_major() {
        let maze = serpentine();
        let coords: Vec<Coord> = maze.cells().map(|(c, _)| c).collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[1], Coord::new(1, 0));
        assert_eq!(coords[3], Coord::new(0, 1));
        assert_eq!(coords.len(), 9);
    }

    #[test]
    fn test_direction_to() {
        let c = Coord::new(1, 1);
        assert_eq!(c.direction_to(Coord::new(1, 0)), Some(Direction::North));
        assert_eq!(c.direction_to(Coord::new(2, 1)), Some(Direction::East));
        assert_eq!(c.direction_to(Coord::new(2, 2)), None);
        assert_eq!(c.direction_to(c), None);
    }

    #[test]
    fn test_corners() {
        let maze = serpentine();
        assert_eq!(
            maze.corners(),
            [
                Coord::new(0, 0),
                Coord::new(2, 0),
                Coord::new(0, 2),
                Coord::new(2, 2)
            ]
        );
    }
}
