//! Hex-grid geometry for the quilt board.
//!
//! Cells are addressed with cube coordinates `(q, r, s)` where `q + r + s == 0`.
//! The playable shape is a radius-3 hexagon plus ten rim cells; the three goal
//! cells are carved out of it. [`BoardTopology`] is computed once per game and
//! shared (behind an `Arc`) by every board copy, scorer and heuristic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Dense index of a playable cell inside a [`BoardTopology`].
pub type CellId = usize;

/// The six unit directions, in neighbor order.
pub const HEX_DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

/// East, north-east and north-west. Opposite directions describe the same lines.
pub const LINE_DIRECTIONS: [(i32, i32, i32); 3] = [(1, 0, -1), (1, -1, 0), (0, -1, 1)];

pub const BOARD_RADIUS: i32 = 3;

/// Rim cells outside the radius-3 hexagon, as `(q, r)`.
const EXTRA_CELLS: [(i32, i32); 10] = [
    (-1, 4),
    (-2, 4),
    (-3, 4),
    (4, -1),
    (4, -2),
    (-4, 3),
    (-4, 2),
    (-4, 1),
    (2, -4),
    (1, -4),
];

/// Fixed goal cells. No tile is ever placed on them.
pub const GOAL_POSITIONS: [Position; 3] = [
    Position::from_cube(-2, 1, 1),
    Position::from_cube(1, -1, 0),
    Position::from_cube(0, 1, -1),
];

/// Line lengths precomputed by [`BoardTopology`].
const CACHED_LINE_LENGTHS: [usize; 3] = [3, 4, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Position {
    /// Builds a position from axial `(q, r)`, deriving `s`.
    pub const fn new(q: i32, r: i32) -> Self {
        Position { q, r, s: -q - r }
    }

    /// Callers must pass a valid cube triple (`q + r + s == 0`).
    pub const fn from_cube(q: i32, r: i32, s: i32) -> Self {
        Position { q, r, s }
    }

    pub fn offset(self, (dq, dr, ds): (i32, i32, i32)) -> Self {
        Position {
            q: self.q + dq,
            r: self.r + dr,
            s: self.s + ds,
        }
    }

    pub fn is_cube_valid(self) -> bool {
        self.q + self.r + self.s == 0
    }

    /// The six surrounding coordinates, whether or not they exist on a board.
    pub fn ring(self) -> [Position; 6] {
        HEX_DIRECTIONS.map(|d| self.offset(d))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// Every coordinate of the board shape before goal cells are removed,
/// in scan order.
pub fn all_grid_positions() -> Vec<Position> {
    let mut positions = Vec::with_capacity(47);
    for q in -BOARD_RADIUS..=BOARD_RADIUS {
        for r in -BOARD_RADIUS..=BOARD_RADIUS {
            let s = -q - r;
            if s.abs() <= BOARD_RADIUS {
                positions.push(Position::from_cube(q, r, s));
            }
        }
    }
    positions.extend(EXTRA_CELLS.iter().map(|&(q, r)| Position::new(q, r)));
    positions
}

/// Immutable board structure: playable cells, adjacency and straight lines.
#[derive(Debug)]
pub struct BoardTopology {
    positions: Vec<Position>,
    index: HashMap<Position, CellId>,
    neighbors: Vec<Vec<CellId>>,
    goal_positions: Vec<Position>,
    lines: BTreeMap<usize, Vec<Vec<CellId>>>,
}

impl BoardTopology {
    /// Standard board with the three fixed goal cells removed.
    pub fn standard() -> Self {
        Self::with_goal_positions(&GOAL_POSITIONS)
    }

    /// Full board shape with no goal cells carved out.
    pub fn without_goals() -> Self {
        Self::with_goal_positions(&[])
    }

    /// Removes `goal_positions` from the playable set, then builds adjacency
    /// and line caches over what remains.
    pub fn with_goal_positions(goal_positions: &[Position]) -> Self {
        let positions: Vec<Position> = all_grid_positions()
            .into_iter()
            .filter(|p| !goal_positions.contains(p))
            .collect();
        let index: HashMap<Position, CellId> = positions
            .iter()
            .enumerate()
            .map(|(id, &p)| (p, id))
            .collect();

        let neighbors = positions
            .iter()
            .map(|p| {
                p.ring()
                    .iter()
                    .filter_map(|n| index.get(n).copied())
                    .collect()
            })
            .collect();

        let mut topology = BoardTopology {
            positions,
            index,
            neighbors,
            goal_positions: goal_positions.to_vec(),
            lines: BTreeMap::new(),
        };
        for length in CACHED_LINE_LENGTHS {
            let lines = topology.enumerate_lines(length);
            topology.lines.insert(length, lines);
        }
        topology
    }

    /// Lines ordered by start cell (scan order), then by direction.
    fn enumerate_lines(&self, length: usize) -> Vec<Vec<CellId>> {
        let mut lines = Vec::new();
        for &start in &self.positions {
            for direction in LINE_DIRECTIONS {
                let mut line = Vec::with_capacity(length);
                let mut cursor = start;
                for _ in 0..length {
                    match self.index.get(&cursor) {
                        Some(&id) => line.push(id),
                        None => break,
                    }
                    cursor = cursor.offset(direction);
                }
                if line.len() == length {
                    lines.push(line);
                }
            }
        }
        lines
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Playable positions in scan order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn position(&self, id: CellId) -> Position {
        self.positions[id]
    }

    pub fn cell_id(&self, pos: Position) -> Option<CellId> {
        self.index.get(&pos).copied()
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn neighbor_ids(&self, id: CellId) -> &[CellId] {
        &self.neighbors[id]
    }

    /// Playable neighbors of `pos`; empty for unknown or goal positions.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        self.cell_id(pos)
            .map(|id| {
                self.neighbors[id]
                    .iter()
                    .map(|&n| self.positions[n])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn goal_positions(&self) -> &[Position] {
        &self.goal_positions
    }

    pub fn is_goal_position(&self, pos: Position) -> bool {
        self.goal_positions.contains(&pos)
    }

    /// Playable cells around an arbitrary coordinate (typically a goal cell,
    /// which has no entry of its own in the adjacency cache).
    pub fn surrounding_ids(&self, center: Position) -> Vec<CellId> {
        center
            .ring()
            .iter()
            .filter_map(|p| self.cell_id(*p))
            .collect()
    }

    /// All straight lines of `length` cells. Only lengths 3 to 5 are cached.
    pub fn lines(&self, length: usize) -> &[Vec<CellId>] {
        self.lines.get(&length).map(Vec::as_slice).unwrap_or(&[])
    }
}
