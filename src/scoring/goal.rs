//! Goal tiles: fixed cells scored on how the six surrounding tiles split by
//! color and by pattern.

use crate::game::board::Board;
use crate::game::hex::{CellId, Position};
use crate::game::tile::Tile;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Goal kinds offered to the player at the start of a game.
pub const GOAL_OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// AAA-BBB
    ThreeThree,
    /// AA-BB-CC
    TwoTwoTwo,
    /// Six different values.
    AllUnique,
    /// AAAA-BB
    FourTwo,
    /// AAA-BB-C
    ThreeTwoOne,
    /// AA-BB-C-D
    TwoTwoOneOne,
}

impl GoalKind {
    pub const ALL: [GoalKind; 6] = [
        GoalKind::ThreeThree,
        GoalKind::TwoTwoTwo,
        GoalKind::AllUnique,
        GoalKind::FourTwo,
        GoalKind::ThreeTwoOne,
        GoalKind::TwoTwoOneOne,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GoalKind::ThreeThree => "AAA-BBB",
            GoalKind::TwoTwoTwo => "AA-BB-CC",
            GoalKind::AllUnique => "All Unique",
            GoalKind::FourTwo => "AAAA-BB",
            GoalKind::ThreeTwoOne => "AAA-BB-C",
            GoalKind::TwoTwoOneOne => "AA-BB-C-D",
        }
    }

    /// Required value counts, largest first.
    pub fn signature(self) -> &'static [usize] {
        match self {
            GoalKind::ThreeThree => &[3, 3],
            GoalKind::TwoTwoTwo => &[2, 2, 2],
            GoalKind::AllUnique => &[1, 1, 1, 1, 1, 1],
            GoalKind::FourTwo => &[4, 2],
            GoalKind::ThreeTwoOne => &[3, 2, 1],
            GoalKind::TwoTwoOneOne => &[2, 2, 1, 1],
        }
    }

    pub fn default_points(self) -> GoalPoints {
        let (single, both) = match self {
            GoalKind::ThreeThree => (7, 13),
            GoalKind::TwoTwoTwo => (7, 11),
            GoalKind::AllUnique => (10, 15),
            GoalKind::FourTwo => (8, 14),
            GoalKind::ThreeTwoOne => (7, 11),
            GoalKind::TwoTwoOneOne => (5, 7),
        };
        GoalPoints { single, both }
    }
}

/// Points for meeting one condition (color or pattern) or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPoints {
    pub single: u32,
    pub both: u32,
}

/// Point values per goal kind. Rule revisions disagree on some values, so
/// the table is configuration rather than a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalPointTable(HashMap<GoalKind, GoalPoints>);

impl Default for GoalPointTable {
    fn default() -> Self {
        GoalPointTable(
            GoalKind::ALL
                .iter()
                .map(|&kind| (kind, kind.default_points()))
                .collect(),
        )
    }
}

impl GoalPointTable {
    /// Points for `kind`; kinds missing from a partial table fall back to
    /// their defaults.
    pub fn get(&self, kind: GoalKind) -> GoalPoints {
        self.0
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_points())
    }

    pub fn set(&mut self, kind: GoalKind, points: GoalPoints) {
        self.0.insert(kind, points);
    }
}

/// Counts of each value in `indices` (dense `0..6` indices), largest first,
/// zero counts dropped.
pub fn count_signature<I>(indices: I) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut counts = [0usize; 6];
    for index in indices {
        counts[index] += 1;
    }
    let mut signature: Vec<usize> = counts.into_iter().filter(|&c| c > 0).collect();
    signature.sort_unstable_by(|a, b| b.cmp(a));
    signature
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub kind: GoalKind,
    pub position: Position,
    pub points: GoalPoints,
}

impl Goal {
    pub fn new(kind: GoalKind, position: Position, points: GoalPoints) -> Self {
        Goal {
            kind,
            position,
            points,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn neighbor_ids(&self, board: &Board) -> Vec<CellId> {
        board.topology().surrounding_ids(self.position)
    }

    pub fn neighbor_tiles(&self, board: &Board) -> Vec<Tile> {
        self.neighbor_ids(board)
            .into_iter()
            .filter_map(|id| board.tile_at(id))
            .collect()
    }

    /// `(color condition met, pattern condition met)` once all six
    /// surrounding cells are filled, `None` before that.
    pub fn conditions(&self, board: &Board) -> Option<(bool, bool)> {
        let tiles = self.neighbor_tiles(board);
        if tiles.len() != 6 {
            return None;
        }
        let target = self.kind.signature();
        let colors = count_signature(tiles.iter().map(|t| t.color.index()));
        let patterns = count_signature(tiles.iter().map(|t| t.pattern.index()));
        Some((colors == target, patterns == target))
    }

    pub fn score(&self, board: &Board) -> u32 {
        match self.conditions(board) {
            Some((true, true)) => self.points.both,
            Some((true, false)) | Some((false, true)) => self.points.single,
            _ => 0,
        }
    }
}

/// Draws [`GOAL_OPTION_COUNT`] distinct goal kinds.
pub fn offer_goal_options<R: Rng + ?Sized>(rng: &mut R) -> Vec<GoalKind> {
    let mut kinds = GoalKind::ALL.to_vec();
    kinds.shuffle(rng);
    kinds.truncate(GOAL_OPTION_COUNT);
    kinds
}

/// Every ordered choice of three distinct option indices out of
/// `option_count`; 24 for four options.
pub fn goal_assignments(option_count: usize) -> Vec<[usize; 3]> {
    let mut assignments = Vec::new();
    for a in 0..option_count {
        for b in 0..option_count {
            for c in 0..option_count {
                if a != b && b != c && a != c {
                    assignments.push([a, b, c]);
                }
            }
        }
    }
    assignments
}
