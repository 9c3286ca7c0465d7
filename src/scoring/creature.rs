//! Cats: pattern-bound scorers that reward clusters or straight lines.

use crate::game::board::Board;
use crate::game::hex::CellId;
use crate::game::tile::{Pattern, Tile};
use crate::scoring::groups::GroupSearch;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    Millie,
    Leo,
    Rumi,
}

/// What a creature looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupShape {
    /// Connected cells of one pattern.
    Cluster(usize),
    /// Cells of one pattern along one hex axis.
    Line(usize),
}

impl GroupShape {
    pub fn size(self) -> usize {
        match self {
            GroupShape::Cluster(n) | GroupShape::Line(n) => n,
        }
    }
}

impl CreatureKind {
    pub const ALL: [CreatureKind; 3] = [CreatureKind::Millie, CreatureKind::Leo, CreatureKind::Rumi];

    pub fn name(self) -> &'static str {
        match self {
            CreatureKind::Millie => "Millie",
            CreatureKind::Leo => "Leo",
            CreatureKind::Rumi => "Rumi",
        }
    }

    /// Points awarded per scoring group.
    pub fn points(self) -> u32 {
        match self {
            CreatureKind::Millie => 3,
            CreatureKind::Leo => 11,
            CreatureKind::Rumi => 5,
        }
    }

    pub fn shape(self) -> GroupShape {
        match self {
            CreatureKind::Millie => GroupShape::Cluster(3),
            CreatureKind::Leo => GroupShape::Line(5),
            CreatureKind::Rumi => GroupShape::Line(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub kind: CreatureKind,
    pub patterns: [Pattern; 2],
}

impl Creature {
    pub fn new(kind: CreatureKind, patterns: [Pattern; 2]) -> Self {
        Creature { kind, patterns }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn accepts(&self, pattern: Pattern) -> bool {
        self.patterns.contains(&pattern)
    }

    /// Scoring groups on `board`. Each accepted pattern is searched on its
    /// own, first pattern first; claims never carry over between patterns.
    pub fn find_groups(&self, board: &Board) -> Vec<Vec<CellId>> {
        let mut groups = Vec::new();
        for pattern in self.patterns {
            let search = GroupSearch::new(board, move |tile: Tile| tile.pattern == pattern);
            groups.extend(match self.kind.shape() {
                GroupShape::Cluster(size) => search.clusters(size),
                GroupShape::Line(length) => search.lines(length),
            });
        }
        groups
    }

    pub fn score(&self, board: &Board) -> u32 {
        self.find_groups(board).len() as u32 * self.points()
    }
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} pts, {}/{})",
            self.name(),
            self.points(),
            self.patterns[0].name(),
            self.patterns[1].name()
        )
    }
}

/// One creature of every kind, each bound to two patterns drawn from a
/// shuffled pattern list so that no pattern is shared.
pub fn assign_creatures<R: Rng + ?Sized>(rng: &mut R) -> Vec<Creature> {
    let mut patterns = Pattern::ALL;
    patterns.shuffle(rng);
    CreatureKind::ALL
        .iter()
        .zip(patterns.chunks_exact(2))
        .map(|(&kind, pair)| Creature::new(kind, [pair[0], pair[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::hex::{BoardTopology, Position};
    use crate::game::tile::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn empty_board() -> Board {
        Board::new(Arc::new(BoardTopology::standard()))
    }

    fn place_row(board: &mut Board, qs: std::ops::RangeInclusive<i32>, tile: Tile) {
        for q in qs {
            assert!(board.place(Position::new(q, 0), tile));
        }
    }

    #[test]
    fn test_assign_creatures_uses_disjoint_patterns() {
        let mut rng = StdRng::seed_from_u64(11);
        let creatures = assign_creatures(&mut rng);
        assert_eq!(creatures.len(), 3);
        let patterns: HashSet<Pattern> = creatures.iter().flat_map(|c| c.patterns).collect();
        assert_eq!(patterns.len(), 6);
    }

    #[test]
    fn test_leo_five_line_scores_once() {
        let leo = Creature::new(CreatureKind::Leo, [Pattern::Dots, Pattern::Leaves]);
        let tile = Tile::new(Color::Pink, Pattern::Dots);
        let mut board = empty_board();
        place_row(&mut board, -3..=1, tile);
        assert_eq!(leo.score(&board), 11);

        assert!(board.place(Position::new(2, 0), tile));
        assert_eq!(leo.score(&board), 11);
    }

    #[test]
    fn test_leo_ignores_other_patterns() {
        let leo = Creature::new(CreatureKind::Leo, [Pattern::Dots, Pattern::Leaves]);
        let mut board = empty_board();
        place_row(&mut board, -3..=1, Tile::new(Color::Pink, Pattern::Swirls));
        assert_eq!(leo.score(&board), 0);
    }

    #[test]
    fn test_rumi_and_millie_on_same_row() {
        let tile = Tile::new(Color::Teal, Pattern::Clubs);
        let mut board = empty_board();
        place_row(&mut board, -3..=-1, tile);

        let rumi = Creature::new(CreatureKind::Rumi, [Pattern::Clubs, Pattern::Dots]);
        let millie = Creature::new(CreatureKind::Millie, [Pattern::Flowers, Pattern::Clubs]);
        assert_eq!(rumi.score(&board), 5);
        assert_eq!(millie.score(&board), 3);
    }

    #[test]
    fn test_groups_never_share_cells() {
        let tile = Tile::new(Color::Teal, Pattern::Clubs);
        let mut board = empty_board();
        for &pos in BoardTopology::standard().positions() {
            board.place(pos, tile);
        }
        let millie = Creature::new(CreatureKind::Millie, [Pattern::Clubs, Pattern::Dots]);
        let groups = millie.find_groups(&board);
        assert!(!groups.is_empty());
        let mut seen = HashSet::new();
        for group in &groups {
            for id in group {
                assert!(seen.insert(*id));
            }
        }
    }
}
