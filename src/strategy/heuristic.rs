//! Partial-credit evaluation of unfinished boards.
//!
//! The estimate is the exact current score plus credit for patterns that can
//! still complete. Every potential term needs at least one empty cell to
//! exist, so on a full board the estimate equals the real score whatever
//! the category weights.

use crate::game::board::Board;
use crate::game::game_state::GameState;
use crate::game::hex::CellId;
use crate::game::tile::{Color, Pattern};
use crate::scoring::button::button_breakdown;
use crate::scoring::creature::{Creature, GroupShape};
use crate::scoring::goal::{count_signature, Goal};
use serde::{Deserialize, Serialize};

/// Goals are the reference category; creature and button weights are
/// expressed relative to it.
pub const GOAL_WEIGHT: f64 = 1.0;

/// Share of a cluster creature's points credited for an extendable pair.
const CLUSTER_PAIR_CREDIT: f64 = 0.3;
/// Points credited per isolated same-color pair.
const BUTTON_PAIR_CREDIT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub cat_weight: f64,
    pub button_weight: f64,
    /// Discount on unfinished goal potential.
    pub goal_discount: f64,
    /// Rainbow credit once five or six colors show button progress.
    pub rainbow_progress_bonus: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            cat_weight: 1.0,
            button_weight: 1.0,
            goal_discount: 0.4,
            rainbow_progress_bonus: 1.5,
        }
    }
}

impl HeuristicConfig {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("cat_weight", self.cat_weight),
            ("button_weight", self.button_weight),
            ("goal_discount", self.goal_discount),
            ("rainbow_progress_bonus", self.rainbow_progress_bonus),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// `(credit, overlap decay)` for a partial line holding `count` matching tiles.
fn line_credit(length: usize, count: usize) -> Option<(f64, f64)> {
    match (length, count) {
        (5, 4) => Some((0.5, 0.7)),
        (5, 3) => Some((0.3, 0.4)),
        (5, 2) => Some((0.15, 0.2)),
        (3, 2) => Some((0.3, 0.3)),
        _ => None,
    }
}

/// Progress in `[0, 1]` of a partial value count towards `target`
/// (both largest first). Zero once the target can no longer be reached.
pub fn signature_progress(counts: &[usize], target: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    if counts == target {
        return 1.0;
    }
    if counts.len() > target.len() || counts.iter().zip(target).any(|(c, t)| c > t) {
        return 0.0;
    }
    let placed: usize = counts.iter().sum();
    if placed >= target.iter().sum::<usize>() {
        return 0.0;
    }
    let slots = counts.len() as f64 / target.len() as f64;
    let fill = placed as f64 / 6.0;
    0.5 * slots + 0.5 * fill
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    config: HeuristicConfig,
}

impl HeuristicEvaluator {
    pub fn new(config: HeuristicConfig) -> Self {
        HeuristicEvaluator { config }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    pub fn evaluate(&self, state: &GameState) -> f64 {
        self.evaluate_board(state.board(), state.creatures(), state.goals())
    }

    /// Points already earned plus weighted potential. Weights only scale the
    /// potential, so a full board evaluates to its exact score.
    pub fn evaluate_board(&self, board: &Board, creatures: &[Creature], goals: &[Goal]) -> f64 {
        let creature_score: u32 = creatures.iter().map(|c| c.score(board)).sum();
        let creature_potential: f64 = creatures
            .iter()
            .map(|c| self.creature_potential(board, c))
            .sum();
        let goal_value: f64 = goals.iter().map(|g| self.goal_value(board, g)).sum();
        let button_score = button_breakdown(board).total();

        f64::from(creature_score)
            + self.config.cat_weight * creature_potential
            + GOAL_WEIGHT * goal_value
            + f64::from(button_score)
            + self.config.button_weight * self.button_potential(board)
    }

    // ------------------------------------------------------------------
    // Creatures
    // ------------------------------------------------------------------

    pub fn creature_potential(&self, board: &Board, creature: &Creature) -> f64 {
        let points = creature.points() as f64;
        creature
            .patterns
            .iter()
            .map(|&pattern| match creature.kind.shape() {
                GroupShape::Cluster(_) => cluster_pair_potential(board, pattern, points),
                GroupShape::Line(length) => line_potential(board, pattern, length, points),
            })
            .sum()
    }

    // ------------------------------------------------------------------
    // Goals
    // ------------------------------------------------------------------

    pub fn goal_value(&self, board: &Board, goal: &Goal) -> f64 {
        match goal.score(board) {
            0 => self.goal_potential(board, goal),
            actual => actual as f64,
        }
    }

    /// Best of "one track completes" and "both tracks complete", scaled by
    /// how many neighbors are filled.
    pub fn goal_potential(&self, board: &Board, goal: &Goal) -> f64 {
        let tiles = goal.neighbor_tiles(board);
        if tiles.is_empty() {
            return 0.0;
        }
        let target = goal.kind.signature();
        let color = signature_progress(
            &count_signature(tiles.iter().map(|t| t.color.index())),
            target,
        );
        let pattern = signature_progress(
            &count_signature(tiles.iter().map(|t| t.pattern.index())),
            target,
        );
        let single = goal.points.single as f64 * color.max(pattern);
        let both = goal.points.both as f64 * color.min(pattern);
        let completion = tiles.len() as f64 / 6.0;
        single.max(both) * completion * self.config.goal_discount
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// Credit for isolated same-color pairs and for approaching the rainbow
    /// bonus. Zero on a full board.
    pub fn button_potential(&self, board: &Board) -> f64 {
        let breakdown = button_breakdown(board);
        let pairs: Vec<usize> = Color::ALL
            .iter()
            .map(|&color| isolated_color_pairs(board, color))
            .collect();
        let pair_potential = pairs.iter().sum::<usize>() as f64 * BUTTON_PAIR_CREDIT;

        let with_buttons = breakdown.colors_with_buttons();
        let mut rainbow = 0.0;
        if with_buttons < Color::ALL.len() && !board.is_full() {
            rainbow = match with_buttons {
                5 => 4.5,
                4 => 3.5,
                3 => 2.0,
                _ => 0.0,
            };
            let with_potential = with_buttons
                + Color::ALL
                    .iter()
                    .filter(|&&c| breakdown.count(c) == 0 && pairs[c.index()] > 0)
                    .count();
            if with_potential >= 6 {
                rainbow += self.config.rainbow_progress_bonus;
            } else if with_potential >= 5 && with_buttons < 5 {
                rainbow += self.config.rainbow_progress_bonus * 0.67;
            }
        }

        pair_potential + rainbow
    }
}

fn has_empty_neighbor(board: &Board, cells: &[CellId]) -> bool {
    let topology = board.topology();
    cells.iter().any(|&id| {
        topology
            .neighbor_ids(id)
            .iter()
            .any(|&n| !cells.contains(&n) && board.tile_at(n).is_none())
    })
}

/// Unblocked partial lines of `pattern`, most complete first. Lines sharing
/// cells with an already credited line only earn their decay share.
fn line_potential(board: &Board, pattern: Pattern, length: usize, points: f64) -> f64 {
    let mut candidates: Vec<(usize, &Vec<CellId>)> = Vec::new();
    for line in board.topology().lines(length) {
        let mut count = 0;
        let mut blocked = false;
        for &id in line {
            match board.tile_at(id) {
                Some(tile) if tile.pattern == pattern => count += 1,
                Some(_) => blocked = true,
                None => {}
            }
        }
        if !blocked && line_credit(length, count).is_some() {
            candidates.push((count, line));
        }
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    let mut awarded = vec![false; board.topology().len()];
    let mut total = 0.0;
    for (count, line) in candidates {
        let Some((credit, decay)) = line_credit(length, count) else {
            continue;
        };
        let overlaps = line.iter().any(|&id| awarded[id]);
        total += points * credit * if overlaps { decay } else { 1.0 };
        for &id in line {
            awarded[id] = true;
        }
    }
    total
}

/// Adjacent pairs of `pattern` that still have an empty cell to grow into.
fn cluster_pair_potential(board: &Board, pattern: Pattern, points: f64) -> f64 {
    let topology = board.topology();
    let matches = |id: CellId| board.tile_at(id).is_some_and(|t| t.pattern == pattern);
    let mut pairs = 0;
    for id in 0..topology.len() {
        if !matches(id) {
            continue;
        }
        for &n in topology.neighbor_ids(id) {
            if n > id && matches(n) && has_empty_neighbor(board, &[id, n]) {
                pairs += 1;
            }
        }
    }
    pairs as f64 * points * CLUSTER_PAIR_CREDIT
}

/// Same-color pairs not touching a third tile of that color, with room for
/// one.
fn isolated_color_pairs(board: &Board, color: Color) -> usize {
    let topology = board.topology();
    let same: Vec<Vec<CellId>> = (0..topology.len())
        .map(|id| match board.tile_at(id) {
            Some(tile) if tile.color == color => topology
                .neighbor_ids(id)
                .iter()
                .copied()
                .filter(|&n| board.tile_at(n).is_some_and(|t| t.color == color))
                .collect(),
            _ => Vec::new(),
        })
        .collect();

    let mut pairs = 0;
    for (id, neighbors) in same.iter().enumerate() {
        if let [n] = neighbors.as_slice() {
            if *n > id && same[*n].len() == 1 && has_empty_neighbor(board, &[id, *n]) {
                pairs += 1;
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::ActionMode;
    use crate::game::hex::{BoardTopology, Position, GOAL_POSITIONS};
    use crate::game::options::GameOptions;
    use crate::game::tile::Tile;
    use crate::scoring::creature::CreatureKind;
    use crate::scoring::goal::GoalKind;
    use std::sync::Arc;

    fn empty_board() -> Board {
        Board::new(Arc::new(BoardTopology::standard()))
    }

    fn leo() -> Creature {
        Creature::new(CreatureKind::Leo, [Pattern::Dots, Pattern::Leaves])
    }

    #[test]
    fn test_line_credit_grows_with_progress() {
        let evaluator = HeuristicEvaluator::default();
        let dots = Tile::new(Color::Pink, Pattern::Dots);
        let mut board = empty_board();
        let mut last = 0.0;
        for q in -3..=0 {
            board.place(Position::new(q, 0), dots);
            let potential = evaluator.creature_potential(&board, &leo());
            assert!(potential >= last);
            last = potential;
        }
        assert!(last >= 11.0 * 0.5);
    }

    #[test]
    fn test_blocked_line_earns_nothing() {
        let evaluator = HeuristicEvaluator::default();
        let mut board = empty_board();
        board.place(Position::new(-3, 0), Tile::new(Color::Pink, Pattern::Dots));
        board.place(Position::new(-2, 0), Tile::new(Color::Pink, Pattern::Dots));
        let open = line_potential(&board, Pattern::Dots, 5, 11.0);

        // Leaves is also accepted by Leo, but still blocks a Dots line.
        board.place(Position::new(-1, 0), Tile::new(Color::Pink, Pattern::Leaves));
        let blocked = line_potential(&board, Pattern::Dots, 5, 11.0);
        assert!(blocked < open);
        assert!(evaluator.creature_potential(&board, &leo()) >= 0.0);
    }

    #[test]
    fn test_cluster_pair_needs_room() {
        let dots = Tile::new(Color::Blue, Pattern::Dots);
        let mut board = empty_board();
        board.place(Position::new(0, 0), dots);
        board.place(Position::new(1, 0), dots);
        assert!((cluster_pair_potential(&board, Pattern::Dots, 3.0) - 0.9).abs() < 1e-9);
        assert_eq!(cluster_pair_potential(&board, Pattern::Stripes, 3.0), 0.0);
    }

    #[test]
    fn test_signature_progress() {
        assert_eq!(signature_progress(&[3, 3], &[3, 3]), 1.0);
        assert_eq!(signature_progress(&[4], &[3, 3]), 0.0);
        assert_eq!(signature_progress(&[1, 1, 1], &[3, 3]), 0.0);
        assert_eq!(signature_progress(&[], &[2, 2, 2]), 0.0);
        let early = signature_progress(&[1], &[2, 2, 2]);
        let later = signature_progress(&[2, 1], &[2, 2, 2]);
        assert!(early > 0.0 && later > early && later < 1.0);
    }

    #[test]
    fn test_goal_potential_only_while_unfinished() {
        let evaluator = HeuristicEvaluator::default();
        let goal = Goal::new(
            GoalKind::ThreeThree,
            GOAL_POSITIONS[1],
            GoalKind::ThreeThree.default_points(),
        );
        let a = Tile::new(Color::Blue, Pattern::Dots);
        let b = Tile::new(Color::Pink, Pattern::Stripes);
        let mut board = empty_board();
        let ring = GOAL_POSITIONS[1].ring();
        for (pos, tile) in ring.iter().zip([a, b, a, b]) {
            board.place(*pos, tile);
        }
        let partial = evaluator.goal_value(&board, &goal);
        assert!(partial > 0.0 && partial < 13.0);

        board.place(ring[4], a);
        board.place(ring[5], b);
        assert_eq!(evaluator.goal_value(&board, &goal), 13.0);
    }

    #[test]
    fn test_isolated_pairs() {
        let mut board = empty_board();
        board.place(Position::new(0, 0), Tile::new(Color::Green, Pattern::Dots));
        board.place(Position::new(1, 0), Tile::new(Color::Green, Pattern::Clubs));
        assert_eq!(isolated_color_pairs(&board, Color::Green), 1);

        board.place(Position::new(2, 0), Tile::new(Color::Green, Pattern::Leaves));
        assert_eq!(isolated_color_pairs(&board, Color::Green), 0);
    }

    #[test]
    fn test_full_board_matches_exact_score() {
        let evaluator = HeuristicEvaluator::default();
        for seed in 0..4 {
            let mut state = GameState::new(&GameOptions::default(), seed);
            let score = state.play_random_game(ActionMode::Combined);
            assert_eq!(evaluator.evaluate(&state), score as f64);
        }
    }

    #[test]
    fn test_weights_leave_full_board_exact() {
        let evaluator = HeuristicEvaluator::new(HeuristicConfig {
            cat_weight: 2.0,
            button_weight: 0.5,
            ..HeuristicConfig::default()
        });
        for seed in 0..4 {
            let mut state = GameState::new(&GameOptions::default(), seed);
            let score = state.play_random_game(ActionMode::Combined);
            assert_eq!(evaluator.evaluate(&state), score as f64);
        }
    }

    #[test]
    fn test_weights_scale_only_potential() {
        let mut state = GameState::new(&GameOptions::default(), 42);
        for _ in 0..10 {
            let actions = state.legal_combined_actions();
            assert!(state.apply(actions[0]));
        }
        let zero = HeuristicEvaluator::new(HeuristicConfig {
            cat_weight: 0.0,
            button_weight: 0.0,
            ..HeuristicConfig::default()
        });
        let board = state.board();
        let earned: u32 = state.creatures().iter().map(|c| c.score(board)).sum::<u32>()
            + button_breakdown(board).total();
        let goals: f64 = state.goals().iter().map(|g| zero.goal_value(board, g)).sum();
        assert!((zero.evaluate(&state) - (earned as f64 + goals)).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_is_not_below_current_score() {
        let evaluator = HeuristicEvaluator::default();
        let mut state = GameState::new(&GameOptions::default(), 42);
        for _ in 0..12 {
            let actions = state.legal_combined_actions();
            assert!(state.apply(actions[0]));
            assert!(evaluator.evaluate(&state) >= state.final_score() as f64);
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(HeuristicConfig::default().validate().is_ok());
        let bad = HeuristicConfig {
            goal_discount: f64::NAN,
            ..HeuristicConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
