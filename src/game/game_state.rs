//! Turn state machine for a single-player game with three simulated
//! opponents who only ever discard from the market.
//!
//! `GoalSelection -> PlaceTile <-> ChooseMarket -> GameOver`. In combined
//! mode a `PlaceAndChoose` action loops `PlaceTile` onto itself.

use crate::game::action::{Action, ActionMode};
use crate::game::board::Board;
use crate::game::hex::{BoardTopology, Position};
use crate::game::market::Market;
use crate::game::options::GameOptions;
use crate::game::tile::Tile;
use crate::game::tile_bag::TileBag;
use crate::scoring::creature::{assign_creatures, Creature};
use crate::scoring::goal::{goal_assignments, offer_goal_options, Goal, GoalKind, GoalPointTable};
use crate::scoring::{score_board, ScoreBreakdown};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const HAND_SIZE: usize = 2;
/// Opponents who each discard one market tile per turn.
pub const SIMULATED_OPPONENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    GoalSelection,
    PlaceTile,
    ChooseMarket,
    GameOver,
}

/// Why an action was rejected. A rejected action never changes the state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{action} is not allowed during {phase:?}")]
    WrongPhase { action: Action, phase: TurnPhase },
    #[error("{0} is not a playable cell")]
    InvalidPosition(Position),
    #[error("{0} is already occupied")]
    OccupiedPosition(Position),
    #[error("hand index {index} out of range (hand holds {len})")]
    InvalidHandIndex { index: usize, len: usize },
    #[error("market index {index} out of range (market holds {len})")]
    InvalidMarketIndex { index: usize, len: usize },
    #[error("a market choice is required unless the placement fills the board")]
    MissingMarketChoice,
    #[error("the final placement takes no market tile")]
    UnexpectedMarketChoice,
    #[error("invalid goal selection {0:?}")]
    InvalidGoalSelection([usize; 3]),
}

/// Plain view of the player-facing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub hand: Vec<Tile>,
    pub market: Vec<Tile>,
    pub empty_positions: Vec<Position>,
    /// Occupied cells, rim included, in cell order.
    pub board: Vec<(Position, Tile)>,
    pub turn_number: usize,
    pub phase: TurnPhase,
    pub bag_remaining: usize,
}

/// Full game state.
///
/// `Clone` is an exact copy, including the hidden bag order and the RNG.
/// Search should use [`GameState::fork_with`], which resamples the hidden
/// information.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    hand: Vec<Tile>,
    market: Market,
    bag: TileBag,
    discards: Vec<Tile>,
    creatures: Arc<[Creature]>,
    goal_options: Arc<[GoalKind]>,
    goal_points: Arc<GoalPointTable>,
    goals: Arc<[Goal]>,
    turn_number: usize,
    phase: TurnPhase,
    rng: StdRng,
    history: Vec<Action>,
}

impl GameState {
    pub fn new(options: &GameOptions, seed: u64) -> Self {
        Self::with_rng(options, StdRng::seed_from_u64(seed))
    }

    /// New game seeded from the thread-local generator.
    pub fn random(options: &GameOptions) -> Self {
        Self::with_rng(options, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(options: &GameOptions, mut rng: StdRng) -> Self {
        let topology = Arc::new(BoardTopology::standard());
        let board = Board::with_layout(topology, options.layout);
        let bag = TileBag::new(&mut rng);
        let creatures = options
            .creatures
            .clone()
            .unwrap_or_else(|| assign_creatures(&mut rng));
        let goal_options = options
            .goal_options
            .clone()
            .unwrap_or_else(|| offer_goal_options(&mut rng));

        GameState {
            board,
            hand: Vec::with_capacity(HAND_SIZE),
            market: Market::new(),
            bag,
            discards: Vec::new(),
            creatures: creatures.into(),
            goal_options: goal_options.into(),
            goal_points: Arc::new(options.goal_points.clone()),
            goals: Arc::from(Vec::new()),
            turn_number: 0,
            phase: TurnPhase::GoalSelection,
            rng,
            history: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn bag_remaining(&self) -> usize {
        self.bag.remaining()
    }

    /// Tiles thrown away by the simulated opponents.
    pub fn discards(&self) -> &[Tile] {
        &self.discards
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn goal_options(&self) -> &[GoalKind] {
        &self.goal_options
    }

    /// Goals in play; empty until goal selection.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn turn_number(&self) -> usize {
        self.turn_number
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    pub fn empty_count(&self) -> usize {
        self.board.empty_count()
    }

    /// Every action applied so far, oldest first.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Tiles across hand, market, board, bag and discard pile. Constant for
    /// the lifetime of a game.
    pub fn tile_total(&self) -> usize {
        self.hand.len()
            + self.market.len()
            + self.board.filled_count()
            + self.bag.remaining()
            + self.discards.len()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            hand: self.hand.clone(),
            market: self.market.tiles().to_vec(),
            empty_positions: self.board.empty_positions(),
            board: self.board.tiles().collect(),
            turn_number: self.turn_number,
            phase: self.phase,
            bag_remaining: self.bag.remaining(),
        }
    }

    // ------------------------------------------------------------------
    // Legal actions
    // ------------------------------------------------------------------

    fn goal_selection_actions(&self) -> Vec<Action> {
        goal_assignments(self.goal_options.len())
            .into_iter()
            .map(|goals| Action::SelectGoals { goals })
            .collect()
    }

    fn market_actions(&self) -> Vec<Action> {
        (0..self.market.len())
            .map(|market_index| Action::ChooseMarket { market_index })
            .collect()
    }

    /// Legal actions for the separate-step turn structure.
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.phase {
            TurnPhase::GoalSelection => self.goal_selection_actions(),
            TurnPhase::PlaceTile => {
                let empty = self.board.empty_positions();
                let mut actions = Vec::with_capacity(empty.len() * self.hand.len());
                for position in empty {
                    for hand_index in 0..self.hand.len() {
                        actions.push(Action::PlaceTile {
                            position,
                            hand_index,
                        });
                    }
                }
                actions
            }
            TurnPhase::ChooseMarket => self.market_actions(),
            TurnPhase::GameOver => Vec::new(),
        }
    }

    /// Legal actions for the atomic turn structure. Goal selection is offered
    /// as usual; a state left in `ChooseMarket` by a separate placement gets
    /// its market choices.
    pub fn legal_combined_actions(&self) -> Vec<Action> {
        match self.phase {
            TurnPhase::GoalSelection => self.goal_selection_actions(),
            TurnPhase::PlaceTile => {
                let empty = self.board.empty_positions();
                let final_turn = empty.len() == 1;
                let market_choices: Vec<Option<usize>> = if final_turn || self.market.is_empty() {
                    vec![None]
                } else {
                    (0..self.market.len()).map(Some).collect()
                };
                let mut actions =
                    Vec::with_capacity(empty.len() * self.hand.len() * market_choices.len());
                for position in empty {
                    for hand_index in 0..self.hand.len() {
                        for &market_index in &market_choices {
                            actions.push(Action::PlaceAndChoose {
                                position,
                                hand_index,
                                market_index,
                            });
                        }
                    }
                }
                actions
            }
            TurnPhase::ChooseMarket => self.market_actions(),
            TurnPhase::GameOver => Vec::new(),
        }
    }

    pub fn legal_actions_for(&self, mode: ActionMode) -> Vec<Action> {
        match mode {
            ActionMode::Separate => self.legal_actions(),
            ActionMode::Combined => self.legal_combined_actions(),
        }
    }

    // ------------------------------------------------------------------
    // Applying actions
    // ------------------------------------------------------------------

    /// Applies `action`, returning `false` if it was rejected.
    pub fn apply(&mut self, action: Action) -> bool {
        match self.try_apply(action) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("rejected action: {}", e);
                false
            }
        }
    }

    /// Validates `action` against the current state, then applies it.
    pub fn try_apply(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::SelectGoals { goals } => {
                self.expect_phase(action, TurnPhase::GoalSelection)?;
                self.validate_goal_selection(goals)?;
                self.select_goals(goals);
            }
            Action::PlaceTile {
                position,
                hand_index,
            } => {
                self.expect_phase(action, TurnPhase::PlaceTile)?;
                self.validate_placement(position, hand_index)?;
                self.place(position, hand_index);
                if self.phase != TurnPhase::GameOver {
                    if self.market.is_empty() {
                        self.end_turn();
                    } else {
                        self.phase = TurnPhase::ChooseMarket;
                    }
                }
            }
            Action::ChooseMarket { market_index } => {
                self.expect_phase(action, TurnPhase::ChooseMarket)?;
                self.validate_market_index(market_index)?;
                self.take_from_market(market_index);
                self.end_turn();
            }
            Action::PlaceAndChoose {
                position,
                hand_index,
                market_index,
            } => {
                self.expect_phase(action, TurnPhase::PlaceTile)?;
                self.validate_placement(position, hand_index)?;
                let final_turn = self.board.empty_count() == 1;
                match (final_turn, market_index) {
                    (true, Some(_)) => return Err(ActionError::UnexpectedMarketChoice),
                    (false, None) if !self.market.is_empty() => {
                        return Err(ActionError::MissingMarketChoice)
                    }
                    (false, Some(index)) => self.validate_market_index(index)?,
                    _ => {}
                }

                self.place(position, hand_index);
                if self.phase != TurnPhase::GameOver {
                    if let Some(index) = market_index {
                        self.take_from_market(index);
                    }
                    self.end_turn();
                }
            }
        }
        self.history.push(action);
        Ok(())
    }

    fn expect_phase(&self, action: Action, phase: TurnPhase) -> Result<(), ActionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(ActionError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn validate_goal_selection(&self, goals: [usize; 3]) -> Result<(), ActionError> {
        let in_range = goals.iter().all(|&g| g < self.goal_options.len());
        let distinct = goals[0] != goals[1] && goals[1] != goals[2] && goals[0] != goals[2];
        let slots = self.board.topology().goal_positions().len() == goals.len();
        if in_range && distinct && slots {
            Ok(())
        } else {
            Err(ActionError::InvalidGoalSelection(goals))
        }
    }

    fn validate_placement(&self, position: Position, hand_index: usize) -> Result<(), ActionError> {
        if !self.board.is_valid(position) {
            return Err(ActionError::InvalidPosition(position));
        }
        if !self.board.is_empty_at(position) {
            return Err(ActionError::OccupiedPosition(position));
        }
        if hand_index >= self.hand.len() {
            return Err(ActionError::InvalidHandIndex {
                index: hand_index,
                len: self.hand.len(),
            });
        }
        Ok(())
    }

    fn validate_market_index(&self, index: usize) -> Result<(), ActionError> {
        if index < self.market.len() {
            Ok(())
        } else {
            Err(ActionError::InvalidMarketIndex {
                index,
                len: self.market.len(),
            })
        }
    }

    fn select_goals(&mut self, goals: [usize; 3]) {
        let selected: Vec<Goal> = goals
            .iter()
            .zip(self.board.topology().goal_positions())
            .map(|(&option, &position)| {
                let kind = self.goal_options[option];
                Goal::new(kind, position, self.goal_points.get(kind))
            })
            .collect();
        self.goals = selected.into();

        while self.hand.len() < HAND_SIZE {
            match self.bag.draw() {
                Some(tile) => self.hand.push(tile),
                None => break,
            }
        }
        self.market.refill(&mut self.bag);
        self.phase = TurnPhase::PlaceTile;
        log::trace!("goals selected: {:?}", goals);
    }

    /// Places a validated hand tile; moves to `GameOver` if the board fills.
    fn place(&mut self, position: Position, hand_index: usize) {
        let tile = self.hand.remove(hand_index);
        self.board.place(position, tile);
        if self.board.is_full() {
            self.phase = TurnPhase::GameOver;
        }
    }

    fn take_from_market(&mut self, index: usize) {
        if let Some(tile) = self.market.choose(index) {
            self.hand.push(tile);
        }
        self.market.refill(&mut self.bag);
        self.simulate_opponents();
    }

    fn simulate_opponents(&mut self) {
        for _ in 0..SIMULATED_OPPONENTS {
            if self.market.is_empty() {
                break;
            }
            let index = self.rng.random_range(0..self.market.len());
            if let Some(tile) = self.market.choose(index) {
                self.discards.push(tile);
            }
            self.market.refill(&mut self.bag);
        }
    }

    fn end_turn(&mut self) {
        if self.board.is_full() {
            self.phase = TurnPhase::GameOver;
        } else {
            self.turn_number += 1;
            self.phase = TurnPhase::PlaceTile;
        }
    }

    // ------------------------------------------------------------------
    // Search support
    // ------------------------------------------------------------------

    /// Independent copy for lookahead with the hidden bag order resampled,
    /// reseeded from `rng`.
    pub fn fork_with<R: Rng>(&self, rng: &mut R) -> Self {
        let mut copy = self.clone();
        copy.rng = StdRng::from_rng(rng);
        copy.bag.shuffle_remaining(&mut copy.rng);
        copy
    }

    /// Plays uniformly random legal actions until the game ends.
    pub fn play_random_game(&mut self, mode: ActionMode) -> u32 {
        loop {
            let actions = self.legal_actions_for(mode);
            let Some(&action) = actions.choose(&mut self.rng) else {
                break;
            };
            if !self.apply(action) {
                log::warn!("legal action {} was rejected", action);
                break;
            }
        }
        self.final_score()
    }

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------

    pub fn score_breakdown(&self) -> ScoreBreakdown {
        score_board(&self.board, &self.creatures, &self.goals)
    }

    /// Score of the board as it stands; the final score once the game is over.
    pub fn final_score(&self) -> u32 {
        self.score_breakdown().total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::layouts::BoardLayout;
    use crate::game::tile::COPIES_PER_COMBINATION;
    use crate::game::tile_bag::BAG_SIZE;
    use assert_matches::assert_matches;
    use std::collections::{HashMap, HashSet};

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(&GameOptions::default(), seed);
        assert!(state.apply(Action::SelectGoals { goals: [0, 1, 2] }));
        state
    }

    #[test]
    fn test_new_game_starts_in_goal_selection() {
        let state = GameState::new(&GameOptions::default(), 1);
        assert_eq!(state.phase(), TurnPhase::GoalSelection);
        assert!(state.hand().is_empty());
        assert!(state.market().is_empty());
        assert_eq!(state.legal_actions().len(), 24);
        assert_eq!(state.legal_combined_actions().len(), 24);
        assert_eq!(state.creatures().len(), 3);
        assert_eq!(state.goal_options().len(), 4);
    }

    #[test]
    fn test_goal_selection_deals_hand_and_market() {
        let state = started(2);
        assert_eq!(state.phase(), TurnPhase::PlaceTile);
        assert_eq!(state.hand().len(), HAND_SIZE);
        assert_eq!(state.market().len(), 3);
        assert_eq!(state.goals().len(), 3);
        assert_eq!(state.bag_remaining(), 108 - 5);
        for (goal, &option) in state.goals().iter().zip(&[0usize, 1, 2]) {
            assert_eq!(goal.kind, state.goal_options()[option]);
        }
    }

    #[test]
    fn test_invalid_goal_selection_is_rejected() {
        let mut state = GameState::new(&GameOptions::default(), 3);
        assert_matches!(
            state.try_apply(Action::SelectGoals { goals: [0, 0, 1] }),
            Err(ActionError::InvalidGoalSelection(_))
        );
        assert_matches!(
            state.try_apply(Action::SelectGoals { goals: [0, 1, 4] }),
            Err(ActionError::InvalidGoalSelection(_))
        );
        assert_eq!(state.phase(), TurnPhase::GoalSelection);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_place_then_choose_cycle() {
        let mut state = started(4);
        let place = state.legal_actions()[0];
        assert!(state.apply(place));
        assert_eq!(state.phase(), TurnPhase::ChooseMarket);
        assert_eq!(state.hand().len(), 1);
        assert_eq!(state.legal_actions().len(), 3);

        assert!(state.apply(Action::ChooseMarket { market_index: 1 }));
        assert_eq!(state.phase(), TurnPhase::PlaceTile);
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.hand().len(), 2);
        assert_eq!(state.market().len(), 3);
        assert_eq!(state.discards().len(), SIMULATED_OPPONENTS);
        assert_eq!(state.history().len(), 3);
    }

    #[test]
    fn test_wrong_phase_does_not_mutate() {
        let mut state = started(5);
        let before = state.snapshot();
        assert_matches!(
            state.try_apply(Action::ChooseMarket { market_index: 0 }),
            Err(ActionError::WrongPhase {
                phase: TurnPhase::PlaceTile,
                ..
            })
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_placement_errors() {
        let mut state = started(6);
        let occupied = state.board().tiles().next().map(|(pos, _)| pos).unwrap();
        let empty = state.board().empty_positions()[0];

        assert_matches!(
            state.try_apply(Action::PlaceTile {
                position: Position::new(9, 9),
                hand_index: 0
            }),
            Err(ActionError::InvalidPosition(_))
        );
        assert_matches!(
            state.try_apply(Action::PlaceTile {
                position: occupied,
                hand_index: 0
            }),
            Err(ActionError::OccupiedPosition(_))
        );
        assert_matches!(
            state.try_apply(Action::PlaceTile {
                position: empty,
                hand_index: 2
            }),
            Err(ActionError::InvalidHandIndex { index: 2, len: 2 })
        );
        assert!(!state.apply(Action::PlaceAndChoose {
            position: empty,
            hand_index: 0,
            market_index: None,
        }));
        assert_eq!(state.board().empty_count(), 22);
    }

    #[test]
    fn test_combined_actions_cover_market_choices() {
        let state = started(7);
        let actions = state.legal_combined_actions();
        assert_eq!(actions.len(), 22 * 2 * 3);
        assert!(actions.iter().all(|a| a.is_combined() && !a.is_final_turn()));
    }

    #[test]
    fn test_random_game_reaches_game_over() {
        for mode in [ActionMode::Separate, ActionMode::Combined] {
            let mut state = GameState::new(&GameOptions::default(), 8);
            let total = state.tile_total();
            let score = state.play_random_game(mode);
            assert!(state.is_game_over());
            assert_eq!(state.empty_count(), 0);
            assert_eq!(state.tile_total(), total);
            assert_eq!(score, state.score_breakdown().total());
            assert!(state.legal_actions_for(mode).is_empty());
            assert!(state.history()[0].is_goal_selection());
        }
    }

    #[test]
    fn test_clone_is_exact_and_fork_resamples() {
        let state = started(9);
        let clone = state.clone();
        assert_eq!(clone.bag.tiles(), state.bag.tiles());

        let mut rng = StdRng::seed_from_u64(99);
        let fork = state.fork_with(&mut rng);
        assert_ne!(fork.bag.tiles(), state.bag.tiles());
        assert_eq!(fork.bag_remaining(), state.bag_remaining());
        assert_eq!(fork.snapshot(), state.snapshot());
    }

    /// Copies of each tile outside the rim: hand, market, bag, discards and
    /// placed tiles.
    fn supply_counts(state: &GameState) -> HashMap<Tile, usize> {
        let rim = BoardLayout::default().border_positions();
        let placed = state
            .board
            .tiles()
            .filter(|(pos, _)| !rim.contains(pos))
            .map(|(_, tile)| tile);
        let mut counts = HashMap::new();
        for tile in state
            .hand
            .iter()
            .chain(state.market.tiles())
            .chain(state.bag.tiles())
            .chain(&state.discards)
            .copied()
            .chain(placed)
        {
            *counts.entry(tile).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_forks_replaying_one_line_stay_valid_games() {
        let state = started(13);
        let mut line = Vec::new();
        let mut reference = state.clone();
        while !reference.is_game_over() {
            let action = reference.legal_combined_actions()[0];
            assert!(reference.apply(action));
            line.push(action);
        }

        let total = state.tile_total();
        let mut boards = HashSet::new();
        for seed in 0..6 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut fork = state.fork_with(&mut rng);
            for &action in &line {
                assert!(fork.apply(action));
                assert_eq!(fork.tile_total(), total);
                let counts = supply_counts(&fork);
                assert_eq!(counts.values().sum::<usize>(), BAG_SIZE);
                assert!(counts.values().all(|&n| n <= COPIES_PER_COMBINATION));
            }
            assert!(fork.is_game_over());
            boards.insert(fork.board.tiles().collect::<Vec<_>>());
        }
        // same cells filled, different tiles drawn
        assert!(boards.len() > 1);
    }
}
