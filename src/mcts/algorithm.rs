//! Monte Carlo Tree Search agent.
//!
//! Every iteration selects a leaf by UCB1, expands one untried action on a
//! resampled copy of the leaf state, scores the new node and backpropagates
//! the score to the root. Leaves are scored by the heuristic evaluator in
//! the early and middle game and by full rollouts once few cells remain.
//! The final decision is the most visited root child.
use crate::game::action::Action;
use crate::game::game_state::GameState;
use crate::game::simulate_game::simulate_games;
use crate::game::simulate_game_smart::simulate_games_smart;
use crate::mcts::hyperparameters::SearchConfig;
use crate::mcts::mcts_result::{CandidateAction, SearchResult};
use crate::mcts::selection::{backpropagate, select_leaf};
use crate::mcts::tree::SearchTree;
use crate::strategy::heuristic::HeuristicEvaluator;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

pub struct MctsAgent {
    config: SearchConfig,
    evaluator: HeuristicEvaluator,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Agent with a reproducible random stream.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SearchConfig, rng: StdRng) -> Self {
        let evaluator = HeuristicEvaluator::new(config.heuristic);
        MctsAgent {
            config,
            evaluator,
            rng,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best action for `state`, or `None` if it has no legal action.
    /// `state` is never modified.
    pub fn select_action(&mut self, state: &GameState) -> Option<Action> {
        let tree = self.search(state);
        tree.best_action().or_else(|| self.random_legal_action(state))
    }

    /// Like [`MctsAgent::select_action`], also reporting the top
    /// `candidates` root children by visit count. The decision itself does
    /// not depend on how many are reported.
    pub fn select_action_with_analysis(&mut self, state: &GameState) -> Option<SearchResult> {
        let tree = self.search(state);
        let candidates: Vec<CandidateAction> = tree
            .root_children_by_visits()
            .into_iter()
            .take(self.config.candidates)
            .filter_map(|id| {
                let node = tree.get(id);
                node.action.map(|action| CandidateAction {
                    action,
                    visits: node.visit_count,
                    average_score: node.average_value(),
                })
            })
            .collect();

        let (best_action, candidates) = match tree.best_action() {
            Some(best) => (best, candidates),
            None => {
                let action = self.random_legal_action(state)?;
                let fallback = CandidateAction {
                    action,
                    visits: 0,
                    average_score: 0.0,
                };
                (action, vec![fallback])
            }
        };

        Some(SearchResult {
            best_action,
            candidates,
            iterations: self.config.iterations,
            tree_size: tree.len(),
        })
    }

    fn random_legal_action(&mut self, state: &GameState) -> Option<Action> {
        let action = state
            .legal_actions_for(self.config.action_mode)
            .choose(&mut self.rng)
            .copied();
        if action.is_some() {
            log::debug!("search expanded no children, falling back to a random action");
        }
        action
    }

    fn search(&mut self, state: &GameState) -> SearchTree {
        let root_state = state.fork_with(&mut self.rng);
        let mut tree = SearchTree::new(root_state, self.config.action_mode);

        for iteration in 0..self.config.iterations {
            let mut id = select_leaf(&tree, self.config.exploration_constant);

            let node = tree.get(id);
            if !node.is_terminal && !node.is_fully_expanded() {
                if let Some(child) = tree.expand(id, &mut self.rng) {
                    id = child;
                }
            }

            let score = self.simulate(&tree.get(id).state);
            backpropagate(&mut tree, id, score);

            if log::log_enabled!(log::Level::Trace) {
                log::trace!(
                    "iteration {}: node {} scored {:.2}, tree size {}",
                    iteration,
                    id.0,
                    score,
                    tree.len()
                );
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            let root = tree.get(tree.root());
            log::debug!(
                "search [{}]: turn {}, {} nodes, {} root children, root average {:.2}",
                self.config.to_config_string(),
                state.turn_number(),
                tree.len(),
                root.children.len(),
                root.average_value()
            );
        }
        tree
    }

    /// Leaf value: the final score at game over, a rollout in the late game
    /// (or whenever the heuristic is disabled), the heuristic otherwise.
    fn simulate(&mut self, state: &GameState) -> f64 {
        if state.is_game_over() {
            return state.final_score() as f64;
        }
        let late_game = state.empty_count() <= self.config.late_game_threshold;
        if late_game || !self.config.use_heuristic {
            let mode = self.config.action_mode;
            let score = if self.config.deterministic_rollout {
                simulate_games_smart(state, mode, &self.evaluator, &mut self.rng)
            } else {
                simulate_games(state, mode, &mut self.rng)
            };
            score as f64
        } else {
            self.evaluator.evaluate(state)
        }
    }
}

/// One-shot search with a fresh agent.
pub fn select_action(state: &GameState, config: &SearchConfig) -> Option<Action> {
    MctsAgent::new(config.clone()).select_action(state)
}
