//! Search tree node.
//!
//! Nodes live in the [`SearchTree`](crate::mcts::tree::SearchTree) arena and
//! refer to each other by [`NodeId`]. Each node owns a full game state; the
//! board topology and the creature/goal definitions inside it are shared.

use crate::game::action::{Action, ActionMode};
use crate::game::game_state::GameState;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct MctsNode {
    pub state: GameState,
    pub parent: Option<NodeId>,
    /// Action that led here from the parent; `None` for the root.
    pub action: Option<Action>,
    pub children: Vec<NodeId>,
    pub untried_actions: Vec<Action>,
    pub visit_count: u32,
    pub total_score: f64,
    /// Game over, or no legal action at all. Never expanded.
    pub is_terminal: bool,
}

impl MctsNode {
    pub fn new_root(state: GameState, mode: ActionMode) -> Self {
        Self::from_state(state, None, None, mode)
    }

    pub fn new_child(parent: NodeId, action: Action, state: GameState, mode: ActionMode) -> Self {
        Self::from_state(state, Some(parent), Some(action), mode)
    }

    fn from_state(
        state: GameState,
        parent: Option<NodeId>,
        action: Option<Action>,
        mode: ActionMode,
    ) -> Self {
        let untried_actions = if state.is_game_over() {
            Vec::new()
        } else {
            state.legal_actions_for(mode)
        };
        let is_terminal = state.is_game_over() || untried_actions.is_empty();
        MctsNode {
            state,
            parent,
            action,
            children: Vec::new(),
            untried_actions,
            visit_count: 0,
            total_score: 0.0,
            is_terminal,
        }
    }

    pub fn average_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_score / self.visit_count as f64
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }
}
