//! Arena-allocated search tree.
//!
//! Nodes are stored in a contiguous `Vec` and referenced by [`NodeId`]. The
//! root is always `NodeId(0)`. Children are only ever appended during a
//! search.

use crate::game::action::{Action, ActionMode};
use crate::game::game_state::GameState;
use crate::mcts::node::{MctsNode, NodeId};
use rand::Rng;

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<MctsNode>,
    mode: ActionMode,
}

impl SearchTree {
    pub fn new(root_state: GameState, mode: ActionMode) -> Self {
        SearchTree {
            nodes: vec![MctsNode::new_root(root_state, mode)],
            mode,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends a child reached from `parent` by `action`.
    pub fn add_child(&mut self, parent: NodeId, action: Action, state: GameState) -> NodeId {
        let child = MctsNode::new_child(parent, action, state, self.mode);
        let id = self.allocate(child);
        self.get_mut(parent).children.push(id);
        id
    }

    /// Expands one untried action of `id`, chosen at random, on a resampled
    /// copy of the node's state. Returns `None` when nothing could be
    /// expanded.
    pub fn expand<R: Rng>(&mut self, id: NodeId, rng: &mut R) -> Option<NodeId> {
        while !self.get(id).untried_actions.is_empty() {
            let node = self.get_mut(id);
            let pick = rng.random_range(0..node.untried_actions.len());
            let action = node.untried_actions.swap_remove(pick);

            let mut state = self.get(id).state.fork_with(rng);
            match state.try_apply(action) {
                Ok(()) => return Some(self.add_child(id, action, state)),
                Err(e) => log::warn!("skipping untried action {}: {}", action, e),
            }
        }
        None
    }

    /// Root children, most visited first. Ties keep expansion order.
    pub fn root_children_by_visits(&self) -> Vec<NodeId> {
        let mut children = self.get(self.root()).children.clone();
        children.sort_by(|a, b| self.get(*b).visit_count.cmp(&self.get(*a).visit_count));
        children
    }

    /// Action of the most visited root child.
    pub fn best_action(&self) -> Option<Action> {
        self.root_children_by_visits()
            .first()
            .and_then(|&id| self.get(id).action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::options::GameOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_expand_appends_children_until_exhausted() {
        let state = GameState::new(&GameOptions::default(), 4);
        let mut tree = SearchTree::new(state, ActionMode::Combined);
        let mut rng = StdRng::seed_from_u64(4);

        let mut expanded = Vec::new();
        while let Some(child) = tree.expand(tree.root(), &mut rng) {
            assert_eq!(tree.get(child).parent, Some(tree.root()));
            expanded.push(tree.get(child).action);
        }
        assert_eq!(expanded.len(), 24);
        assert_eq!(tree.len(), 25);
        assert!(tree.get(tree.root()).is_fully_expanded());

        let unique: std::collections::HashSet<_> = expanded.iter().collect();
        assert_eq!(unique.len(), 24);
    }

    #[test]
    fn test_best_action_prefers_visits() {
        let state = GameState::new(&GameOptions::default(), 5);
        let mut tree = SearchTree::new(state, ActionMode::Separate);
        let mut rng = StdRng::seed_from_u64(5);
        let a = tree.expand(tree.root(), &mut rng).unwrap();
        let b = tree.expand(tree.root(), &mut rng).unwrap();
        tree.get_mut(a).visit_count = 2;
        tree.get_mut(a).total_score = 200.0;
        tree.get_mut(b).visit_count = 5;
        tree.get_mut(b).total_score = 10.0;
        assert_eq!(tree.best_action(), tree.get(b).action);
        assert_eq!(tree.root_children_by_visits(), vec![b, a]);
    }

    #[test]
    fn test_best_action_without_children() {
        let state = GameState::new(&GameOptions::default(), 6);
        let tree = SearchTree::new(state, ActionMode::Separate);
        assert_eq!(tree.best_action(), None);
    }
}
