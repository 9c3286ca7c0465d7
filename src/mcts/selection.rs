//! UCB1 selection and backpropagation over the node arena.

use crate::mcts::node::{MctsNode, NodeId};
use crate::mcts::tree::SearchTree;

/// UCB1 = average score + C * sqrt(ln(parent visits) / visits).
/// Unvisited children score infinity so they are always tried first.
pub fn ucb1_score(child: &MctsNode, parent_visits: u32, exploration_constant: f64) -> f64 {
    if child.visit_count == 0 {
        return f64::INFINITY;
    }
    let visits = child.visit_count as f64;
    let exploration = (f64::from(parent_visits.max(1)).ln() / visits).sqrt();
    child.average_value() + exploration_constant * exploration
}

/// Child of `id` with the highest UCB1 score; the earliest child wins ties.
pub fn select_best_child(tree: &SearchTree, id: NodeId, exploration_constant: f64) -> Option<NodeId> {
    let node = tree.get(id);
    let mut best: Option<(NodeId, f64)> = None;
    for &child in &node.children {
        let score = ucb1_score(tree.get(child), node.visit_count, exploration_constant);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((child, score)),
        }
    }
    best.map(|(child, _)| child)
}

/// Descends from the root through fully expanded nodes and stops at the
/// first node that is terminal or still has untried actions.
pub fn select_leaf(tree: &SearchTree, exploration_constant: f64) -> NodeId {
    let mut id = tree.root();
    loop {
        let node = tree.get(id);
        if node.is_terminal || !node.is_fully_expanded() {
            return id;
        }
        match select_best_child(tree, id, exploration_constant) {
            Some(child) => id = child,
            None => return id,
        }
    }
}

/// Adds one visit and `score` to `id` and every ancestor up to the root.
pub fn backpropagate(tree: &mut SearchTree, id: NodeId, score: f64) {
    let mut current = Some(id);
    while let Some(node_id) = current {
        let node = tree.get_mut(node_id);
        node.visit_count += 1;
        node.total_score += score;
        current = node.parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::ActionMode;
    use crate::game::game_state::GameState;
    use crate::game::options::GameOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tree_with_children(n: usize) -> (SearchTree, Vec<NodeId>) {
        let state = GameState::new(&GameOptions::default(), 12);
        let mut tree = SearchTree::new(state, ActionMode::Separate);
        let mut rng = StdRng::seed_from_u64(12);
        let children = (0..n)
            .map(|_| tree.expand(tree.root(), &mut rng).unwrap())
            .collect();
        (tree, children)
    }

    #[test]
    fn test_unvisited_child_is_selected_first() {
        let (mut tree, children) = tree_with_children(2);
        backpropagate(&mut tree, children[0], 100.0);
        assert_eq!(select_best_child(&tree, tree.root(), 1.4), Some(children[1]));
    }

    #[test]
    fn test_ucb_prefers_higher_average_with_equal_visits() {
        let (mut tree, children) = tree_with_children(2);
        backpropagate(&mut tree, children[0], 10.0);
        backpropagate(&mut tree, children[1], 50.0);
        assert_eq!(select_best_child(&tree, tree.root(), 1.4), Some(children[1]));
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let (mut tree, children) = tree_with_children(1);
        let mut rng = StdRng::seed_from_u64(1);
        let grandchild = tree.expand(children[0], &mut rng).unwrap();
        backpropagate(&mut tree, grandchild, 30.0);
        for id in [grandchild, children[0], tree.root()] {
            assert_eq!(tree.get(id).visit_count, 1);
            assert_eq!(tree.get(id).total_score, 30.0);
        }
    }

    #[test]
    fn test_select_leaf_stops_at_unexpanded_root() {
        let (tree, _) = tree_with_children(3);
        assert_eq!(select_leaf(&tree, 1.4), tree.root());
    }
}
