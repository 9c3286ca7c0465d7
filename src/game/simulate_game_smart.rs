use crate::game::action::{Action, ActionMode};
use crate::game::game_state::GameState;
use crate::strategy::heuristic::HeuristicEvaluator;
use rand::Rng;

/// Greedy rollout: at every step play the action whose resulting state the
/// heuristic rates highest. Works on a resampled copy of `state`.
pub fn simulate_games_smart<R: Rng>(
    state: &GameState,
    mode: ActionMode,
    evaluator: &HeuristicEvaluator,
    rng: &mut R,
) -> u32 {
    let mut simulated = state.fork_with(rng);
    while !simulated.is_game_over() {
        let actions = simulated.legal_actions_for(mode);
        let Some(action) = select_best_action_heuristic(&simulated, &actions, evaluator) else {
            break;
        };
        if !simulated.apply(action) {
            log::warn!("greedy rollout: legal action {} was rejected", action);
            break;
        }
    }
    simulated.final_score()
}

/// Highest-rated action; ties keep the earliest.
pub fn select_best_action_heuristic(
    state: &GameState,
    actions: &[Action],
    evaluator: &HeuristicEvaluator,
) -> Option<Action> {
    let mut best: Option<(Action, f64)> = None;
    for &action in actions {
        let mut next = state.clone();
        if !next.apply(action) {
            continue;
        }
        let value = evaluator.evaluate(&next);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((action, value)),
        }
    }
    best.map(|(action, _)| action)
}
