//! End-to-end checks of the search agent.

use calico_mcts::runner::play_game;
use calico_mcts::strategy::heuristic::HeuristicEvaluator;
use calico_mcts::{Action, ActionMode, GameOptions, GameState, MctsAgent, SearchConfig};

fn config(iterations: usize, mode: ActionMode) -> SearchConfig {
    SearchConfig {
        iterations,
        action_mode: mode,
        ..SearchConfig::default()
    }
}

#[test]
fn test_agent_plays_a_full_separate_game() {
    let mut state = GameState::new(&GameOptions::default(), 31);
    let mut agent = MctsAgent::with_seed(config(20, ActionMode::Separate), 31);
    while let Some(action) = agent.select_action(&state) {
        assert!(state.legal_actions().contains(&action));
        assert!(state.apply(action));
    }
    assert!(state.is_game_over());
    assert!(matches!(state.history()[0], Action::SelectGoals { .. }));
}

#[test]
fn test_agent_is_reproducible_with_a_seed() {
    let mut state = GameState::new(&GameOptions::default(), 8);
    assert!(state.apply(Action::SelectGoals { goals: [3, 1, 0] }));
    let pick = |seed| MctsAgent::with_seed(config(150, ActionMode::Combined), seed).select_action(&state);
    assert_eq!(pick(99), pick(99));
}

#[test]
fn test_heuristic_estimate_matches_score_at_game_end() {
    let record = play_game(&GameOptions::default(), &config(10, ActionMode::Combined), 44);
    assert!(record.is_finished());

    let mut state = GameState::new(&GameOptions::default(), 44);
    for decision in &record.decisions {
        assert!(state.apply(decision.action));
    }
    assert!(state.is_game_over());
    assert_eq!(state.final_score(), record.final_score);

    let evaluator = HeuristicEvaluator::default();
    assert_eq!(evaluator.evaluate(&state), f64::from(record.final_score));
}
