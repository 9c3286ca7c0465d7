use crate::game::action::ActionMode;
use crate::game::game_state::GameState;
use rand::Rng;

/// Uniform-random rollout on a resampled copy of `state`. Returns the final
/// score; `state` itself is left untouched.
pub fn simulate_games<R: Rng>(state: &GameState, mode: ActionMode, rng: &mut R) -> u32 {
    let mut simulated = state.fork_with(rng);
    simulated.play_random_game(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Action;
    use crate::game::options::GameOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rollout_leaves_state_untouched() {
        let mut state = GameState::new(&GameOptions::default(), 21);
        assert!(state.apply(Action::SelectGoals { goals: [3, 1, 0] }));
        let before = state.snapshot();

        let mut rng = StdRng::seed_from_u64(0);
        simulate_games(&state, ActionMode::Combined, &mut rng);
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_rollout_from_finished_game_is_final_score() {
        let mut state = GameState::new(&GameOptions::default(), 22);
        let score = state.play_random_game(ActionMode::Separate);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(simulate_games(&state, ActionMode::Separate, &mut rng), score);
    }
}
