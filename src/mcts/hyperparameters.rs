//! Search configuration.
//!
//! Defaults follow the tuned baseline: 1000 iterations, exploration 1.4,
//! full rollouts only for the last five empty cells and heuristic evaluation
//! before that.

use crate::game::action::ActionMode;
use crate::strategy::heuristic::HeuristicConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Select/expand/simulate/backpropagate rounds per decision.
    /// Default: 1000
    pub iterations: usize,

    /// UCB1 exploration constant C.
    /// Default: 1.4
    pub exploration_constant: f64,

    /// Empty cells at or below which leaves are scored by full rollouts.
    /// Default: 5
    pub late_game_threshold: usize,

    /// Evaluate non-late leaves with the heuristic instead of a rollout.
    /// Default: true
    pub use_heuristic: bool,

    /// Greedy heuristic rollouts instead of uniform-random ones.
    /// Default: false
    pub deterministic_rollout: bool,

    /// Separate place/choose steps or one combined action per turn.
    /// Default: separate
    pub action_mode: ActionMode,

    /// Category weights of the heuristic evaluator.
    pub heuristic: HeuristicConfig,

    /// Top root children reported by the analysis variant.
    /// Default: 5
    pub candidates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: 1.4,
            late_game_threshold: 5,
            use_heuristic: true,
            deterministic_rollout: false,
            action_mode: ActionMode::Separate,
            heuristic: HeuristicConfig::default(),
            candidates: 5,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(format!(
                "exploration_constant must be a non-negative number, got {}",
                self.exploration_constant
            ));
        }
        if self.candidates == 0 {
            return Err("candidates must report at least one action".to_string());
        }
        self.heuristic.validate()
    }

    /// Compact tag for logs and game records.
    pub fn to_config_string(&self) -> String {
        format!(
            "iter{}_c{:.2}_late{}_heur{}_det{}_{}_w[{:.2},{:.2}]_gd{:.2}_rb{:.2}",
            self.iterations,
            self.exploration_constant,
            self.late_game_threshold,
            u8::from(self.use_heuristic),
            u8::from(self.deterministic_rollout),
            match self.action_mode {
                ActionMode::Separate => "separate",
                ActionMode::Combined => "combined",
            },
            self.heuristic.cat_weight,
            self.heuristic.button_weight,
            self.heuristic.goal_discount,
            self.heuristic.rainbow_progress_bonus,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.late_game_threshold, 5);
    }

    #[test]
    fn test_negative_exploration_is_rejected() {
        let config = SearchConfig {
            exploration_constant: -1.0,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_candidates_is_rejected() {
        let config = SearchConfig {
            candidates: 0,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_string() {
        let config = SearchConfig::default();
        let tag = config.to_config_string();
        assert!(tag.starts_with("iter1000_c1.40_late5_heur1_det0_separate"));
        assert!(tag.contains("w[1.00,1.00]"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"iterations": 50, "action_mode": "combined"}"#).unwrap();
        assert_eq!(config.iterations, 50);
        assert_eq!(config.action_mode, ActionMode::Combined);
        assert_eq!(config.exploration_constant, 1.4);
    }
}
