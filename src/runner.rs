//! Self-play driver.
//!
//! Each game owns its state, agent and random streams, so independent
//! games can run on the rayon pool without sharing anything.

use crate::game::game_state::GameState;
use crate::game::options::GameOptions;
use crate::mcts::algorithm::MctsAgent;
use crate::mcts::hyperparameters::SearchConfig;
use crate::recording::{DecisionRecord, GameRecord};
use rayon::prelude::*;
use std::time::Instant;

/// Keeps the agent's random stream apart from the game's.
const AGENT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Plays one full game with a fresh agent and returns its record.
pub fn play_game(options: &GameOptions, config: &SearchConfig, seed: u64) -> GameRecord {
    let mut state = GameState::new(options, seed);
    let mut agent = MctsAgent::with_seed(config.clone(), seed ^ AGENT_SEED_SALT);
    let mut record = GameRecord::new(&state, seed, config.to_config_string(), options.layout);

    while !state.is_game_over() {
        let started = Instant::now();
        let Some(result) = agent.select_action_with_analysis(&state) else {
            log::warn!("game {}: no legal action at turn {}", seed, state.turn_number());
            break;
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let action = result.best_action;
        record.record_decision(DecisionRecord::from_search(&state, result, elapsed_ms));

        if let Err(e) = state.try_apply(action) {
            log::warn!("game {}: chosen action {} rejected: {}", seed, action, e);
            break;
        }
    }

    record.finalize(&state);
    log::debug!(
        "game {} finished: {} points over {} decisions",
        seed,
        record.final_score,
        record.decisions.len()
    );
    record
}

/// Plays one game per seed in parallel. Records come back in seed order.
pub fn play_games(options: &GameOptions, config: &SearchConfig, seeds: &[u64]) -> Vec<GameRecord> {
    seeds
        .par_iter()
        .map(|&seed| play_game(options, config, seed))
        .collect()
}

/// Mean, spread and range of a set of final scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub games: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

impl ScoreSummary {
    pub fn from_scores(scores: &[u32]) -> Option<Self> {
        let min = *scores.iter().min()?;
        let max = *scores.iter().max()?;
        let n = scores.len() as f64;
        let mean = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / n;
        let variance = scores
            .iter()
            .map(|&s| {
                let diff = f64::from(s) - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        Some(ScoreSummary {
            games: scores.len(),
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

impl std::fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean = {:>6.2}, std = {:>6.2}, min = {:>4}, max = {:>4} ({} games)",
            self.mean, self.std_dev, self.min, self.max, self.games
        )
    }
}
