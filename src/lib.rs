//! # Calico MCTS
//!
//! Rules engine and Monte Carlo Tree Search agent for the Calico
//! tile-placement game, played solo against three simulated opponents
//! who only discard from the market.
//!
//! ## Features
//!
//! - **Game Engine**: hex board topology, rim layouts, tile bag, market and
//!   the turn state machine
//! - **Scoring**: creatures, goal tiles and buttons with a full breakdown
//! - **Heuristic**: partial-credit evaluation of unfinished boards
//! - **AI Engine**: UCB1 tree search with heuristic leaves and late-game
//!   rollouts
//! - **Runner**: sequential or parallel self-play with JSON game records
//!
//! ## Usage
//!
//! ```no_run
//! use calico_mcts::{GameOptions, GameState, MctsAgent, SearchConfig};
//!
//! let mut state = GameState::new(&GameOptions::default(), 42);
//! let mut agent = MctsAgent::with_seed(SearchConfig::default(), 42);
//! while let Some(action) = agent.select_action(&state) {
//!     state.apply(action);
//! }
//! println!("final score: {}", state.final_score());
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Monte Carlo Tree Search AI engine
pub mod mcts;

/// Creature, goal and button scoring
pub mod scoring;

/// Board evaluation for search leaves
pub mod strategy;

/// Serializable game records
pub mod recording;

/// Self-play driver
pub mod runner;

/// Engine configuration files
pub mod config;

/// Logger setup for binaries
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use config::EngineConfig;
pub use game::action::{Action, ActionMode};
pub use game::game_state::{ActionError, GameState, StateSnapshot, TurnPhase};
pub use game::options::GameOptions;
pub use mcts::algorithm::MctsAgent;
pub use mcts::hyperparameters::SearchConfig;
pub use mcts::mcts_result::{CandidateAction, SearchResult};
pub use recording::{DecisionRecord, GameRecord};
pub use scoring::ScoreBreakdown;
pub use strategy::heuristic::{HeuristicConfig, HeuristicEvaluator};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Calico library
#[derive(Debug, thiserror::Error)]
pub enum CalicoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CalicoError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
