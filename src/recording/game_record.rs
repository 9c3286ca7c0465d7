//! Game record data structures.

use crate::game::action::Action;
use crate::game::game_state::{GameState, StateSnapshot, TurnPhase};
use crate::game::layouts::BoardLayout;
use crate::mcts::mcts_result::{CandidateAction, SearchResult};
use crate::scoring::creature::Creature;
use crate::scoring::goal::{Goal, GoalKind};
use crate::scoring::ScoreBreakdown;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One decision taken by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub turn: usize,
    pub phase: TurnPhase,
    /// Hand, market, board and bag count before the action.
    pub state: StateSnapshot,
    pub action: Action,
    /// Most visited root children, best first.
    pub candidates: Vec<CandidateAction>,
    pub tree_size: usize,
    pub elapsed_ms: u64,
}

impl DecisionRecord {
    /// Call before applying `result.best_action` to `state`.
    pub fn from_search(state: &GameState, result: SearchResult, elapsed_ms: u64) -> Self {
        DecisionRecord {
            turn: state.turn_number(),
            phase: state.phase(),
            state: state.snapshot(),
            action: result.best_action,
            candidates: result.candidates,
            tree_size: result.tree_size,
            elapsed_ms,
        }
    }
}

/// Complete record of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique game identifier
    pub game_id: String,
    /// Game start, seconds since the Unix epoch
    pub timestamp: i64,
    pub seed: u64,
    /// Compact search configuration tag
    pub config: String,
    pub layout: BoardLayout,
    pub creatures: Vec<Creature>,
    pub goal_options: Vec<GoalKind>,
    /// Goals as placed; empty until the goal selection is recorded.
    pub goals: Vec<Goal>,
    pub decisions: Vec<DecisionRecord>,
    pub breakdown: Option<ScoreBreakdown>,
    pub final_score: u32,
}

impl GameRecord {
    /// Starts a record for a freshly dealt game.
    pub fn new(state: &GameState, seed: u64, config: String, layout: BoardLayout) -> Self {
        Self {
            game_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            seed,
            config,
            layout,
            creatures: state.creatures().to_vec(),
            goal_options: state.goal_options().to_vec(),
            goals: state.goals().to_vec(),
            decisions: Vec::new(),
            breakdown: None,
            final_score: 0,
        }
    }

    pub fn record_decision(&mut self, decision: DecisionRecord) {
        self.decisions.push(decision);
    }

    /// Copies the placed goals and the final breakdown from `state`.
    pub fn finalize(&mut self, state: &GameState) {
        let breakdown = state.score_breakdown();
        self.goals = state.goals().to_vec();
        self.final_score = breakdown.total();
        self.breakdown = Some(breakdown);
    }

    pub fn is_finished(&self) -> bool {
        self.breakdown.is_some()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
