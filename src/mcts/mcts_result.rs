use crate::game::action::Action;
use serde::{Deserialize, Serialize};

/// A root child as seen after the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAction {
    pub action: Action,
    pub visits: u32,
    pub average_score: f64,
}

/// Outcome of one decision, for telemetry and game records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_action: Action,
    /// Most visited root children first.
    pub candidates: Vec<CandidateAction>,
    pub iterations: usize,
    pub tree_size: usize,
}
