use crate::game::layouts::BoardLayout;
use crate::scoring::creature::Creature;
use crate::scoring::goal::{GoalKind, GoalPointTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-game setup. Unset creature or goal choices are drawn at random.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub layout: BoardLayout,
    pub goal_points: GoalPointTable,
    /// Fixed creature assignment, for reproducible setups.
    pub creatures: Option<Vec<Creature>>,
    /// Fixed goal kinds offered during goal selection.
    pub goal_options: Option<Vec<GoalKind>>,
}

impl GameOptions {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(creatures) = &self.creatures {
            let patterns: Vec<_> = creatures.iter().flat_map(|c| c.patterns).collect();
            let unique: HashSet<_> = patterns.iter().collect();
            if unique.len() != patterns.len() {
                return Err("creatures must not share patterns".to_string());
            }
        }
        if let Some(options) = &self.goal_options {
            let unique: HashSet<_> = options.iter().collect();
            if unique.len() != options.len() {
                return Err("goal options must be distinct".to_string());
            }
            if options.len() < 3 {
                return Err(format!(
                    "at least 3 goal options are required, got {}",
                    options.len()
                ));
            }
        }
        Ok(())
    }
}
