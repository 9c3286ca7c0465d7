//! Engine configuration.
//!
//! An [`EngineConfig`] bundles the search parameters and the game setup.
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! { "search": { "iterations": 2000, "action_mode": "combined" },
//!   "game": { "layout": "purple" } }
//! ```

use crate::game::options::GameOptions;
use crate::mcts::hyperparameters::SearchConfig;
use crate::{CalicoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub game: GameOptions,
}

impl EngineConfig {
    /// Reads and validates a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate().map_err(CalicoError::Config)?;
        self.game.validate().map_err(CalicoError::Config)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::ActionMode;
    use crate::game::layouts::BoardLayout;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "search": {{ "iterations": 250, "action_mode": "combined" }}, "game": {{ "layout": "purple" }} }}"#
        )
        .unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.search.iterations, 250);
        assert_eq!(config.search.action_mode, ActionMode::Combined);
        assert_eq!(config.search.exploration_constant, 1.4);
        assert_eq!(config.game.layout, BoardLayout::Purple);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let result = EngineConfig::from_json_str(r#"{ "search": { "exploration_constant": -1.0 } }"#);
        assert_matches!(result, Err(CalicoError::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert_matches!(EngineConfig::from_json_str("{ search"), Err(CalicoError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::from_json_file(dir.path().join("absent.json"));
        assert_matches!(result, Err(CalicoError::Io(_)));
    }

    #[test]
    fn test_default_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }
}
