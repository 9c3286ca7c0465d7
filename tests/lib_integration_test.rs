//! Integration tests for the Calico library public API

use calico_mcts::{
    CalicoError, EngineConfig, GameOptions, GameState, Result, SearchConfig, TurnPhase,
    DESCRIPTION, NAME, VERSION,
};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "calico_mcts");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_types() {
    let config_error = CalicoError::Config("bad value".to_string());
    assert!(matches!(config_error, CalicoError::Config(_)));
    assert_eq!(config_error.to_string(), "Configuration error: bad value");

    let io_error: CalicoError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io_error, CalicoError::Io(_)));
}

#[test]
fn test_result_type() {
    fn load(json: &str) -> Result<EngineConfig> {
        EngineConfig::from_json_str(json)
    }
    assert!(load("{}").is_ok());
    assert!(load("[]").is_err());
}

#[test]
fn test_new_game_defaults() {
    let state = GameState::new(&GameOptions::default(), 0);
    assert_eq!(state.phase(), TurnPhase::GoalSelection);
    assert_eq!(state.empty_count(), 22);
    assert_eq!(state.legal_actions().len(), 24);
    assert!(SearchConfig::default().validate().is_ok());
}
