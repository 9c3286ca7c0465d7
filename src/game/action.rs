use crate::game::hex::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a turn is one place-and-choose action or two separate steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionMode {
    #[default]
    Separate,
    Combined,
}

/// A player decision. Each variant carries only the indices needed to replay it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// `goals[i]` is the index into the offered goal options placed on the
    /// i-th goal position.
    SelectGoals { goals: [usize; 3] },
    PlaceTile {
        position: Position,
        hand_index: usize,
    },
    ChooseMarket { market_index: usize },
    /// Atomic turn. `market_index` is `None` when the placement fills the
    /// board (or the market is empty).
    PlaceAndChoose {
        position: Position,
        hand_index: usize,
        market_index: Option<usize>,
    },
}

impl Action {
    pub fn is_goal_selection(&self) -> bool {
        matches!(self, Action::SelectGoals { .. })
    }

    pub fn is_combined(&self) -> bool {
        matches!(self, Action::PlaceAndChoose { .. })
    }

    /// Combined action with no market step.
    pub fn is_final_turn(&self) -> bool {
        matches!(
            self,
            Action::PlaceAndChoose {
                market_index: None,
                ..
            }
        )
    }

    /// Board position this action places on, if any.
    pub fn position(&self) -> Option<Position> {
        match *self {
            Action::PlaceTile { position, .. } | Action::PlaceAndChoose { position, .. } => {
                Some(position)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SelectGoals { goals } => write!(f, "select goals {:?}", goals),
            Action::PlaceTile {
                position,
                hand_index,
            } => write!(f, "place hand[{}] at {}", hand_index, position),
            Action::ChooseMarket { market_index } => write!(f, "take market[{}]", market_index),
            Action::PlaceAndChoose {
                position,
                hand_index,
                market_index: Some(m),
            } => write!(f, "place hand[{}] at {}, take market[{}]", hand_index, position, m),
            Action::PlaceAndChoose {
                position,
                hand_index,
                market_index: None,
            } => write!(f, "place hand[{}] at {} (final)", hand_index, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_turn_flag() {
        let pos = Position::new(0, 0);
        let last = Action::PlaceAndChoose {
            position: pos,
            hand_index: 1,
            market_index: None,
        };
        let normal = Action::PlaceAndChoose {
            position: pos,
            hand_index: 1,
            market_index: Some(2),
        };
        assert!(last.is_final_turn());
        assert!(!normal.is_final_turn());
        assert!(normal.is_combined());
        assert_eq!(last.position(), Some(pos));
        assert_eq!(Action::ChooseMarket { market_index: 0 }.position(), None);
    }

    #[test]
    fn test_action_json_is_tagged() {
        let action = Action::ChooseMarket { market_index: 2 };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"choose_market\""));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
