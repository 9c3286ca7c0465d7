//! Serializable records of played games.
//!
//! A [`GameRecord`] keeps the setup of a game, every decision the agent
//! made with its top candidates, and the final score breakdown. Records
//! are written as JSON.

pub mod game_record;

pub use game_record::{DecisionRecord, GameRecord};
