//! Final scoring: creatures, goals and buttons, each computed independently
//! from a read-only board.

pub mod button;
pub mod creature;
pub mod goal;
pub mod groups;

use crate::game::board::Board;
use crate::game::hex::Position;
use crate::scoring::button::{button_breakdown, ButtonBreakdown};
use crate::scoring::creature::{Creature, CreatureKind};
use crate::scoring::goal::{Goal, GoalKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureScore {
    pub kind: CreatureKind,
    pub groups: usize,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalScore {
    pub kind: GoalKind,
    pub position: Position,
    pub score: u32,
}

/// Per-category scores. `total()` is the game's final score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub creatures: Vec<CreatureScore>,
    pub goals: Vec<GoalScore>,
    pub buttons: ButtonBreakdown,
}

impl ScoreBreakdown {
    pub fn creature_total(&self) -> u32 {
        self.creatures.iter().map(|c| c.score).sum()
    }

    pub fn goal_total(&self) -> u32 {
        self.goals.iter().map(|g| g.score).sum()
    }

    pub fn button_total(&self) -> u32 {
        self.buttons.total()
    }

    pub fn total(&self) -> u32 {
        self.creature_total() + self.goal_total() + self.button_total()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.creatures {
            writeln!(f, "  {:<10} {:>3} ({} groups)", c.kind.name(), c.score, c.groups)?;
        }
        for g in &self.goals {
            writeln!(f, "  {:<10} {:>3} at {}", g.kind.name(), g.score, g.position)?;
        }
        writeln!(
            f,
            "  {:<10} {:>3} ({} buttons{})",
            "Buttons",
            self.buttons.total(),
            self.buttons.total_buttons,
            if self.buttons.has_rainbow { ", rainbow" } else { "" }
        )?;
        write!(f, "  {:<10} {:>3}", "Total", self.total())
    }
}

pub fn score_board(board: &Board, creatures: &[Creature], goals: &[Goal]) -> ScoreBreakdown {
    let creatures = creatures
        .iter()
        .map(|creature| {
            let groups = creature.find_groups(board).len();
            CreatureScore {
                kind: creature.kind,
                groups,
                score: groups as u32 * creature.points(),
            }
        })
        .collect();
    let goals = goals
        .iter()
        .map(|goal| GoalScore {
            kind: goal.kind,
            position: goal.position,
            score: goal.score(board),
        })
        .collect();
    ScoreBreakdown {
        creatures,
        goals,
        buttons: button_breakdown(board),
    }
}

pub fn final_score(board: &Board, creatures: &[Creature], goals: &[Goal]) -> u32 {
    score_board(board, creatures, goals).total()
}
