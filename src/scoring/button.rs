//! Buttons: separated three-tile clusters of one color.

use crate::game::board::Board;
use crate::game::hex::CellId;
use crate::game::tile::{Color, Tile};
use crate::scoring::groups::GroupSearch;
use serde::{Deserialize, Serialize};

pub const BUTTON_POINTS: u32 = 3;
pub const RAINBOW_BONUS: u32 = 5;
pub const BUTTON_SIZE: usize = 3;

/// Button groups of `color`. Each color is searched with its own claims, so
/// buttons of different colors may touch.
pub fn find_button_groups(board: &Board, color: Color) -> Vec<Vec<CellId>> {
    GroupSearch::new(board, move |tile: Tile| tile.color == color).clusters(BUTTON_SIZE)
}

/// Buttons per color, indexed by [`Color::index`].
pub fn count_buttons_by_color(board: &Board) -> [usize; 6] {
    Color::ALL.map(|color| find_button_groups(board, color).len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonBreakdown {
    pub by_color: [usize; 6],
    pub total_buttons: usize,
    pub button_score: u32,
    pub has_rainbow: bool,
    pub rainbow_score: u32,
}

impl ButtonBreakdown {
    pub fn from_counts(by_color: [usize; 6]) -> Self {
        let total_buttons = by_color.iter().sum::<usize>();
        let has_rainbow = by_color.iter().all(|&c| c >= 1);
        ButtonBreakdown {
            by_color,
            total_buttons,
            button_score: total_buttons as u32 * BUTTON_POINTS,
            has_rainbow,
            rainbow_score: if has_rainbow { RAINBOW_BONUS } else { 0 },
        }
    }

    pub fn count(&self, color: Color) -> usize {
        self.by_color[color.index()]
    }

    pub fn colors_with_buttons(&self) -> usize {
        self.by_color.iter().filter(|&&c| c > 0).count()
    }

    pub fn total(&self) -> u32 {
        self.button_score + self.rainbow_score
    }
}

pub fn button_breakdown(board: &Board) -> ButtonBreakdown {
    ButtonBreakdown::from_counts(count_buttons_by_color(board))
}
