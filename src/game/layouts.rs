//! Printed border layouts. Each one pre-fills the 22 rim cells of the quilt
//! board, leaving 22 cells for the player.

use crate::game::hex::Position;
use crate::game::tile::{Color, Pattern, Tile};
use serde::{Deserialize, Serialize};

use Color::*;
use Pattern::*;

type Cell = (Position, Tile);

const fn cell(q: i32, r: i32, s: i32, color: Color, pattern: Pattern) -> Cell {
    (Position::from_cube(q, r, s), Tile::new(color, pattern))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardLayout {
    #[default]
    Teal,
    Yellow,
    Purple,
    Green,
}

impl BoardLayout {
    pub const ALL: [BoardLayout; 4] = [
        BoardLayout::Teal,
        BoardLayout::Yellow,
        BoardLayout::Purple,
        BoardLayout::Green,
    ];

    pub fn border_tiles(self) -> impl Iterator<Item = (Position, Tile)> {
        let cells: &'static [Cell] = match self {
            BoardLayout::Teal => &TEAL_BORDER,
            BoardLayout::Yellow => &YELLOW_BORDER,
            BoardLayout::Purple => &PURPLE_BORDER,
            BoardLayout::Green => &GREEN_BORDER,
        };
        cells.iter().copied()
    }

    pub fn border_positions(self) -> Vec<Position> {
        self.border_tiles().map(|(pos, _)| pos).collect()
    }
}

const TEAL_BORDER: [Cell; 22] = [
    cell(-1, 4, -3, Yellow, Stripes),
    cell(0, 3, -3, Teal, Swirls),
    cell(1, 2, -3, Pink, Leaves),
    cell(2, 1, -3, Purple, Clubs),
    cell(3, 0, -3, Yellow, Flowers),
    cell(4, -1, -3, Green, Stripes),
    cell(4, -2, -2, Blue, Dots),
    cell(3, -2, -1, Purple, Swirls),
    cell(3, -3, 0, Yellow, Leaves),
    cell(2, -3, 1, Green, Clubs),
    cell(2, -4, 2, Blue, Flowers),
    cell(1, -4, 3, Teal, Stripes),
    cell(0, -3, 3, Pink, Dots),
    cell(-1, -2, 3, Green, Swirls),
    cell(-2, -1, 3, Blue, Leaves),
    cell(-3, 0, 3, Pink, Flowers),
    cell(-4, 1, 3, Teal, Clubs),
    cell(-4, 2, 2, Yellow, Dots),
    cell(-4, 3, 1, Purple, Stripes),
    cell(-3, 3, 0, Teal, Leaves),
    cell(-3, 4, -1, Blue, Clubs),
    cell(-2, 4, -2, Green, Leaves),
];

const YELLOW_BORDER: [Cell; 22] = [
    cell(-1, 4, -3, Blue, Flowers),
    cell(0, 3, -3, Yellow, Stripes),
    cell(1, 2, -3, Purple, Dots),
    cell(2, 1, -3, Blue, Swirls),
    cell(3, 0, -3, Green, Leaves),
    cell(4, -1, -3, Pink, Clubs),
    cell(4, -2, -2, Teal, Swirls),
    cell(3, -2, -1, Blue, Stripes),
    cell(3, -3, 0, Green, Dots),
    cell(2, -3, 1, Pink, Swirls),
    cell(2, -4, 2, Teal, Leaves),
    cell(1, -4, 3, Yellow, Clubs),
    cell(0, -3, 3, Purple, Flowers),
    cell(-1, -2, 3, Pink, Stripes),
    cell(-2, -1, 3, Blue, Dots),
    cell(-3, 0, 3, Yellow, Swirls),
    cell(-4, 1, 3, Purple, Leaves),
    cell(-4, 2, 2, Blue, Clubs),
    cell(-4, 3, 1, Green, Flowers),
    cell(-3, 3, 0, Yellow, Dots),
    cell(-3, 4, -1, Purple, Swirls),
    cell(-2, 4, -2, Pink, Leaves),
];

const PURPLE_BORDER: [Cell; 22] = [
    cell(-1, 4, -3, Pink, Dots),
    cell(0, 3, -3, Purple, Flowers),
    cell(1, 2, -3, Yellow, Leaves),
    cell(2, 1, -3, Teal, Stripes),
    cell(3, 0, -3, Pink, Clubs),
    cell(4, -1, -3, Green, Dots),
    cell(4, -2, -2, Blue, Swirls),
    cell(3, -2, -1, Teal, Flowers),
    cell(3, -3, 0, Pink, Leaves),
    cell(2, -3, 1, Green, Stripes),
    cell(2, -4, 2, Blue, Clubs),
    cell(1, -4, 3, Purple, Dots),
    cell(0, -3, 3, Yellow, Swirls),
    cell(-1, -2, 3, Green, Flowers),
    cell(-2, -1, 3, Blue, Leaves),
    cell(-3, 0, 3, Purple, Stripes),
    cell(-4, 1, 3, Yellow, Clubs),
    cell(-4, 2, 2, Teal, Dots),
    cell(-4, 3, 1, Pink, Swirls),
    cell(-3, 3, 0, Green, Leaves),
    cell(-3, 4, -1, Blue, Stripes),
    cell(-2, 4, -2, Teal, Clubs),
];

const GREEN_BORDER: [Cell; 22] = [
    cell(-1, 4, -3, Yellow, Swirls),
    cell(0, 3, -3, Green, Leaves),
    cell(1, 2, -3, Blue, Stripes),
    cell(2, 1, -3, Purple, Clubs),
    cell(3, 0, -3, Yellow, Dots),
    cell(4, -1, -3, Teal, Swirls),
    cell(4, -2, -2, Pink, Flowers),
    cell(3, -2, -1, Purple, Leaves),
    cell(3, -3, 0, Yellow, Stripes),
    cell(2, -3, 1, Teal, Clubs),
    cell(2, -4, 2, Pink, Dots),
    cell(1, -4, 3, Green, Swirls),
    cell(0, -3, 3, Blue, Flowers),
    cell(-1, -2, 3, Teal, Leaves),
    cell(-2, -1, 3, Pink, Stripes),
    cell(-3, 0, 3, Green, Clubs),
    cell(-4, 1, 3, Blue, Dots),
    cell(-4, 2, 2, Purple, Swirls),
    cell(-4, 3, 1, Yellow, Flowers),
    cell(-3, 3, 0, Teal, Stripes),
    cell(-3, 4, -1, Pink, Clubs),
    cell(-2, 4, -2, Purple, Dots),
];
