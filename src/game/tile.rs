use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of copies of every (color, pattern) combination in a fresh bag.
pub const COPIES_PER_COMBINATION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Pink,
    Blue,
    Green,
    Yellow,
    Purple,
    Teal,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Pink,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Teal,
    ];

    /// Dense index in `0..6`, used for per-color tallies.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Pink => "PINK",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Purple => "PURPLE",
            Color::Teal => "TEAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Dots,
    Stripes,
    Flowers,
    Leaves,
    Clubs,
    Swirls,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Dots,
        Pattern::Stripes,
        Pattern::Flowers,
        Pattern::Leaves,
        Pattern::Clubs,
        Pattern::Swirls,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Dots => "DOTS",
            Pattern::Stripes => "STRIPES",
            Pattern::Flowers => "FLOWERS",
            Pattern::Leaves => "LEAVES",
            Pattern::Clubs => "CLUBS",
            Pattern::Swirls => "SWIRLS",
        }
    }
}

/// A patch tile. Tiles are plain values: whichever container holds one owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub color: Color,
    pub pattern: Pattern,
}

impl Tile {
    pub const fn new(color: Color, pattern: Pattern) -> Self {
        Tile { color, pattern }
    }
}

impl fmt::Display for Tile {
    /// Two-letter short form, e.g. `BD` for a blue dots tile.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            &self.color.name()[..1],
            &self.pattern.name()[..1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
        for (i, pattern) in Pattern::ALL.iter().enumerate() {
            assert_eq!(pattern.index(), i);
        }
    }

    #[test]
    fn test_tile_display() {
        let tile = Tile::new(Color::Blue, Pattern::Dots);
        assert_eq!(tile.to_string(), "BD");
    }
}
