use crate::game::tile::{Color, Pattern, Tile, COPIES_PER_COMBINATION};
use rand::seq::SliceRandom;
use rand::Rng;

/// Full supply: every color/pattern combination, three times.
pub const BAG_SIZE: usize = Color::ALL.len() * Pattern::ALL.len() * COPIES_PER_COMBINATION;

/// Face-down tile supply. The order of the remaining tiles is hidden
/// information; search copies reshuffle it with [`TileBag::shuffle_remaining`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    /// Fresh, shuffled bag of [`BAG_SIZE`] tiles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = Vec::with_capacity(BAG_SIZE);
        for color in Color::ALL {
            for pattern in Pattern::ALL {
                for _ in 0..COPIES_PER_COMBINATION {
                    tiles.push(Tile::new(color, pattern));
                }
            }
        }
        tiles.shuffle(rng);
        TileBag { tiles }
    }

    /// Bag holding exactly `tiles`, drawn from the back.
    #[cfg(test)]
    pub(crate) fn from_tiles(tiles: Vec<Tile>) -> Self {
        TileBag { tiles }
    }

    /// Removes the next tile, or `None` once the bag is exhausted.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn shuffle_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
