use crate::game::tile::Tile;
use crate::game::tile_bag::TileBag;

pub const MARKET_SIZE: usize = 3;

/// Face-up tiles the player picks from after each placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Market {
    tiles: Vec<Tile>,
}

impl Market {
    pub fn new() -> Self {
        Market {
            tiles: Vec::with_capacity(MARKET_SIZE),
        }
    }

    /// Tops the market back up to [`MARKET_SIZE`]. Stops early when the bag
    /// runs out; returns how many tiles were drawn.
    pub fn refill(&mut self, bag: &mut TileBag) -> usize {
        let mut drawn = 0;
        while self.tiles.len() < MARKET_SIZE {
            match bag.draw() {
                Some(tile) => {
                    self.tiles.push(tile);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Removes the tile in slot `index`. Out-of-range indices yield `None`.
    pub fn choose(&mut self, index: usize) -> Option<Tile> {
        (index < self.tiles.len()).then(|| self.tiles.remove(index))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
