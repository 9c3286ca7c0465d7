use crate::game::hex::{BoardTopology, CellId, Position};
use crate::game::layouts::BoardLayout;
use crate::game::tile::Tile;
use std::fmt;
use std::sync::Arc;

/// Cell contents over a shared, immutable [`BoardTopology`].
///
/// Cloning a board copies the cell vector only; the topology is shared.
#[derive(Debug, Clone)]
pub struct Board {
    topology: Arc<BoardTopology>,
    cells: Vec<Option<Tile>>,
}

impl Board {
    pub fn new(topology: Arc<BoardTopology>) -> Self {
        let cells = vec![None; topology.len()];
        Board { topology, cells }
    }

    /// Board with the rim of `layout` pre-filled.
    pub fn with_layout(topology: Arc<BoardTopology>, layout: BoardLayout) -> Self {
        let mut board = Board::new(topology);
        for (pos, tile) in layout.border_tiles() {
            if !board.place(pos, tile) {
                log::warn!("layout {:?} cell {} is not playable", layout, pos);
            }
        }
        board
    }

    pub fn topology(&self) -> &Arc<BoardTopology> {
        &self.topology
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        self.topology.is_valid(pos)
    }

    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        self.topology.neighbors(pos)
    }

    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.topology.cell_id(pos).and_then(|id| self.cells[id])
    }

    pub fn tile_at(&self, id: CellId) -> Option<Tile> {
        self.cells[id]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.topology
            .cell_id(pos)
            .is_some_and(|id| self.cells[id].is_none())
    }

    /// Puts `tile` on an empty playable cell. Returns false (and leaves the
    /// board untouched) for unknown, goal or occupied positions.
    pub fn place(&mut self, pos: Position, tile: Tile) -> bool {
        match self.topology.cell_id(pos) {
            Some(id) if self.cells[id].is_none() => {
                self.cells[id] = Some(tile);
                true
            }
            _ => false,
        }
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(id, _)| self.topology.position(id))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Filled cells as `(position, tile)`, in scan order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(id, cell)| cell.map(|tile| (self.topology.position(id), tile)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in -4..=4 {
            write!(f, "{}", " ".repeat((4 - i32::abs(r)) as usize))?;
            for q in -4..=4 {
                let pos = Position::new(q, r);
                if self.topology.is_goal_position(pos) {
                    write!(f, "** ")?;
                } else if self.is_valid(pos) {
                    match self.tile(pos) {
                        Some(tile) => write!(f, "{} ", tile)?,
                        None => write!(f, ".. ")?,
                    }
                } else if pos.s.abs() <= 4 {
                    write!(f, "   ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
