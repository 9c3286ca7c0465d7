//! Greedy group discovery shared by creature and button scoring.
//!
//! A search walks cells in scan order and keeps the first group it finds,
//! claiming its cells. Later candidates may neither reuse a claimed cell nor
//! touch one. Claims live only as long as the [`GroupSearch`] value.

use crate::game::board::Board;
use crate::game::hex::CellId;
use crate::game::tile::Tile;

pub struct GroupSearch<'a, F> {
    board: &'a Board,
    matches: F,
    claimed: Vec<bool>,
}

impl<'a, F> GroupSearch<'a, F>
where
    F: Fn(Tile) -> bool,
{
    pub fn new(board: &'a Board, matches: F) -> Self {
        let claimed = vec![false; board.topology().len()];
        GroupSearch {
            board,
            matches,
            claimed,
        }
    }

    fn is_match(&self, id: CellId) -> bool {
        !self.claimed[id] && self.board.tile_at(id).is_some_and(|tile| (self.matches)(tile))
    }

    fn touches_claimed(&self, group: &[CellId]) -> bool {
        let topology = self.board.topology();
        group
            .iter()
            .any(|&id| topology.neighbor_ids(id).iter().any(|&n| self.claimed[n]))
    }

    fn claim(&mut self, group: &[CellId]) {
        for &id in group {
            self.claimed[id] = true;
        }
    }

    /// Connected groups of exactly `size` matching cells.
    ///
    /// Candidates from each start cell are produced by a depth-first walk
    /// over neighbors; the first one clear of claimed cells wins.
    pub fn clusters(mut self, size: usize) -> Vec<Vec<CellId>> {
        let mut groups = Vec::new();
        if size == 0 {
            return groups;
        }
        for start in 0..self.claimed.len() {
            if !self.is_match(start) {
                continue;
            }
            let mut path = Vec::with_capacity(size);
            if let Some(group) = self.first_cluster_from(start, size, &mut path) {
                self.claim(&group);
                groups.push(group);
            }
        }
        groups
    }

    fn first_cluster_from(
        &self,
        id: CellId,
        size: usize,
        path: &mut Vec<CellId>,
    ) -> Option<Vec<CellId>> {
        if path.contains(&id) || !self.is_match(id) {
            return None;
        }
        path.push(id);
        let found = if path.len() == size {
            (!self.touches_claimed(path)).then(|| path.clone())
        } else {
            self.board
                .topology()
                .neighbor_ids(id)
                .iter()
                .find_map(|&next| self.first_cluster_from(next, size, path))
        };
        path.pop();
        found
    }

    /// Straight lines of exactly `length` matching cells, in line-cache order
    /// (start cell, then direction).
    pub fn lines(mut self, length: usize) -> Vec<Vec<CellId>> {
        let board = self.board;
        let mut groups = Vec::new();
        for line in board.topology().lines(length) {
            if line.iter().all(|&id| self.is_match(id)) && !self.touches_claimed(line) {
                self.claim(line);
                groups.push(line.clone());
            }
        }
        groups
    }
}
