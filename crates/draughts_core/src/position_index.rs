//! Derived lookup tables over a board's piece collection.
//!
//! The index is thrown away and rebuilt from scratch whenever the board
//! commits a mutation. Everything in it refers to pieces by their slot in the
//! board's (position-sorted) piece vector.

use crate::piece::Piece;
use crate::types::{PieceId, Player, Square};

#[derive(Clone, Debug, Default)]
pub struct PositionIndex {
    uncaptured: Vec<usize>,
    filled_positions: Vec<Square>,
    open_positions: Vec<Square>,
    player_positions: [Vec<Square>; 2],
    player_pieces: [Vec<usize>; 2],
    /// Indexed by square; slot 0 is unused.
    position_pieces: Vec<Option<usize>>,
    /// Indexed by `PieceId`.
    slots: Vec<usize>,
}

impl PositionIndex {
    pub fn build(pieces: &[Piece], position_count: usize) -> Self {
        let mut index = PositionIndex::default();
        index.uncaptured = pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.captured)
            .map(|(slot, _)| slot)
            .collect();

        index.build_filled_positions(pieces);
        index.build_open_positions(position_count);
        index.build_player_positions(pieces);
        index.build_player_pieces(pieces);
        index.build_position_pieces(pieces, position_count);
        index.build_slots(pieces);

        tracing::trace!(
            pieces = index.uncaptured.len(),
            open = index.open_positions.len(),
            "rebuilt position index"
        );
        index
    }

    fn build_filled_positions(&mut self, pieces: &[Piece]) {
        self.filled_positions = self
            .uncaptured
            .iter()
            .filter_map(|&slot| pieces[slot].position)
            .collect();
    }

    fn build_open_positions(&mut self, position_count: usize) {
        self.open_positions = (1..=position_count as Square)
            .filter(|sq| !self.filled_positions.contains(sq))
            .collect();
    }

    fn build_player_positions(&mut self, pieces: &[Piece]) {
        for &slot in &self.uncaptured {
            let piece = &pieces[slot];
            if let Some(sq) = piece.position {
                self.player_positions[piece.player.idx()].push(sq);
            }
        }
    }

    fn build_player_pieces(&mut self, pieces: &[Piece]) {
        for &slot in &self.uncaptured {
            self.player_pieces[pieces[slot].player.idx()].push(slot);
        }
    }

    fn build_position_pieces(&mut self, pieces: &[Piece], position_count: usize) {
        self.position_pieces = vec![None; position_count + 1];
        for &slot in &self.uncaptured {
            if let Some(sq) = pieces[slot].position {
                self.position_pieces[sq as usize] = Some(slot);
            }
        }
    }

    fn build_slots(&mut self, pieces: &[Piece]) {
        let len = pieces.iter().map(|p| p.id.index() + 1).max().unwrap_or(0);
        self.slots = vec![usize::MAX; len];
        for (slot, piece) in pieces.iter().enumerate() {
            self.slots[piece.id.index()] = slot;
        }
    }

    /// Slots of the pieces that may move: every piece of `turn`, or only the
    /// pinned piece while a capture chain is pending.
    pub fn get_pieces_in_play(&self, turn: Player, pinned: Option<PieceId>) -> &[usize] {
        let pinned_slot = pinned
            .and_then(|id| self.slots.get(id.index()))
            .filter(|&&slot| slot != usize::MAX);
        match pinned_slot {
            Some(slot) => std::slice::from_ref(slot),
            None => &self.player_pieces[turn.idx()],
        }
    }

    pub fn get_pieces_by_player(&self, player: Player) -> &[usize] {
        &self.player_pieces[player.idx()]
    }

    pub fn get_positions_by_player(&self, player: Player) -> &[Square] {
        &self.player_positions[player.idx()]
    }

    pub fn get_piece_by_position(&self, sq: Square) -> Option<usize> {
        self.position_pieces.get(sq as usize).copied().flatten()
    }

    pub fn slot_of(&self, id: PieceId) -> Option<usize> {
        self.slots
            .get(id.index())
            .copied()
            .filter(|&slot| slot != usize::MAX)
    }

    pub fn uncaptured_pieces(&self) -> &[usize] {
        &self.uncaptured
    }
    pub fn filled_positions(&self) -> &[Square] {
        &self.filled_positions
    }
    /// Every unoccupied square in `1..=position_count`, the last one included.
    pub fn open_positions(&self) -> &[Square] {
        &self.open_positions
    }
}

#[cfg(test)]
#[path = "position_index_tests.rs"]
mod position_index_tests;
