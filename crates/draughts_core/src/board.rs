use std::sync::Arc;

use crate::error::{BoardError, MoveError};
use crate::initializer::{InitialPosition, PositionInitializer, STARTPOS, encode_descriptor};
use crate::layout::PositionLayout;
use crate::piece::Piece;
use crate::position_index::PositionIndex;
use crate::rules::{RuleSet, Variant};
use crate::types::*;

/// A draughts position: pieces, side to move and the pending capture chain.
///
/// Boards are meant to be explored by cloning. `create_new_board_from_move`
/// never touches the receiver, and a clone shares no mutable state with its
/// source, so sibling branches of a move tree can live side by side (and on
/// different threads).
#[derive(Debug)]
pub struct Board {
    id: BoardId,
    rules: RuleSet,
    layout: Arc<PositionLayout>,
    player_turn: Player,
    /// Sorted by position; captured pieces (no position) first.
    pieces: Vec<Piece>,
    piece_requiring_further_capture_moves: Option<PieceId>,
    previous_move_was_capture: bool,
    index: PositionIndex,
}

impl Board {
    /// Builds a board for `variant` from `setup`, which is either
    /// [`STARTPOS`] or a position descriptor.
    pub fn new(variant: Variant, setup: &str) -> Result<Self, BoardError> {
        Self::with_rules(variant.rules(), setup)
    }

    pub fn with_rules(rules: RuleSet, setup: &str) -> Result<Self, BoardError> {
        rules.validate()?;
        let id = BoardId::fresh();
        let initial = PositionInitializer::new(&rules, setup, id).initialize()?;
        Ok(Self::from_initial(id, rules, initial))
    }

    pub fn startpos(variant: Variant) -> Self {
        let rules = variant.rules();
        let id = BoardId::fresh();
        let initial = PositionInitializer::new(&rules, STARTPOS, id).initialize_default();
        Self::from_initial(id, rules, initial)
    }

    pub fn from_descriptor(variant: Variant, descriptor: &str) -> Result<Self, BoardError> {
        Self::new(variant, descriptor)
    }

    fn from_initial(id: BoardId, rules: RuleSet, initial: InitialPosition) -> Self {
        let mut board = Board {
            id,
            rules,
            layout: Arc::new(initial.layout),
            player_turn: initial.player_turn,
            pieces: initial.pieces,
            piece_requiring_further_capture_moves: None,
            previous_move_was_capture: false,
            index: PositionIndex::default(),
        };
        board.commit();
        board
    }

    pub fn id(&self) -> BoardId {
        self.id
    }
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
    pub fn variant(&self) -> Variant {
        self.rules.variant
    }
    pub fn width(&self) -> u8 {
        self.rules.width
    }
    pub fn height(&self) -> u8 {
        self.rules.height
    }
    pub fn position_count(&self) -> usize {
        self.rules.position_count()
    }
    pub fn layout(&self) -> &PositionLayout {
        &self.layout
    }
    pub fn player_turn(&self) -> Player {
        self.player_turn
    }
    pub fn previous_move_was_capture(&self) -> bool {
        self.previous_move_was_capture
    }
    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    /// Every piece ever placed on this board, captured ones included.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The piece that has to continue its capture chain before the turn passes.
    pub fn piece_requiring_further_capture_moves(&self) -> Option<&Piece> {
        self.piece_requiring_further_capture_moves
            .and_then(|id| self.index.slot_of(id))
            .map(|slot| &self.pieces[slot])
    }

    /// The non-captured piece on `sq`, if any. Out-of-range squares are empty.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        let piece = &self.pieces[self.index.get_piece_by_position(sq)?];
        debug_assert_eq!(piece.board, self.id, "piece not attached to this board");
        Some(piece)
    }

    pub fn pieces_by_player(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.index
            .get_pieces_by_player(player)
            .iter()
            .map(|&slot| &self.pieces[slot])
    }

    /// Pieces allowed to move now: the pinned piece during a capture chain,
    /// otherwise every piece of the side to move.
    pub fn pieces_in_play(&self) -> impl Iterator<Item = &Piece> {
        self.index
            .get_pieces_in_play(self.player_turn, self.piece_requiring_further_capture_moves)
            .iter()
            .map(|&slot| &self.pieces[slot])
    }

    pub fn count_movable_player_pieces(&self, player: Player, captures: &[Square]) -> usize {
        self.pieces_by_player(player)
            .filter(|piece| piece.is_movable(self, captures))
            .count()
    }

    /// Legal moves for the side to move. Captures are mandatory: positional
    /// moves are only offered when no capture exists and no chain is pending.
    pub fn get_possible_moves(&self, captures: &[Square]) -> Vec<Move> {
        let capture_moves = self.get_possible_capture_moves(captures);
        if !capture_moves.is_empty() || self.piece_requiring_further_capture_moves.is_some() {
            capture_moves
        } else {
            self.get_possible_positional_moves()
        }
    }

    pub fn get_possible_capture_moves(&self, captures: &[Square]) -> Vec<Move> {
        self.pieces_in_play()
            .flat_map(|piece| piece.get_possible_capture_moves(self, captures))
            .collect()
    }

    pub fn get_possible_positional_moves(&self) -> Vec<Move> {
        self.pieces_in_play()
            .flat_map(|piece| piece.get_possible_positional_moves(self))
            .collect()
    }

    pub fn position_is_open(&self, sq: Square) -> bool {
        self.index.get_piece_by_position(sq).is_none()
    }

    /// Returns a new board with `mv` applied; `self` is left as it was.
    pub fn create_new_board_from_move(
        &self,
        mv: Move,
        move_number: u32,
        captures: &[Square],
    ) -> Result<Board, MoveError> {
        self.create_new_board_and_capture(mv, move_number, captures)
            .map(|(board, _)| board)
    }

    /// Like [`Board::create_new_board_from_move`], also returning the square
    /// of the captured piece when `mv` was a capture.
    pub fn create_new_board_and_capture(
        &self,
        mv: Move,
        move_number: u32,
        captures: &[Square],
    ) -> Result<(Board, Option<Square>), MoveError> {
        let capture_moves = self.get_possible_capture_moves(captures);
        let is_capture = capture_moves.contains(&mv);
        if !is_capture && !self.get_possible_moves(captures).contains(&mv) {
            return Err(self.reject(mv, captures));
        }

        let mut new_board = self.clone();
        let captured = if is_capture {
            Some(new_board.apply_capture_move(mv, move_number, captures)?)
        } else {
            new_board.apply_positional_move(mv, move_number)?;
            None
        };
        Ok((new_board, captured))
    }

    /// Applies a capture in place and resolves the capture chain. Returns the
    /// square of the captured piece.
    pub fn perform_capture_move(
        &mut self,
        mv: Move,
        move_number: u32,
        captures: &[Square],
    ) -> Result<Square, MoveError> {
        if !self.get_possible_capture_moves(captures).contains(&mv) {
            return Err(self.reject(mv, captures));
        }
        self.apply_capture_move(mv, move_number, captures)
    }

    pub fn perform_positional_move(&mut self, mv: Move, move_number: u32) -> Result<(), MoveError> {
        if !self.get_possible_moves(&[]).contains(&mv)
            || !self.get_possible_positional_moves().contains(&mv)
        {
            return Err(self.reject(mv, &[]));
        }
        self.apply_positional_move(mv, move_number)
    }

    fn apply_capture_move(
        &mut self,
        mv: Move,
        move_number: u32,
        captures: &[Square],
    ) -> Result<Square, MoveError> {
        let mover = self.slot_at(mv.from)?;
        let mover_id = self.pieces[mover].id;
        let originally_was_king = self.pieces[mover].king;
        let enemy_position = self.pieces[mover]
            .capture_move_enemies(self, captures)
            .get(&mv.to)
            .copied()
            .ok_or(MoveError::Illegal(mv))?;
        let enemy = self.slot_at(enemy_position)?;

        self.previous_move_was_capture = true;
        self.pieces[enemy].capture();
        self.relocate(mover, mv.to, move_number);

        let mover = self.slot_at(mv.to)?;
        let mut chain = captures.to_vec();
        chain.push(enemy_position);

        // A man crowned by this jump is probed as a man: if the chain goes on
        // it stays uncrowned, otherwise the crown is given back.
        let further_capture_moves =
            if !originally_was_king && !self.rules.promote_mid_capture {
                let was_king = self.pieces[mover].king;
                self.pieces[mover].king = false;
                let further = self.pieces[mover].get_possible_capture_moves(self, &chain);
                if further.is_empty() && was_king {
                    self.pieces[mover].king = true;
                }
                further
            } else {
                self.pieces[mover].get_possible_capture_moves(self, &chain)
            };

        if further_capture_moves.is_empty() {
            self.piece_requiring_further_capture_moves = None;
            self.switch_turn();
        } else {
            tracing::debug!(
                square = mv.to,
                continuations = further_capture_moves.len(),
                "capture chain continues"
            );
            self.piece_requiring_further_capture_moves = Some(mover_id);
        }
        tracing::debug!(%mv, move_number, captured = enemy_position, "capture applied");
        Ok(enemy_position)
    }

    fn apply_positional_move(&mut self, mv: Move, move_number: u32) -> Result<(), MoveError> {
        let slot = self.slot_at(mv.from)?;
        self.previous_move_was_capture = false;
        self.relocate(slot, mv.to, move_number);
        self.switch_turn();
        tracing::debug!(%mv, move_number, "positional move applied");
        Ok(())
    }

    pub fn switch_turn(&mut self) {
        self.player_turn = self.player_turn.other();
    }

    /// Relocates the piece on `mv.from` to the open square `mv.to` and commits.
    /// Does not check the move against the rules.
    pub fn move_piece(&mut self, mv: Move, move_number: u32) -> Result<(), MoveError> {
        let slot = self.slot_at(mv.from)?;
        if !self.layout.contains(mv.to) || !self.position_is_open(mv.to) {
            return Err(MoveError::Illegal(mv));
        }
        self.relocate(slot, mv.to, move_number);
        Ok(())
    }

    fn relocate(&mut self, slot: usize, to: Square, move_number: u32) {
        self.pieces[slot].move_to(to, move_number, &self.layout);
        self.commit();
    }

    /// Publishes mutations of the piece collection: re-attaches every piece to
    /// this board, restores position order and rebuilds the index. Called once
    /// per logical move and after every clone.
    pub fn commit(&mut self) {
        let id = self.id;
        for piece in &mut self.pieces {
            piece.reset_for_new_board(id);
        }
        self.pieces.sort_by_key(|piece| piece.position.unwrap_or(0));
        self.index = PositionIndex::build(&self.pieces, self.position_count());
    }

    /// The position in descriptor form, readable by [`Board::new`].
    pub fn to_descriptor(&self) -> String {
        encode_descriptor(self.player_turn, self.position_count(), &self.pieces)
    }

    fn slot_at(&self, sq: Square) -> Result<usize, MoveError> {
        self.index
            .get_piece_by_position(sq)
            .ok_or(MoveError::EmptySquare(sq))
    }

    /// Explains why `mv` is not legal right now.
    fn reject(&self, mv: Move, captures: &[Square]) -> MoveError {
        let err = self.classify_illegal(mv, captures);
        tracing::debug!(%mv, error = %err, "move rejected");
        err
    }

    fn classify_illegal(&self, mv: Move, captures: &[Square]) -> MoveError {
        let Some(piece) = self.piece_at(mv.from) else {
            return MoveError::EmptySquare(mv.from);
        };
        if let Some(pinned) = self.piece_requiring_further_capture_moves()
            && let Some(pinned_square) = pinned.position
            && (pinned.id != piece.id
                || !piece.get_possible_capture_moves(self, captures).contains(&mv))
        {
            return MoveError::ChainPending {
                pinned: pinned_square,
            };
        }
        if piece.player != self.player_turn {
            return MoveError::NotInPlay {
                square: mv.from,
                owner: piece.player,
                turn: self.player_turn,
            };
        }
        if !piece.is_movable(self, captures) {
            return MoveError::NoMovesForPiece(mv.from);
        }
        if piece.get_possible_positional_moves(self).contains(&mv)
            && !self.get_possible_capture_moves(captures).is_empty()
        {
            return MoveError::CaptureRequired(mv);
        }
        MoveError::Illegal(mv)
    }
}

impl Clone for Board {
    /// Deep copy with a fresh identity; pieces are re-attached to the copy.
    fn clone(&self) -> Self {
        let mut board = Board {
            id: BoardId::fresh(),
            rules: self.rules,
            layout: Arc::clone(&self.layout),
            player_turn: self.player_turn,
            pieces: self.pieces.clone(),
            piece_requiring_further_capture_moves: self.piece_requiring_further_capture_moves,
            previous_move_was_capture: self.previous_move_was_capture,
            index: PositionIndex::default(),
        };
        board.commit();
        board
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
