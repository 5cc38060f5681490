//! Per-piece state and move candidates.
//!
//! A piece never holds a pointer to its board. Move generation borrows the
//! board it is asked about; the piece only remembers the [`BoardId`] of the
//! board that owns it, which the board rewrites after every clone.

use std::collections::BTreeMap;

use crate::board::Board;
use crate::layout::{DIAGONALS, PositionLayout};
use crate::types::{BoardId, Move, PieceId, Player, Square};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) player: Player,
    pub(crate) position: Option<Square>,
    pub(crate) king: bool,
    pub(crate) captured: bool,
    pub(crate) last_move_number: Option<u32>,
    pub(crate) board: BoardId,
}

impl Piece {
    pub(crate) fn new(id: PieceId, player: Player, position: Square, board: BoardId) -> Self {
        Self {
            id,
            player,
            position: Some(position),
            king: false,
            captured: false,
            last_move_number: None,
            board,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }
    pub fn player(&self) -> Player {
        self.player
    }
    pub fn other_player(&self) -> Player {
        self.player.other()
    }
    /// Current square, or `None` once captured.
    pub fn position(&self) -> Option<Square> {
        self.position
    }
    pub fn is_king(&self) -> bool {
        self.king
    }
    pub fn is_captured(&self) -> bool {
        self.captured
    }
    /// Number of the last move that relocated this piece.
    pub fn last_move_number(&self) -> Option<u32> {
        self.last_move_number
    }
    /// The board this piece currently belongs to.
    pub fn board_id(&self) -> BoardId {
        self.board
    }

    pub fn is_movable(&self, board: &Board, captures: &[Square]) -> bool {
        !self.captured
            && (!self.get_possible_capture_moves(board, captures).is_empty()
                || !self.get_possible_positional_moves(board).is_empty())
    }

    pub fn get_possible_capture_moves(&self, board: &Board, captures: &[Square]) -> Vec<Move> {
        match self.position {
            Some(from) => self
                .capture_move_enemies(board, captures)
                .into_keys()
                .map(|to| Move::new(from, to))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn get_possible_positional_moves(&self, board: &Board) -> Vec<Move> {
        let Some(from) = self.position else {
            return Vec::new();
        };
        let layout = board.layout();
        let mut out = Vec::new();
        for dir in self.move_directions() {
            if self.king && board.rules().flying_kings {
                out.extend(
                    layout
                        .ray(from, dir)
                        .take_while(|&sq| board.position_is_open(sq))
                        .map(|to| Move::new(from, to)),
                );
            } else if let Some(to) = layout.step(from, dir)
                && board.position_is_open(to)
            {
                out.push(Move::new(from, to));
            }
        }
        out.sort_unstable();
        out
    }

    /// Maps each capture landing square to the square of the enemy piece that
    /// is jumped to reach it. Landings in `captures` are excluded, and a
    /// flying king cannot slide through them either.
    pub fn capture_move_enemies(
        &self,
        board: &Board,
        captures: &[Square],
    ) -> BTreeMap<Square, Square> {
        let mut enemies = BTreeMap::new();
        let Some(from) = self.position else {
            return enemies;
        };
        if self.captured {
            return enemies;
        }
        let layout = board.layout();
        let is_free = |sq: Square| board.position_is_open(sq) && !captures.contains(&sq);

        for dir in self.capture_directions(board) {
            if self.king && board.rules().flying_kings {
                let mut ray = layout.ray(from, dir);
                let enemy = loop {
                    match ray.next() {
                        Some(sq) if is_free(sq) => continue,
                        Some(sq) if self.is_enemy_at(board, sq) => break Some(sq),
                        _ => break None,
                    }
                };
                if let Some(enemy) = enemy {
                    for landing in ray.take_while(|&sq| is_free(sq)) {
                        enemies.insert(landing, enemy);
                    }
                }
            } else if let Some(enemy) = layout.step(from, dir)
                && self.is_enemy_at(board, enemy)
                && let Some(landing) = layout.step(enemy, dir)
                && is_free(landing)
            {
                enemies.insert(landing, enemy);
            }
        }
        enemies
    }

    /// Relocates the piece and crowns it on the enemy home row.
    pub fn move_to(&mut self, to: Square, move_number: u32, layout: &PositionLayout) {
        self.position = Some(to);
        self.last_move_number = Some(move_number);
        self.king = self.king || self.is_on_enemy_home_row(layout);
    }

    /// Marks the piece captured. It stays in the board's collection but drops
    /// out of every index view.
    pub fn capture(&mut self) {
        self.captured = true;
        self.position = None;
    }

    /// Re-attaches the piece to the board that now owns it.
    pub fn reset_for_new_board(&mut self, board: BoardId) {
        self.board = board;
    }

    pub fn is_on_enemy_home_row(&self, layout: &PositionLayout) -> bool {
        self.position.is_some_and(|sq| {
            let home_row = match self.player {
                Player::Black => layout.height() as i16 - 1,
                Player::White => 0,
            };
            layout.row_of(sq) == home_row
        })
    }

    fn forward(&self) -> i8 {
        match self.player {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    fn move_directions(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let forward = self.forward();
        DIAGONALS
            .into_iter()
            .filter(move |&(dr, _)| self.king || dr == forward)
    }

    fn capture_directions(&self, board: &Board) -> impl Iterator<Item = (i8, i8)> + '_ {
        let forward = self.forward();
        let backward = self.king || board.rules().men_capture_backward;
        DIAGONALS
            .into_iter()
            .filter(move |&(dr, _)| backward || dr == forward)
    }

    fn is_enemy_at(&self, board: &Board, sq: Square) -> bool {
        board
            .piece_at(sq)
            .is_some_and(|p| p.player == self.other_player())
    }
}

#[cfg(test)]
#[path = "piece_tests.rs"]
mod piece_tests;
