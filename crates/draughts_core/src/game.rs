//! Game driver: feeds moves into a board one at a time.
//!
//! `Game` keeps what a caller would otherwise have to thread through every
//! board call by hand: the running move number and the squares already
//! captured in the current chain.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{GameError, MoveError};
use crate::initializer::STARTPOS;
use crate::rules::{Variant, WinCondition};
use crate::types::{Move, Player, Square};

/// A game as exchanged with notation readers and writers: the variant, the
/// start position (`"startpos"` or a descriptor) and the moves in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub variant: Variant,
    pub start: String,
    pub moves: Vec<Move>,
}

#[derive(Clone, Debug)]
pub struct Game {
    variant: Variant,
    start: String,
    board: Board,
    moves: Vec<Move>,
    move_number: u32,
    chain_captures: Vec<Square>,
}

impl Game {
    pub fn new(variant: Variant, setup: &str) -> Result<Self, GameError> {
        let board = Board::new(variant, setup)?;
        Ok(Self {
            variant,
            start: setup.to_string(),
            board,
            moves: Vec::new(),
            move_number: 1,
            chain_captures: Vec::new(),
        })
    }

    pub fn startpos(variant: Variant) -> Self {
        Self {
            variant,
            start: STARTPOS.to_string(),
            board: Board::startpos(variant),
            moves: Vec::new(),
            move_number: 1,
            chain_captures: Vec::new(),
        }
    }

    /// Replays `moves` from `setup`, stopping at the first illegal one.
    pub fn replay(
        variant: Variant,
        setup: &str,
        moves: impl IntoIterator<Item = Move>,
    ) -> Result<Self, GameError> {
        let mut game = Self::new(variant, setup)?;
        for (ply, mv) in moves.into_iter().enumerate() {
            game.push_move(mv)
                .map_err(|source| GameError::Replay { ply, mv, source })?;
        }
        Ok(game)
    }

    pub fn from_record(record: &GameRecord) -> Result<Self, GameError> {
        Self::replay(record.variant, &record.start, record.moves.iter().copied())
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            variant: self.variant,
            start: self.start.clone(),
            moves: self.moves.clone(),
        }
    }

    /// Plays `mv`. Returns the captured square for a capture.
    pub fn push_move(&mut self, mv: Move) -> Result<Option<Square>, MoveError> {
        let (board, captured) =
            self.board
                .create_new_board_and_capture(mv, self.move_number, &self.chain_captures)?;

        match captured {
            Some(sq) if board.piece_requiring_further_capture_moves().is_some() => {
                self.chain_captures.push(sq);
            }
            _ => self.chain_captures.clear(),
        }
        self.board = board;
        self.moves.push(mv);
        self.move_number += 1;
        Ok(captured)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.get_possible_moves(&self.chain_captures)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn whose_turn(&self) -> Player {
        self.board.player_turn()
    }
    /// Squares captured so far in the chain that is still in progress.
    pub fn chain_captures(&self) -> &[Square] {
        &self.chain_captures
    }

    pub fn is_over(&self) -> bool {
        self.crowned_player().is_some() || self.legal_moves().is_empty()
    }

    pub fn winner(&self) -> Option<Player> {
        if let Some(player) = self.crowned_player() {
            return Some(player);
        }
        if !self.legal_moves().is_empty() {
            return None;
        }
        let stuck = self.board.player_turn();
        match self.board.rules().win_condition {
            WinCondition::NoMovesWins => Some(stuck),
            WinCondition::NoMovesLoses | WinCondition::FirstKingWins => Some(stuck.other()),
        }
    }

    /// Under breakthrough rules, the owner of the first king on the board.
    fn crowned_player(&self) -> Option<Player> {
        if self.board.rules().win_condition != WinCondition::FirstKingWins {
            return None;
        }
        self.board
            .pieces()
            .iter()
            .find(|piece| !piece.is_captured() && piece.is_king())
            .map(|piece| piece.player())
    }

    pub fn to_descriptor(&self) -> String {
        self.board.to_descriptor()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
