//! Initial piece placement, from variant defaults or a position descriptor.
//!
//! A descriptor is one turn character (`W`/`w` for White, anything else for
//! Black) followed by one character per square in row-major order: `w`/`b` is
//! a man of that colour, `W`/`B` a king, anything else an empty square.

use crate::error::BoardError;
use crate::layout::PositionLayout;
use crate::piece::Piece;
use crate::rules::RuleSet;
use crate::types::{BoardId, PieceId, Player, Square};

/// The setup token meaning "use the variant's default start position".
pub const STARTPOS: &str = "startpos";

/// Pieces and side to move produced by the initializer.
#[derive(Debug)]
pub struct InitialPosition {
    pub layout: PositionLayout,
    pub pieces: Vec<Piece>,
    pub player_turn: Player,
}

pub struct PositionInitializer<'a> {
    rules: &'a RuleSet,
    setup: &'a str,
    board: BoardId,
}

impl<'a> PositionInitializer<'a> {
    pub fn new(rules: &'a RuleSet, setup: &'a str, board: BoardId) -> Self {
        Self {
            rules,
            setup,
            board,
        }
    }

    pub fn initialize(&self) -> Result<InitialPosition, BoardError> {
        if self.setup == STARTPOS {
            return Ok(self.initialize_default());
        }
        let layout = self.build_position_layout();
        let (pieces, player_turn) = self.descriptor_pieces()?;
        Ok(InitialPosition {
            layout,
            pieces,
            player_turn,
        })
    }

    /// Default placement; White moves first.
    pub fn initialize_default(&self) -> InitialPosition {
        let layout = self.build_position_layout();
        let pieces = self.default_pieces(&layout);
        InitialPosition {
            layout,
            pieces,
            player_turn: Player::White,
        }
    }

    pub fn build_position_layout(&self) -> PositionLayout {
        PositionLayout::new(self.rules.width, self.rules.height)
    }

    fn default_pieces(&self, layout: &PositionLayout) -> Vec<Piece> {
        let position_count = layout.position_count();
        let starting_piece_count = self.rules.width as usize * self.rules.rows_per_player as usize;
        let owner = |sq: Square| {
            let sq = sq as usize;
            if sq <= starting_piece_count {
                Some(Player::Black)
            } else if sq > position_count - starting_piece_count {
                Some(Player::White)
            } else {
                None
            }
        };

        let mut pieces = Vec::with_capacity(2 * starting_piece_count);
        for row in layout.rows() {
            for &sq in row {
                if let Some(player) = owner(sq) {
                    pieces.push(self.create_piece(pieces.len(), player, sq));
                }
            }
        }
        pieces
    }

    fn descriptor_pieces(&self) -> Result<(Vec<Piece>, Player), BoardError> {
        let mut chars = self.setup.chars();
        let turn = match chars.next() {
            Some('W' | 'w') => Player::White,
            Some(_) => Player::Black,
            None => return Err(BoardError::EmptyDescriptor),
        };
        let body: Vec<char> = chars.collect();
        let expected = self.rules.position_count();
        if body.len() != expected {
            return Err(BoardError::DescriptorLength {
                expected,
                actual: body.len(),
            });
        }

        let mut pieces = Vec::new();
        for (index, ch) in body.into_iter().enumerate() {
            // Descriptor index 0 is square 1.
            let sq = (index + 1) as Square;
            let player = match ch {
                'w' | 'W' => Player::White,
                'b' | 'B' => Player::Black,
                _ => continue,
            };
            let mut piece = self.create_piece(pieces.len(), player, sq);
            piece.king = ch.is_ascii_uppercase();
            pieces.push(piece);
        }
        Ok((pieces, turn))
    }

    fn create_piece(&self, id: usize, player: Player, sq: Square) -> Piece {
        Piece::new(PieceId(id as u16), player, sq, self.board)
    }
}

/// Encodes a position in the descriptor format read by the initializer.
pub fn encode_descriptor<'p>(
    turn: Player,
    position_count: usize,
    pieces: impl IntoIterator<Item = &'p Piece>,
) -> String {
    let mut body = vec!['e'; position_count];
    for piece in pieces {
        if let Some(sq) = piece.position {
            let ch = match piece.player {
                Player::White => 'w',
                Player::Black => 'b',
            };
            body[sq as usize - 1] = if piece.king {
                ch.to_ascii_uppercase()
            } else {
                ch
            };
        }
    }
    let mut out = String::with_capacity(position_count + 1);
    out.push(match turn {
        Player::White => 'W',
        Player::Black => 'B',
    });
    out.extend(body);
    out
}

#[cfg(test)]
#[path = "initializer_tests.rs"]
mod initializer_tests;
