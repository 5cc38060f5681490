//! Error types for board construction and move application.

use crate::types::{Move, Player, Square};

/// Construction and configuration failures. No board is created.
#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    #[error("position descriptor is empty")]
    EmptyDescriptor,

    #[error("position descriptor has {actual} squares, expected {expected}")]
    DescriptorLength { expected: usize, actual: usize },

    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    #[error("invalid rule set: {0}")]
    InvalidRules(String),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// A move request the rules do not allow. The board is left untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on square {0}")]
    EmptySquare(Square),

    #[error("piece on square {square} belongs to {owner:?}, but {turn:?} is to move")]
    NotInPlay {
        square: Square,
        owner: Player,
        turn: Player,
    },

    #[error("piece on square {pinned} must continue its capture chain")]
    ChainPending { pinned: Square },

    #[error("a capture is available, {0} is not a capture")]
    CaptureRequired(Move),

    #[error("piece on square {0} has no legal moves")]
    NoMovesForPiece(Square),

    #[error("illegal move {0}")]
    Illegal(Move),
}

/// A replayed move list stopped at a rule violation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("move {ply} ({mv}) rejected: {source}")]
    Replay {
        ply: usize,
        mv: Move,
        #[source]
        source: MoveError,
    },
}
