use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// A playable square, numbered 1.. in row-major order over the dark squares.
pub type Square = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player 1: starts on the low-numbered squares and moves toward higher rows.
    Black,
    /// Player 2: starts on the high-numbered squares and moves first by default.
    White,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
    pub fn number(self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl From<(Square, Square)> for Move {
    fn from((from, to): (Square, Square)) -> Self {
        Self::new(from, to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Stable identity of a piece inside one board's arena. Survives re-sorting
/// and cloning; never reused for another piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a single `Board` value. Every construction and every clone
/// gets a fresh one, so pieces can tell which board they belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardId(u64);

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

impl BoardId {
    pub(crate) fn fresh() -> Self {
        BoardId(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}
