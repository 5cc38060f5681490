pub mod board;
pub mod error;
pub mod game;
pub mod initializer;
pub mod layout;
pub mod perft;
pub mod piece;
pub mod position_index;
pub mod rules;
pub mod types;

// Re-export the rules engine surface
pub use board::*;
pub use error::*;
pub use game::*;
pub use initializer::{PositionInitializer, STARTPOS};
pub use layout::PositionLayout;
pub use perft::{perft, perft_divide};
pub use piece::Piece;
pub use position_index::PositionIndex;
pub use rules::*;
pub use types::*;
