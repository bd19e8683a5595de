pub mod attacks;
pub mod board;
pub mod fen;
pub mod model;
pub mod movegen;
pub mod test_utils;

pub use board::Board;
pub use fen::{FenError, INITIAL_POSITION};
pub use model::{
    CastlingFlags, ChessField, Color, Move, MoveKind, MoveRecord, Piece, PieceType, SideCastling,
    Square,
};
