pub mod chess;
pub mod game;

pub use chess::{
    Board, CastlingFlags, ChessField, Color, FenError, Move, MoveKind, MoveRecord, Piece,
    PieceType, SideCastling, Square, INITIAL_POSITION,
};
pub use game::{GameState, GameStatus, MoveError};
