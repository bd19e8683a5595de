use thiserror::Error;

use super::board::Board;
use super::model::{CastlingFlags, ChessField, Color, Move, MoveRecord, Piece, PieceType, Square};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in the piece placement")]
    BadRankCount,
    #[error("rank {0} does not describe exactly 8 squares")]
    BadRankWidth(u8),
    #[error("invalid piece character '{0}'")]
    BadPiece(char),
    #[error("invalid active color '{0}'")]
    BadActiveColor(String),
    #[error("invalid en passant square '{0}'")]
    BadEnPassant(String),
}

/// The position-defining fields of a FEN string. The halfmove clock and
/// fullmove number are accepted but discarded: the engine tracks neither.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingFlags,
    pub last_move: Option<MoveRecord>,
}

pub(crate) fn parse(fen: &str) -> Result<Position, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::MissingFields(parts.len()));
    }

    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::BadRankCount);
    }

    let mut board = Board::empty();
    for (row_index, row) in rows.iter().enumerate() {
        let rank = 7 - row_index as u8; // FEN lists rank 8 first
        let mut col = 0usize;

        for c in row.chars() {
            if let Some(digit) = c.to_digit(10) {
                col += digit as usize;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::BadPiece(c))?;
                if col > 7 {
                    return Err(FenError::BadRankWidth(rank + 1));
                }
                board.set(ChessField::new(rank, col as u8), Square::Occupied(piece));
                col += 1;
            }
        }
        if col != 8 {
            return Err(FenError::BadRankWidth(rank + 1));
        }
    }

    let side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::BadActiveColor(other.to_string())),
    };

    // FEN records availability, not history. An absent right maps onto the
    // rook's has-moved flag; the distinction from "king moved" is
    // unobservable in every later legality decision.
    let mut castling = CastlingFlags::default();
    castling.white.kingside_rook_moved = !parts[2].contains('K');
    castling.white.queenside_rook_moved = !parts[2].contains('Q');
    castling.black.kingside_rook_moved = !parts[2].contains('k');
    castling.black.queenside_rook_moved = !parts[2].contains('q');

    // The en passant square is re-expressed as the double pawn advance
    // that must have produced it.
    let last_move = match parts[3] {
        "-" => None,
        ep => {
            let skipped =
                ChessField::from_algebraic(ep).ok_or_else(|| FenError::BadEnPassant(ep.to_string()))?;
            let (color, from_row, to_row) = match skipped.row {
                2 => (Color::White, 1, 3),
                5 => (Color::Black, 6, 4),
                _ => return Err(FenError::BadEnPassant(ep.to_string())),
            };
            Some(MoveRecord {
                piece: Piece { color, kind: PieceType::Pawn },
                mv: Move::normal(
                    ChessField::new(from_row, skipped.col),
                    ChessField::new(to_row, skipped.col),
                ),
                captured: None,
            })
        }
    };

    Ok(Position { board, side_to_move, castling, last_move })
}

pub(crate) fn serialize(
    board: &Board,
    side_to_move: Color,
    castling: &CastlingFlags,
    last_move: Option<&MoveRecord>,
) -> String {
    let mut placement = String::new();
    for rank in (0u8..8).rev() {
        let mut empty_count = 0;
        for file in 0u8..8 {
            match board.get(ChessField::new(rank, file)) {
                Square::Occupied(piece) => {
                    if empty_count > 0 {
                        placement.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    placement.push(piece.to_char());
                }
                Square::Empty => empty_count += 1,
            }
        }
        if empty_count > 0 {
            placement.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let active = match side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut rights = String::new();
    if castling.white.kingside_available() {
        rights.push('K');
    }
    if castling.white.queenside_available() {
        rights.push('Q');
    }
    if castling.black.kingside_available() {
        rights.push('k');
    }
    if castling.black.queenside_available() {
        rights.push('q');
    }
    if rights.is_empty() {
        rights.push('-');
    }

    let en_passant = last_move
        .filter(|record| record.is_double_advance())
        .map(|record| {
            ChessField::new((record.mv.from.row + record.mv.to.row) / 2, record.mv.from.col)
                .as_algebraic()
        })
        .unwrap_or_else(|| "-".to_string());

    format!("{placement} {active} {rights} {en_passant} 0 1")
}
