use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    /// FEN-style letter: uppercase for white, lowercase for black.
    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        PieceType::from_letter(c).map(|kind| Piece { color, kind })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

/// A board coordinate. Row 0 is rank 1 (white's home rank), col 0 is the
/// a-file.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn from_algebraic(algebraic: &str) -> Option<Self> {
        let mut chars = algebraic.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self::new(rank as u8 - b'1', file as u8 - b'a'))
    }

    pub fn as_algebraic(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// How a move manipulates the board beyond relocating the moving piece.
/// Matched exhaustively by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    EnPassant { captured: ChessField },
    Castling { rook_from: ChessField, rook_to: ChessField },
    Promotion { new_kind: PieceType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: ChessField,
    pub to: ChessField,
    pub kind: MoveKind,
}

impl Move {
    pub fn normal(from: ChessField, to: ChessField) -> Self {
        Self { from, to, kind: MoveKind::Normal }
    }

    pub fn as_algebraic(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let MoveKind::Promotion { new_kind } = self.kind {
            s.push(new_kind.letter());
        }
        s
    }
}

/// An executed move. The most recent record is what makes en passant
/// detectable on the following ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: Piece,
    pub mv: Move,
    pub captured: Option<Piece>,
}

impl MoveRecord {
    pub fn is_double_advance(&self) -> bool {
        self.piece.kind == PieceType::Pawn && self.mv.from.row.abs_diff(self.mv.to.row) == 2
    }
}

/// Castling bookkeeping per side. Tracked as "has moved" rather than
/// "may castle"; eligibility is derived from these plus the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCastling {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

impl SideCastling {
    pub fn kingside_available(&self) -> bool {
        !self.king_moved && !self.kingside_rook_moved
    }

    pub fn queenside_available(&self) -> bool {
        !self.king_moved && !self.queenside_rook_moved
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingFlags {
    pub white: SideCastling,
    pub black: SideCastling,
}

impl CastlingFlags {
    pub fn side(&self, color: Color) -> &SideCastling {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn side_mut(&mut self, color: Color) -> &mut SideCastling {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}
