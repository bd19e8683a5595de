use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chess::board::Board;
use crate::chess::fen::{self, FenError};
use crate::chess::model::{
    CastlingFlags, ChessField, Color, Move, MoveKind, MoveRecord, Piece, PieceType, Square,
};
use crate::chess::{attacks, movegen};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Checkmate { winner: Color },
    Stalemate,
}

/// Recoverable rejections. The state is untouched when any of these is
/// returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece of the side to move on {0}")]
    InvalidSelection(ChessField),
    #[error("{to} is not a legal destination for the piece on {from}")]
    IllegalDestination { from: ChessField, to: ChessField },
    #[error("the game is already over")]
    GameAlreadyOver,
}

/// A complete game. Owns the board and every flag the rules need; all
/// mutation goes through [`GameState::apply_move`]. Once the status is
/// terminal the state no longer changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling: CastlingFlags,
    last_move: Option<MoveRecord>,
    history: Vec<MoveRecord>,
    status: GameStatus,
}

impl GameState {
    /// A fresh game from the standard setup, white to move.
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingFlags::default(),
            last_move: None,
            history: Vec::new(),
            status: GameStatus::Active,
        }
    }

    pub fn from_fen(fen_str: &str) -> Result<Self, FenError> {
        let pos = fen::parse(fen_str)?;
        let mut state = Self {
            board: pos.board,
            side_to_move: pos.side_to_move,
            castling: pos.castling,
            last_move: pos.last_move,
            history: Vec::new(),
            status: GameStatus::Active,
        };
        state.update_status();
        Ok(state)
    }

    pub fn to_fen(&self) -> String {
        fen::serialize(&self.board, self.side_to_move, &self.castling, self.last_move.as_ref())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn castling(&self) -> &CastlingFlags {
        &self.castling
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        attacks::is_in_check(&self.board, color)
    }

    /// The legal moves for the piece on `from`: its geometric candidates
    /// minus every move whose simulation leaves the mover's own king
    /// attacked. Empty unless the piece belongs to the side to move and
    /// the game is still active.
    pub fn legal_moves(&self, from: ChessField) -> Vec<Move> {
        if self.status != GameStatus::Active {
            return Vec::new();
        }
        let Some(piece) = self.board.piece_at(from) else {
            return Vec::new();
        };
        if piece.color != self.side_to_move {
            return Vec::new();
        }

        movegen::geometric_moves(&self.board, from, &self.castling, self.last_move.as_ref())
            .into_iter()
            .filter(|mv| !self.leaves_king_in_check(piece, *mv))
            .collect()
    }

    /// Applies the move if `to` is among the legal destinations of the
    /// piece on `from`. On success the board, flags, history and side to
    /// move are updated and the terminal condition is evaluated for the
    /// new side.
    pub fn apply_move(&mut self, from: ChessField, to: ChessField) -> Result<(), MoveError> {
        if self.status != GameStatus::Active {
            return Err(MoveError::GameAlreadyOver);
        }
        let piece = match self.board.piece_at(from) {
            Some(piece) if piece.color == self.side_to_move => piece,
            _ => return Err(MoveError::InvalidSelection(from)),
        };
        let mv = self
            .legal_moves(from)
            .into_iter()
            .find(|candidate| candidate.to == to)
            .ok_or(MoveError::IllegalDestination { from, to })?;

        let record = self.execute(piece, mv);

        // The legality filter already guarantees this. A failure here is a
        // bug in move simulation, not a user error, and must not be
        // silently reverted.
        assert!(
            !attacks::is_in_check(&self.board, record.piece.color),
            "{} left the mover's own king in check",
            record.mv.as_algebraic()
        );

        self.last_move = Some(record);
        self.history.push(record);
        self.side_to_move = self.side_to_move.opposite();
        self.update_status();
        Ok(())
    }

    /// Simulation on a scratch copy; the live state is never touched, so a
    /// rejected candidate cannot leak partial updates.
    fn leaves_king_in_check(&self, piece: Piece, mv: Move) -> bool {
        let mut scratch = self.clone();
        scratch.execute(piece, mv);
        attacks::is_in_check(&scratch.board, piece.color)
    }

    /// Board-level execution of a certified candidate: relocation, capture
    /// removal, the special-move bookkeeping, forced queen promotion and
    /// the castling flags. Side to move, history and status are the
    /// caller's business.
    fn execute(&mut self, piece: Piece, mv: Move) -> MoveRecord {
        let mut captured = self.board.piece_at(mv.to);
        let mut placed = piece;
        let mut kind = mv.kind;

        self.board.set(mv.from, Square::Empty);
        match mv.kind {
            MoveKind::EnPassant { captured: victim_square } => {
                captured = self.board.piece_at(victim_square);
                self.board.set(victim_square, Square::Empty);
            }
            MoveKind::Castling { rook_from, rook_to } => {
                let rook = self.board.get(rook_from);
                self.board.set(rook_from, Square::Empty);
                self.board.set(rook_to, rook);
                self.invalidate_castling(rook_from);
            }
            MoveKind::Normal | MoveKind::Promotion { .. } => {}
        }

        // Forced promotion: a pawn reaching the last rank becomes a queen.
        if piece.kind == PieceType::Pawn && (mv.to.row == 0 || mv.to.row == 7) {
            placed = Piece { color: piece.color, kind: PieceType::Queen };
            kind = MoveKind::Promotion { new_kind: PieceType::Queen };
        }
        self.board.set(mv.to, Square::Occupied(placed));

        self.invalidate_castling(mv.from);
        self.invalidate_castling(mv.to);

        MoveRecord { piece, mv: Move { kind, ..mv }, captured }
    }

    /// Castling flags keyed on squares rather than pieces: anything moving
    /// from a king or rook origin square means the original occupant is no
    /// longer unmoved there, and a capture landing on a corner retires
    /// that rook's flag for good.
    fn invalidate_castling(&mut self, field: ChessField) {
        match (field.row, field.col) {
            (0, 4) => self.castling.white.king_moved = true,
            (0, 0) => self.castling.white.queenside_rook_moved = true,
            (0, 7) => self.castling.white.kingside_rook_moved = true,
            (7, 4) => self.castling.black.king_moved = true,
            (7, 0) => self.castling.black.queenside_rook_moved = true,
            (7, 7) => self.castling.black.kingside_rook_moved = true,
            _ => {}
        }
    }

    fn update_status(&mut self) {
        let side = self.side_to_move;
        let own_fields: Vec<ChessField> = self
            .board
            .pieces()
            .filter(|(_, piece)| piece.color == side)
            .map(|(field, _)| field)
            .collect();
        let any_move = own_fields.iter().any(|&field| !self.legal_moves(field).is_empty());

        self.status = if any_move {
            GameStatus::Active
        } else if attacks::is_in_check(&self.board, side) {
            GameStatus::Checkmate { winner: side.opposite() }
        } else {
            GameStatus::Stalemate
        };
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
