use super::board::Board;
use super::model::{ChessField, Color, Piece, PieceType};
use super::movegen::{KING_OFFSETS, KNIGHT_OFFSETS};

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1), // orthogonal (rook-like)
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1), // diagonal (bishop-like)
];

/// True if `color`'s king is attacked. A missing king answers `false`;
/// that cannot happen in a game reached from the standard setup.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// True if any piece of `by` attacks `target`. Probes outward from the
/// target instead of generating every opposing move. Pawns count only
/// their capture diagonals (a pawn cannot capture forward) and the king
/// only its basic steps, so castling legality never recurses into here.
pub fn is_square_attacked(board: &Board, target: ChessField, by: Color) -> bool {
    for &(dr, dc) in &DIRECTIONS {
        let orthogonal = dr == 0 || dc == 0;
        let mut row = target.row as isize;
        let mut col = target.col as isize;

        loop {
            row += dr;
            col += dc;
            if !Board::in_bounds(row, col) {
                break;
            }
            match board.piece_at(ChessField::new(row as u8, col as u8)) {
                None => continue,
                Some(piece) => {
                    if piece.color == by {
                        let attacks = match piece.kind {
                            PieceType::Queen => true,
                            PieceType::Rook => orthogonal,
                            PieceType::Bishop => !orthogonal,
                            _ => false,
                        };
                        if attacks {
                            return true;
                        }
                    }
                    break;
                }
            }
        }
    }

    // A `by` pawn attacks from one rank behind the target, one file over.
    let pawn_row = match by {
        Color::White => target.row as isize - 1,
        Color::Black => target.row as isize + 1,
    };
    for dc in [-1, 1] {
        if probe(board, pawn_row, target.col as isize + dc, by, PieceType::Pawn) {
            return true;
        }
    }

    for &(dr, dc) in &KNIGHT_OFFSETS {
        if probe(board, target.row as isize + dr, target.col as isize + dc, by, PieceType::Knight) {
            return true;
        }
    }

    for &(dr, dc) in &KING_OFFSETS {
        if probe(board, target.row as isize + dr, target.col as isize + dc, by, PieceType::King) {
            return true;
        }
    }

    false
}

fn probe(board: &Board, row: isize, col: isize, color: Color, kind: PieceType) -> bool {
    Board::in_bounds(row, col)
        && board.piece_at(ChessField::new(row as u8, col as u8)) == Some(Piece { color, kind })
}
