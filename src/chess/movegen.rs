use super::attacks;
use super::board::Board;
use super::model::{CastlingFlags, ChessField, Color, Move, MoveKind, MoveRecord, Piece, PieceType};

pub(crate) const KNIGHT_OFFSETS: [(isize, isize); 8] =
    [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];

pub(crate) const KING_OFFSETS: [(isize, isize); 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

const ROOK_DIRECTIONS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const QUEEN_DIRECTIONS: [(isize, isize); 8] =
    [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];

/// Every square the piece on `from` geometrically reaches, ignoring whether
/// the mover's own king would be left in check. Candidates carry the
/// bookkeeping their execution needs (en-passant victim, castling rook
/// relocation). Promotion is decided at execution time, not here.
/// Never mutates the board.
pub fn geometric_moves(
    board: &Board,
    from: ChessField,
    castling: &CastlingFlags,
    last_move: Option<&MoveRecord>,
) -> Vec<Move> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    match piece.kind {
        PieceType::Pawn => pawn_moves(board, from, piece.color, last_move),
        PieceType::Knight => offset_moves(board, from, piece.color, &KNIGHT_OFFSETS),
        PieceType::Bishop => sliding_moves(board, from, piece.color, &BISHOP_DIRECTIONS),
        PieceType::Rook => sliding_moves(board, from, piece.color, &ROOK_DIRECTIONS),
        PieceType::Queen => sliding_moves(board, from, piece.color, &QUEEN_DIRECTIONS),
        PieceType::King => {
            let mut moves = offset_moves(board, from, piece.color, &KING_OFFSETS);
            castling_moves(board, from, piece.color, castling, &mut moves);
            moves
        }
    }
}

fn pawn_moves(
    board: &Board,
    from: ChessField,
    color: Color,
    last_move: Option<&MoveRecord>,
) -> Vec<Move> {
    let mut moves = Vec::new();
    let forward: isize = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let start_row = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    let one_row = from.row as isize + forward;

    // Forward push into an empty square, plus the double advance from the
    // home rank when both squares are clear.
    if Board::in_bounds(one_row, from.col as isize) && board.is_empty(ChessField::new(one_row as u8, from.col)) {
        moves.push(Move::normal(from, ChessField::new(one_row as u8, from.col)));

        if from.row == start_row {
            let two_row = from.row as isize + 2 * forward;
            if board.is_empty(ChessField::new(two_row as u8, from.col)) {
                moves.push(Move::normal(from, ChessField::new(two_row as u8, from.col)));
            }
        }
    }

    // Diagonal capture, only onto an enemy piece.
    for dc in [-1isize, 1] {
        let col = from.col as isize + dc;
        if !Board::in_bounds(one_row, col) {
            continue;
        }
        let target = ChessField::new(one_row as u8, col as u8);
        if let Some(victim) = board.piece_at(target) {
            if victim.color != color {
                moves.push(Move::normal(from, target));
            }
        }
    }

    // En passant: the opponent's pawn just advanced two squares onto our
    // rank, one file over; the capture lands one rank ahead on its file.
    if let Some(last) = last_move {
        if last.is_double_advance()
            && last.piece.color != color
            && last.mv.to.row == from.row
            && last.mv.to.col.abs_diff(from.col) == 1
        {
            let target = ChessField::new(one_row as u8, last.mv.to.col);
            moves.push(Move { from, to: target, kind: MoveKind::EnPassant { captured: last.mv.to } });
        }
    }

    moves
}

fn offset_moves(board: &Board, from: ChessField, color: Color, offsets: &[(isize, isize)]) -> Vec<Move> {
    let mut moves = Vec::new();

    for &(dr, dc) in offsets {
        let row = from.row as isize + dr;
        let col = from.col as isize + dc;
        if !Board::in_bounds(row, col) {
            continue;
        }
        let target = ChessField::new(row as u8, col as u8);
        match board.piece_at(target) {
            None => moves.push(Move::normal(from, target)),
            Some(piece) if piece.color != color => moves.push(Move::normal(from, target)),
            Some(_) => {}
        }
    }

    moves
}

fn sliding_moves(board: &Board, from: ChessField, color: Color, directions: &[(isize, isize)]) -> Vec<Move> {
    let mut moves = Vec::new();

    for &(dr, dc) in directions {
        let mut row = from.row as isize;
        let mut col = from.col as isize;

        loop {
            row += dr;
            col += dc;
            if !Board::in_bounds(row, col) {
                break;
            }
            let target = ChessField::new(row as u8, col as u8);
            match board.piece_at(target) {
                None => moves.push(Move::normal(from, target)),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(Move::normal(from, target));
                    }
                    break; // own or enemy piece blocks the ray
                }
            }
        }
    }

    moves
}

/// Castling candidates. Requires the king on its home square and unmoved,
/// the rook unmoved and still on its corner, the squares strictly between
/// them empty, the king not currently in check, and no square the king
/// transits (destination included) attacked by the opponent.
fn castling_moves(
    board: &Board,
    from: ChessField,
    color: Color,
    castling: &CastlingFlags,
    moves: &mut Vec<Move>,
) {
    let home_row: u8 = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    if from.row != home_row || from.col != 4 {
        return;
    }
    let flags = castling.side(color);
    if flags.king_moved || attacks::is_in_check(board, color) {
        return;
    }

    let rook = Piece { color, kind: PieceType::Rook };
    let enemy = color.opposite();

    // Kingside: king e -> g, rook h -> f.
    if !flags.kingside_rook_moved
        && board.piece_at(ChessField::new(home_row, 7)) == Some(rook)
        && board.is_empty(ChessField::new(home_row, 5))
        && board.is_empty(ChessField::new(home_row, 6))
        && !attacks::is_square_attacked(board, ChessField::new(home_row, 5), enemy)
        && !attacks::is_square_attacked(board, ChessField::new(home_row, 6), enemy)
    {
        moves.push(Move {
            from,
            to: ChessField::new(home_row, 6),
            kind: MoveKind::Castling {
                rook_from: ChessField::new(home_row, 7),
                rook_to: ChessField::new(home_row, 5),
            },
        });
    }

    // Queenside: king e -> c, rook a -> d. The b-file square must be clear
    // but the king never crosses it, so it may be attacked.
    if !flags.queenside_rook_moved
        && board.piece_at(ChessField::new(home_row, 0)) == Some(rook)
        && board.is_empty(ChessField::new(home_row, 1))
        && board.is_empty(ChessField::new(home_row, 2))
        && board.is_empty(ChessField::new(home_row, 3))
        && !attacks::is_square_attacked(board, ChessField::new(home_row, 3), enemy)
        && !attacks::is_square_attacked(board, ChessField::new(home_row, 2), enemy)
    {
        moves.push(Move {
            from,
            to: ChessField::new(home_row, 2),
            kind: MoveKind::Castling {
                rook_from: ChessField::new(home_row, 0),
                rook_to: ChessField::new(home_row, 3),
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::fen;
    use crate::chess::test_utils::assert_moves;

    fn geometric_from(fen_str: &str, square: &str) -> Vec<Move> {
        let pos = fen::parse(fen_str).unwrap();
        geometric_moves(
            &pos.board,
            ChessField::from_algebraic(square).unwrap(),
            &pos.castling,
            pos.last_move.as_ref(),
        )
    }

    #[test]
    fn pawn_moves_geometric() {
        // Pawn at e4 can only push to e5.
        assert_moves(geometric_from("8/8/8/8/4P3/8/8/8 w - - 0 1", "e4").into_iter(), vec!["e4e5"]);

        // Pawn a3 blocked by a4.
        assert_moves(geometric_from("8/8/8/8/P7/P7/8/8 w - - 0 1", "a3").into_iter(), vec![]);

        // White pawn at e5: push, capture d6, en passant on f6.
        assert_moves(
            geometric_from("8/8/3p4/4Pp2/8/8/8/8 w - f6 0 1", "e5").into_iter(),
            vec!["e5d6", "e5e6", "e5f6"],
        );

        // Pawn on b2 with black pieces on a3 and c3.
        assert_moves(
            geometric_from("8/8/8/8/8/p1p5/1P6/8 w - - 0 1", "b2").into_iter(),
            vec!["b2b3", "b2b4", "b2a3", "b2c3"],
        );

        // Black pawn single and double step, and the blocked variants.
        assert_moves(geometric_from("8/p7/8/8/8/8/8/8 b - - 0 1", "a7").into_iter(), vec!["a7a6", "a7a5"]);
        assert_moves(geometric_from("8/p7/8/p7/8/8/8/8 b - - 0 1", "a7").into_iter(), vec!["a7a6"]);
        assert_moves(geometric_from("8/8/p7/p7/8/8/8/8 b - - 0 1", "a6").into_iter(), vec![]);

        // Capture is only offered against enemy pieces.
        assert_moves(geometric_from("8/p7/1p6/8/8/8/8/8 b - - 0 1", "a7").into_iter(), vec!["a7a6", "a7a5"]);
        assert_moves(
            geometric_from("8/1p6/P1P5/8/8/8/8/8 b - - 0 1", "b7").into_iter(),
            vec!["b7b6", "b7b5", "b7a6", "b7c6"],
        );

        // A pawn on the seventh is a single candidate; the queen appears
        // at execution time.
        assert_moves(geometric_from("8/6P1/8/8/8/8/8/8 w - - 0 1", "g7").into_iter(), vec!["g7g8"]);
    }

    #[test]
    fn knight_moves_geometric() {
        assert_moves(
            geometric_from("8/8/8/8/3N4/8/8/8 w - - 0 1", "d4").into_iter(),
            vec!["d4b3", "d4c2", "d4e2", "d4f3", "d4f5", "d4e6", "d4c6", "d4b5"],
        );

        // Knight at a3 boxed in by its own pieces, two captures open.
        assert_moves(
            geometric_from("8/8/8/1rn5/2r5/N7/2B5/1Q6 w - - 0 1", "a3").into_iter(),
            vec!["a3c4", "a3b5"],
        );
    }

    #[test]
    fn bishop_moves_geometric() {
        assert_moves(
            geometric_from("8/8/8/8/3B4/8/8/8 w - - 0 1", "d4").into_iter(),
            vec![
                "d4a7", "d4b6", "d4c5", "d4e3", "d4f2", "d4g1", "d4a1", "d4b2", "d4c3", "d4e5",
                "d4f6", "d4g7", "d4h8",
            ],
        );

        // One capture, one ray blocked by an own pawn.
        assert_moves(
            geometric_from("8/6r1/5B2/8/3P4/8/8/8 w - - 0 1", "f6").into_iter(),
            vec!["f6d8", "f6e7", "f6g5", "f6h4", "f6e5", "f6g7"],
        );
    }

    #[test]
    fn rook_moves_geometric() {
        assert_moves(
            geometric_from("8/8/8/8/3R4/8/8/8 w - - 0 1", "d4").into_iter(),
            vec![
                "d4d1", "d4d2", "d4d3", "d4d5", "d4d6", "d4d7", "d4d8", "d4a4", "d4b4", "d4c4",
                "d4e4", "d4f4", "d4g4", "d4h4",
            ],
        );

        assert_moves(
            geometric_from("8/8/8/8/3bR3/8/4N3/8 w - - 0 1", "e4").into_iter(),
            vec!["e4e3", "e4e5", "e4e6", "e4e7", "e4e8", "e4d4", "e4f4", "e4g4", "e4h4"],
        );
    }

    #[test]
    fn queen_moves_geometric() {
        assert_moves(
            geometric_from("8/8/8/8/3Q4/8/8/8 w - - 0 1", "d4").into_iter(),
            vec![
                "d4d1", "d4d2", "d4d3", "d4d5", "d4d6", "d4d7", "d4d8", "d4a4", "d4b4", "d4c4",
                "d4e4", "d4f4", "d4g4", "d4h4", "d4a7", "d4b6", "d4c5", "d4e3", "d4f2", "d4g1",
                "d4a1", "d4b2", "d4c3", "d4e5", "d4f6", "d4g7", "d4h8",
            ],
        );

        assert_moves(
            geometric_from("4b1b1/6b1/4r1Q1/5P2/6B1/8/8/8 w - - 0 1", "g6").into_iter(),
            vec!["g6e8", "g6f7", "g6e6", "g6f6", "g6g7", "g6g5", "g6h5", "g6h6", "g6h7"],
        );
    }

    #[test]
    fn king_moves_geometric() {
        assert_moves(
            geometric_from("8/8/8/8/8/3K4/8/8 w - - 0 1", "d3").into_iter(),
            vec!["d3c2", "d3c3", "d3c4", "d3d2", "d3d4", "d3e2", "d3e3", "d3e4"],
        );

        // Blocked by own pieces, three captures.
        assert_moves(
            geometric_from("8/8/8/3ppp2/3PKP2/3PPP2/8/8 w - - 0 1", "e4").into_iter(),
            vec!["e4d5", "e4e5", "e4f5"],
        );

        // Corner king.
        assert_moves(
            geometric_from("8/8/8/8/8/8/8/7k b - - 0 1", "h1").into_iter(),
            vec!["h1h2", "h1g1", "h1g2"],
        );

        // Starting position: no king moves at all.
        assert_moves(
            geometric_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "e1").into_iter(),
            vec![],
        );
    }

    #[test]
    fn castling_candidates() {
        // Both sides open.
        assert_moves(
            geometric_from("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1", "e1").into_iter(),
            vec!["e1d1", "e1f1", "e1c1", "e1g1"],
        );
        assert_moves(
            geometric_from("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1", "e8").into_iter(),
            vec!["e8d8", "e8f8", "e8c8", "e8g8"],
        );

        // Kingside right only.
        assert_moves(
            geometric_from("1r2k2r/pppppppp/8/8/8/8/PPPPPPPP/1R2K2R w Kk - 0 1", "e1").into_iter(),
            vec!["e1d1", "e1f1", "e1g1"],
        );

        // Queenside right only.
        assert_moves(
            geometric_from("r3k1r1/pppppppp/8/8/8/8/PPPPPPPP/R3K1R1 w Qq - 0 1", "e1").into_iter(),
            vec!["e1d1", "e1f1", "e1c1"],
        );

        // Intervening pieces on d/f block everything.
        assert_moves(
            geometric_from("r2bkb1r/pppppppp/8/8/8/8/PPPPPPPP/R2BKB1R w KQkq - 0 1", "e1").into_iter(),
            vec![],
        );

        // Pieces on c/g block the castle but not the steps.
        assert_moves(
            geometric_from("r1b1k1br/pppppppp/8/8/8/8/PPPPPPPP/R1B1K1BR w KQkq - 0 1", "e1").into_iter(),
            vec!["e1d1", "e1f1"],
        );

        // A piece on b1 blocks queenside only.
        assert_moves(
            geometric_from("rb2k2r/pppppppp/8/8/8/8/PPPPPPPP/RB2K2R w KQkq - 0 1", "e1").into_iter(),
            vec!["e1d1", "e1f1", "e1g1"],
        );

        // The f8 transit square is covered by the rook on f1, so black may
        // not castle kingside even though f8 itself is empty.
        assert_moves(
            geometric_from("1r2k2r/ppppp1pp/8/8/8/8/PPPPP1PP/R4RK1 b k - 0 1", "e8").into_iter(),
            vec!["e8d8", "e8f7", "e8f8"],
        );

        // Rights present in the flags but the rook is gone: no candidate.
        assert_moves(
            geometric_from("4k2r/8/8/8/8/8/8/4K3 w K - 0 1", "e1").into_iter(),
            vec!["e1d1", "e1f1", "e1d2", "e1e2", "e1f2"],
        );
    }
}
