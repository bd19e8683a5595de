use serde::{Deserialize, Serialize};

use super::model::{ChessField, Color, Piece, PieceType, Square};

/// The 8x8 grid. Pure data: accessors only, no rules knowledge. Off-board
/// coordinates are a programming error; callers guard with [`Board::in_bounds`]
/// before building a [`ChessField`] from signed offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Square; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self { squares: [[Square::Empty; 8]; 8] }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        use PieceType::*;
        const BACK_RANK: [PieceType; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Square::Occupied(Piece { color: Color::White, kind });
            board.squares[7][col] = Square::Occupied(Piece { color: Color::Black, kind });
        }
        for col in 0..8 {
            board.squares[1][col] = Square::Occupied(Piece { color: Color::White, kind: Pawn });
            board.squares[6][col] = Square::Occupied(Piece { color: Color::Black, kind: Pawn });
        }
        board
    }

    pub fn in_bounds(row: isize, col: isize) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    pub fn get(&self, field: ChessField) -> Square {
        self.squares[field.row as usize][field.col as usize]
    }

    pub fn set(&mut self, field: ChessField, square: Square) {
        self.squares[field.row as usize][field.col as usize] = square;
    }

    pub fn piece_at(&self, field: ChessField) -> Option<Piece> {
        match self.get(field) {
            Square::Occupied(piece) => Some(piece),
            Square::Empty => None,
        }
    }

    pub fn is_empty(&self, field: ChessField) -> bool {
        self.get(field) == Square::Empty
    }

    /// All pieces on the board along with their coordinates.
    pub fn pieces(&self) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        (0u8..8).flat_map(move |row| {
            (0u8..8).filter_map(move |col| {
                let field = ChessField::new(row, col);
                self.piece_at(field).map(|piece| (field, piece))
            })
        })
    }

    pub fn find_king(&self, color: Color) -> Option<ChessField> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece { color, kind: PieceType::King })
            .map(|(field, _)| field)
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in (0..8).rev() {
            board_representation.push_str(&format!("{} │", row + 1));
            for col in 0..8 {
                let square = match self.squares[row][col] {
                    Square::Empty => ' ',
                    Square::Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", row + 1));

            if row > 0 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_setup_layout() {
        let board = Board::standard();

        assert_eq!(
            board.piece_at(ChessField::from_algebraic("e1").unwrap()),
            Some(Piece { color: Color::White, kind: PieceType::King })
        );
        assert_eq!(
            board.piece_at(ChessField::from_algebraic("d8").unwrap()),
            Some(Piece { color: Color::Black, kind: PieceType::Queen })
        );
        for col in 0..8 {
            assert_eq!(
                board.piece_at(ChessField::new(1, col)),
                Some(Piece { color: Color::White, kind: PieceType::Pawn })
            );
            assert_eq!(
                board.piece_at(ChessField::new(6, col)),
                Some(Piece { color: Color::Black, kind: PieceType::Pawn })
            );
        }
        for row in 2..6 {
            for col in 0..8 {
                assert!(board.is_empty(ChessField::new(row, col)));
            }
        }
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn find_king_scans_the_grid() {
        let board = Board::standard();
        assert_eq!(board.find_king(Color::White), ChessField::from_algebraic("e1"));
        assert_eq!(board.find_king(Color::Black), ChessField::from_algebraic("e8"));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn bounds_guard() {
        assert!(Board::in_bounds(0, 0));
        assert!(Board::in_bounds(7, 7));
        assert!(!Board::in_bounds(-1, 4));
        assert!(!Board::in_bounds(4, 8));
    }
}
