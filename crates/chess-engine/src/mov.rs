//! Move records and their notation.

use std::fmt;

use chess_core::{File, Piece, PieceKind, Square, SquareDistance};
use serde::Serialize;

use crate::Board;

/// A transition of one piece from one square to another.
///
/// A move starts life as a *candidate*, built against the board it would be
/// played on; capture information is read from that board. Once the game has
/// played it, [`validated`](Move::validated) produces the historical record
/// with check flags, move number and final notation. A `Move` is never
/// changed after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    is_capture: bool,
    is_check: bool,
    is_checkmate: bool,
    number: u32,
    notation: String,
}

impl Move {
    /// Builds an unvalidated move of `piece` to `to` on `board`.
    pub fn candidate(piece: &Piece, to: Square, board: &Board) -> Self {
        let captured = board.piece_at(to).copied();
        let mut mv = Move {
            from: piece.square,
            to,
            piece: *piece,
            captured,
            is_capture: captured.is_some(),
            is_check: false,
            is_checkmate: false,
            number: 0,
            notation: String::new(),
        };
        mv.notation = mv.generate_notation();
        mv
    }

    /// Returns the historical form of this move, carrying the check status of
    /// the position it produced and its full-move number.
    pub fn validated(&self, is_check: bool, is_checkmate: bool, number: u32) -> Self {
        let mut mv = Move {
            is_check,
            is_checkmate,
            number,
            ..self.clone()
        };
        mv.notation = mv.generate_notation();
        mv
    }

    fn generate_notation(&self) -> String {
        if self.is_castling() {
            return if self.to.file() == File::G {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }

        let capture = if self.is_capture { "x" } else { "" };
        let suffix = if self.is_checkmate {
            "#"
        } else if self.is_check {
            "+"
        } else {
            ""
        };
        format!("{}{}{}{}", self.piece.kind.letter(), capture, self.to, suffix)
    }

    /// True for a king moving two files along its rank.
    ///
    /// Only the notation looks at this. Kings step one square, so no move the
    /// engine generates satisfies it.
    pub fn is_castling(&self) -> bool {
        let distance = self.distance();
        self.piece.kind == PieceKind::King && distance.files == 2 && distance.ranks == 0
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    /// The moving piece as it stood before the move.
    #[inline]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// The piece standing on the destination when the move was built.
    #[inline]
    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.is_capture
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    /// Full-move number; 0 for a candidate.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn distance(&self) -> SquareDistance {
        self.from.distance(self.to)
    }

    /// True if both moves connect the same two squares.
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }

    /// Coordinate form, e.g. `e2e4`.
    pub fn to_coordinate(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Long description, e.g. `3. white pawn from e4 to d5 (capture)`.
    pub fn describe(&self) -> String {
        let mut text = format!(
            "{}. {} {} from {} to {}",
            self.number, self.piece.color, self.piece.kind, self.from, self.to
        );
        if self.is_capture {
            text.push_str(" (capture)");
        }
        if self.is_checkmate {
            text.push_str(" (checkmate)");
        } else if self.is_check {
            text.push_str(" (check)");
        }
        text
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.notation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn candidate(board: &Board, from: &str, to: &str) -> Move {
        let piece = board.piece_at(sq(from)).expect("piece on square");
        Move::candidate(piece, sq(to), board)
    }

    #[test]
    fn pawn_push_notation() {
        let board = Board::new();
        let mv = candidate(&board, "e2", "e4");
        assert_eq!(mv.notation(), "e4");
        assert!(!mv.is_capture());
        assert_eq!(mv.number(), 0);
        assert_eq!(mv.to_coordinate(), "e2e4");
    }

    #[test]
    fn piece_letter_notation() {
        let board = Board::new();
        assert_eq!(candidate(&board, "g1", "f3").notation(), "Nf3");
        assert_eq!(candidate(&board, "b8", "c6").notation(), "Nc6");
    }

    #[test]
    fn capture_is_read_from_board() {
        let board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let mv = candidate(&board, "e4", "d5");
        assert!(mv.is_capture());
        assert_eq!(mv.captured().map(|p| (p.kind, p.color)), Some((PieceKind::Pawn, Color::Black)));
        assert_eq!(mv.notation(), "xd5");
    }

    #[test]
    fn validated_adds_check_suffix() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let mv = candidate(&board, "a1", "a8");
        let check = mv.validated(true, false, 12);
        assert_eq!(check.notation(), "Ra8+");
        assert_eq!(check.number(), 12);
        assert_eq!(check.to_string(), "12. Ra8+");

        let mate = mv.validated(true, true, 12);
        assert_eq!(mate.notation(), "Ra8#");
        assert!(mate.is_checkmate());
        // The candidate itself is unchanged.
        assert_eq!(mv.notation(), "Ra8");
        assert!(!mv.is_check());
    }

    #[test]
    fn castling_notation_heuristic() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        let king = board.piece_at(Square::E1).unwrap();
        assert_eq!(Move::candidate(king, Square::G1, &board).notation(), "O-O");
        assert_eq!(Move::candidate(king, Square::C1, &board).notation(), "O-O-O");
        assert!(!Move::candidate(king, Square::F1, &board).is_castling());
    }

    #[test]
    fn describe_long_form() {
        let board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let mv = candidate(&board, "e4", "d5").validated(false, false, 3);
        assert_eq!(mv.describe(), "3. white pawn from e4 to d5 (capture)");
    }

    #[test]
    fn same_squares_ignores_flags() {
        let board = Board::new();
        let a = candidate(&board, "e2", "e4");
        let b = a.validated(true, false, 1);
        assert!(a.same_squares(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn records_are_plain_values() {
        let board = Board::new();
        let first = candidate(&board, "g1", "f3").validated(false, false, 1);
        let again = candidate(&board, "g1", "f3").validated(false, false, 1);
        assert_eq!(first, again);
    }
}
