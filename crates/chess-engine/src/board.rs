//! Board occupancy and raw move execution.
//!
//! The [`Board`] is the only owner of [`Piece`] records. It answers "what
//! stands where" and applies moves without checking them; legality is decided
//! by callers through [`Board::legal_moves`].

use std::fmt;

use chess_core::{Color, Fen, FenError, File, Piece, PieceKind, Rank, Square};
use thiserror::Error;

use crate::movegen::{self, reachable_squares};
use crate::{Move, SquareSet};

/// Errors raised while setting up a board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    Occupied(Square),

    #[error(transparent)]
    Fen(#[from] FenError),
}

/// Piece placement plus the list of captured pieces.
///
/// Each occupied square holds exactly one piece whose `square` field names
/// that square. Captured pieces are appended in capture order; the last entry
/// is the one the next [`undo_move`](Board::undo_move) of a capture restores.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    captured: Vec<Piece>,
}

impl Board {
    /// Creates the standard starting position.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, kind) in File::ALL.into_iter().zip(PieceKind::BACK_RANK) {
                board.put(Piece::new(kind, color, Square::new(file, color.back_rank())));
                board.put(Piece::new(
                    PieceKind::Pawn,
                    color,
                    Square::new(file, color.pawn_home_rank()),
                ));
            }
        }
        board
    }

    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            captured: Vec::new(),
        }
    }

    /// Builds a board from the placement field of a FEN string.
    ///
    /// Pieces are marked unmoved. Any side-to-move field is ignored here; see
    /// [`Game::from_fen`](crate::Game::from_fen).
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed = Fen::parse(fen)?;
        let mut board = Board::empty();
        for (square, kind, color) in parsed.placement {
            board.place(kind, color, square)?;
        }
        Ok(board)
    }

    /// Returns the FEN placement field for this board.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty_count = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.kind.to_fen_char(piece.color));
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::R1 {
                fen.push('/');
            }
        }
        fen
    }

    /// Places a new, unmoved piece on an empty square.
    pub fn place(&mut self, kind: PieceKind, color: Color, square: Square) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::Occupied(square));
        }
        self.put(Piece::new(kind, color, square));
        Ok(())
    }

    #[inline]
    fn put(&mut self, piece: Piece) {
        self.squares[piece.square.index() as usize] = Some(piece);
    }

    #[inline]
    fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize].take()
    }

    /// Returns the piece on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index() as usize].as_ref()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// True if `square` holds a piece of `color`.
    #[inline]
    pub fn is_occupied_by(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color == color)
    }

    /// True if `square` holds a piece of the side opposing `color`.
    #[inline]
    pub fn is_occupied_by_opponent(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color != color)
    }

    /// All pieces on the board, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten()
    }

    /// All pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// The first king of `color` found, if there is one.
    ///
    /// Nothing stops a position from holding no king, or several.
    pub fn find_king(&self, color: Color) -> Option<&Piece> {
        self.pieces_of(color).find(|p| p.kind == PieceKind::King)
    }

    /// Pieces captured so far, in capture order.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Applies `mv` without any legality check.
    ///
    /// A capture removes the piece on the destination and appends it to the
    /// captured list. The mover is relocated and its `square` and `has_moved`
    /// fields updated.
    pub fn execute_move(&mut self, mv: &Move) {
        if mv.is_capture() {
            if let Some(victim) = self.take(mv.to()) {
                self.captured.push(victim);
            }
        }

        debug_assert!(self.is_occupied(mv.from()), "no piece on {}", mv.from());
        let mut piece = self.take(mv.from()).unwrap_or(*mv.piece());
        piece.square = mv.to();
        piece.has_moved = true;
        self.put(piece);
    }

    /// Reverts `mv`, which must be the move most recently executed.
    pub fn undo_move(&mut self, mv: &Move) {
        debug_assert!(self.is_occupied(mv.to()), "no piece on {}", mv.to());
        let mut piece = self.take(mv.to()).unwrap_or(*mv.piece());
        piece.square = mv.from();
        piece.has_moved = mv.piece().has_moved;
        self.put(piece);

        if mv.is_capture() {
            if let Some(victim) = self.captured.pop().or(mv.captured().copied()) {
                self.put(victim);
            }
        }
    }

    /// Squares `piece` can reach on this board, ignoring king safety.
    #[inline]
    pub fn reachable_squares(&self, piece: &Piece) -> SquareSet {
        reachable_squares(self, piece)
    }

    /// True if the king of `color` stands on a square some opposing piece can
    /// reach. A color without a king is never in check.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => movegen::is_attacked_by(self, king.square, color.opposite()),
            None => false,
        }
    }

    /// True if playing `mv` would leave the mover's own king attacked.
    ///
    /// The move is tried on a scratch copy of the placement, so `self` is never
    /// observed in an intermediate state.
    pub fn would_put_king_in_check(&self, mv: &Move) -> bool {
        let mut scratch = Board {
            squares: self.squares,
            captured: Vec::new(),
        };
        scratch.execute_move(mv);
        scratch.is_king_in_check(mv.piece().color)
    }

    /// Legal moves of `piece`: its reachable squares minus those that would
    /// expose its own king.
    pub fn legal_moves(&self, piece: &Piece) -> Vec<Move> {
        self.reachable_squares(piece)
            .iter()
            .map(|to| Move::candidate(piece, to, self))
            .filter(|mv| !self.would_put_king_in_check(mv))
            .collect()
    }

    /// Legal moves of every piece of `color`.
    pub fn legal_moves_for(&self, color: Color) -> Vec<Move> {
        self.pieces_of(color)
            .flat_map(|piece| self.legal_moves(piece))
            .collect()
    }

    /// True if `color` has at least one legal move.
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.pieces_of(color).any(|piece| {
            self.reachable_squares(piece)
                .iter()
                .any(|to| !self.would_put_king_in_check(&Move::candidate(piece, to, self)))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.to_fen())
            .field("captured", &self.captured)
            .finish()
    }
}

/// Renders the board from White's side with figurines, `·` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{} ", rank)?;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{} ", piece.symbol())?,
                    None => write!(f, "· ")?,
                }
            }
            writeln!(f, "{}", rank)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
