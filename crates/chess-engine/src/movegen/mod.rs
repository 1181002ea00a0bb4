//! Piece movement model.
//!
//! Every piece kind is described by a small set of [`Direction`]s: a step
//! vector, a step limit and a [`Gate`] saying which kind of target square the
//! direction may land on. [`reachable_squares`] casts one ray per direction
//! against the current board, which gives the pseudo-legal destinations of a
//! piece. King safety is not considered here; see [`Board::legal_moves`].
//!
//! [`Board::legal_moves`]: crate::Board::legal_moves

mod attacks;
pub mod perft;

use crate::{Board, SquareSet};
use chess_core::{Color, Piece, PieceKind};

pub use attacks::is_attacked_by;

/// Step limit for sliding pieces: the board diameter.
pub const SLIDE_LIMIT: u8 = 7;

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Which target squares a direction may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Empty squares, or an opponent piece which ends the ray.
    Any,
    /// Empty squares only.
    Quiet,
    /// Empty squares only, and every square jumped over must be empty too.
    QuietPath,
    /// Squares holding an opponent piece only.
    Capture,
}

/// One ray of movement for a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub file: i8,
    pub rank: i8,
    pub max_steps: u8,
    pub gate: Gate,
}

impl Direction {
    const fn new(file: i8, rank: i8, max_steps: u8, gate: Gate) -> Self {
        Direction {
            file,
            rank,
            max_steps,
            gate,
        }
    }
}

/// The directions of one piece, at most eight.
#[derive(Clone)]
pub struct Directions {
    items: [Direction; Self::MAX],
    len: usize,
}

impl Directions {
    /// No piece kind has more than eight directions.
    pub const MAX: usize = 8;

    const fn new() -> Self {
        Directions {
            items: [Direction::new(0, 0, 0, Gate::Any); Self::MAX],
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, direction: Direction) {
        debug_assert!(self.len < Self::MAX);
        self.items[self.len] = direction;
        self.len += 1;
    }

    fn extend(&mut self, steps: &[(i8, i8)], max_steps: u8) {
        for &(file, rank) in steps {
            self.push(Direction::new(file, rank, max_steps, Gate::Any));
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Direction] {
        &self.items[..self.len]
    }
}

impl<'a> IntoIterator for &'a Directions {
    type Item = &'a Direction;
    type IntoIter = std::slice::Iter<'a, Direction>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for Directions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Returns the movement directions of a piece kind.
///
/// `pawn_unmoved` only matters for pawns: the two-square advance is offered
/// while the pawn still stands unmoved on its home rank.
pub fn directions(kind: PieceKind, color: Color, pawn_unmoved: bool) -> Directions {
    let mut dirs = Directions::new();
    match kind {
        PieceKind::Pawn => {
            let forward = color.pawn_direction();
            dirs.push(Direction::new(0, forward, 1, Gate::Quiet));
            if pawn_unmoved {
                dirs.push(Direction::new(0, 2 * forward, 1, Gate::QuietPath));
            }
            dirs.push(Direction::new(-1, forward, 1, Gate::Capture));
            dirs.push(Direction::new(1, forward, 1, Gate::Capture));
        }
        PieceKind::Knight => dirs.extend(&KNIGHT_JUMPS, 1),
        PieceKind::Bishop => dirs.extend(&DIAGONAL, SLIDE_LIMIT),
        PieceKind::Rook => dirs.extend(&ORTHOGONAL, SLIDE_LIMIT),
        PieceKind::Queen => {
            dirs.extend(&ORTHOGONAL, SLIDE_LIMIT);
            dirs.extend(&DIAGONAL, SLIDE_LIMIT);
        }
        PieceKind::King => {
            dirs.extend(&ORTHOGONAL, 1);
            dirs.extend(&DIAGONAL, 1);
        }
    }
    dirs
}

/// True while a pawn may still make its two-square advance.
#[inline]
pub fn pawn_unmoved(piece: &Piece) -> bool {
    piece.kind == PieceKind::Pawn
        && !piece.has_moved
        && piece.square.rank() == piece.color.pawn_home_rank()
}

/// Squares `piece` could move to on `board`, ignoring the safety of its king.
///
/// Each direction is walked one step at a time: leaving the board or meeting
/// a friendly piece ends the ray, an opponent piece is included (if the gate
/// allows captures) and then ends the ray, and an empty square is included
/// (if the gate allows quiet moves) before stepping on, up to the limit.
pub fn reachable_squares(board: &Board, piece: &Piece) -> SquareSet {
    let mut reachable = SquareSet::EMPTY;

    for dir in &directions(piece.kind, piece.color, pawn_unmoved(piece)) {
        let mut current = piece.square;
        for _ in 0..dir.max_steps {
            let Some(next) = current.offset(dir.file, dir.rank) else {
                break;
            };

            match board.piece_at(next) {
                Some(occupant) if occupant.color == piece.color => break,
                Some(_) => {
                    if matches!(dir.gate, Gate::Any | Gate::Capture) {
                        reachable.insert(next);
                    }
                    break;
                }
                None => match dir.gate {
                    Gate::Capture => break,
                    Gate::QuietPath if !path_is_clear(board, current, dir) => break,
                    _ => reachable.insert(next),
                },
            }

            current = next;
        }
    }

    reachable
}

/// True if every square strictly between `from` and `from + dir` is empty.
fn path_is_clear(board: &Board, from: chess_core::Square, dir: &Direction) -> bool {
    let (step_file, step_rank) = (dir.file.signum(), dir.rank.signum());
    let steps = dir.file.abs().max(dir.rank.abs());
    (1..steps).all(|i| {
        from.offset(step_file * i, step_rank * i)
            .is_some_and(|sq| !board.is_occupied(sq))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn reachable(board: &Board, at: &str) -> Vec<String> {
        let piece = board.piece_at(sq(at)).expect("piece on square");
        let mut squares: Vec<String> = reachable_squares(board, piece)
            .iter()
            .map(|s| s.to_string())
            .collect();
        squares.sort();
        squares
    }

    #[test]
    fn direction_counts() {
        assert_eq!(directions(PieceKind::Knight, Color::White, false).len(), 8);
        assert_eq!(directions(PieceKind::Bishop, Color::White, false).len(), 4);
        assert_eq!(directions(PieceKind::Rook, Color::Black, false).len(), 4);
        assert_eq!(directions(PieceKind::Queen, Color::White, false).len(), 8);
        assert_eq!(directions(PieceKind::King, Color::White, false).len(), 8);
        assert_eq!(directions(PieceKind::Pawn, Color::White, true).len(), 4);
        assert_eq!(directions(PieceKind::Pawn, Color::White, false).len(), 3);
    }

    #[test]
    fn step_limits() {
        for dir in &directions(PieceKind::Queen, Color::White, false) {
            assert_eq!(dir.max_steps, SLIDE_LIMIT);
            assert_eq!(dir.gate, Gate::Any);
        }
        for dir in &directions(PieceKind::King, Color::Black, false) {
            assert_eq!(dir.max_steps, 1);
        }
    }

    #[test]
    fn black_pawn_moves_down() {
        let dirs = directions(PieceKind::Pawn, Color::Black, true);
        assert!(dirs.as_slice().iter().all(|d| d.rank < 0));
    }

    #[test]
    fn starting_pawn() {
        let board = Board::new();
        assert_eq!(reachable(&board, "e2"), vec!["e3", "e4"]);
        assert_eq!(reachable(&board, "d7"), vec!["d5", "d6"]);
    }

    #[test]
    fn moved_pawn_advances_one() {
        let board = Board::from_fen("4k3/8/8/8/8/4P3/8/4K3").unwrap();
        // Not on its home rank, so only a single step.
        assert_eq!(reachable(&board, "e3"), vec!["e4"]);
    }

    #[test]
    fn pawn_double_step_needs_clear_path() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3").unwrap();
        assert!(reachable(&board, "e2").is_empty());

        let board = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3").unwrap();
        assert_eq!(reachable(&board, "e2"), vec!["e3"]);
    }

    #[test]
    fn pawn_captures_only_diagonally() {
        let board = Board::from_fen("4k3/8/8/8/8/3p1P2/4P3/4K3").unwrap();
        // d3 holds an opponent, f3 a friend.
        assert_eq!(reachable(&board, "e2"), vec!["d3", "e3", "e4"]);

        let board = Board::from_fen("4k3/8/8/3p4/3P4/8/8/4K3").unwrap();
        assert!(reachable(&board, "d4").is_empty());
    }

    #[test]
    fn rook_ray_stops_at_first_piece() {
        let board = Board::from_fen("4k3/8/8/8/p7/8/8/R3K3").unwrap();
        assert_eq!(
            reachable(&board, "a1"),
            vec!["a2", "a3", "a4", "b1", "c1", "d1"]
        );

        let board = Board::from_fen("4k3/8/8/8/P7/8/8/R3K3").unwrap();
        assert_eq!(reachable(&board, "a1"), vec!["a2", "a3", "b1", "c1", "d1"]);
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let board = Board::new();
        assert_eq!(reachable(&board, "g1"), vec!["f3", "h3"]);
        assert_eq!(reachable(&board, "b8"), vec!["a6", "c6"]);
    }

    #[test]
    fn blocked_pieces_in_start_position() {
        let board = Board::new();
        for at in ["a1", "c1", "d1", "e1", "f1", "h8"] {
            assert!(reachable(&board, at).is_empty(), "{at} should be boxed in");
        }
    }

    #[test]
    fn queen_in_open_board() {
        let board = Board::from_fen("k7/8/8/8/3Q4/8/8/7K").unwrap();
        // 27 squares from d4 on an otherwise empty board.
        assert_eq!(reachable(&board, "d4").len(), 27);
    }

    #[test]
    fn king_steps_once() {
        let board = Board::from_fen("k7/8/8/8/8/8/8/7K").unwrap();
        assert_eq!(reachable(&board, "h1"), vec!["g1", "g2", "h2"]);
    }
}
