//! Attack detection.

use super::reachable_squares;
use crate::Board;
use chess_core::{Color, Square};

/// Returns true if any piece of `attacker` can reach `target`.
///
/// Attacks are read from each piece's reachable set, so the answer is only
/// meaningful for a square holding a piece of the other color: pawns reach a
/// diagonal only when there is something on it to capture. That is always the
/// case for the king lookups this is used for.
pub fn is_attacked_by(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|piece| reachable_squares(board, piece).contains(target))
}
