//! Perft: leaf-node counts of the legal move tree.
//!
//! The counts from the starting position are published, so they pin down the
//! movement model and the king-safety filter together. Castling, en passant
//! and promotion first occur at depth 5, which keeps depths 1-4 comparable
//! with an engine that has none of them.

use crate::Board;
use chess_core::Color;

/// Number of move sequences of length `depth` from `board`, `side` to move.
pub fn perft(board: &Board, side: Color, depth: u32) -> u64 {
    let mut scratch = board.clone();
    walk(&mut scratch, side, depth)
}

/// Node counts split by first move, sorted by coordinate form (`e2e4`).
///
/// Comparing the split against another engine's narrows a wrong total down
/// to the first move that disagrees.
pub fn perft_divide(board: &Board, side: Color, depth: u32) -> Vec<(String, u64)> {
    let mut scratch = board.clone();
    let below = depth.saturating_sub(1);

    let mut split: Vec<(String, u64)> = scratch
        .legal_moves_for(side)
        .into_iter()
        .map(|mv| {
            scratch.execute_move(&mv);
            let nodes = walk(&mut scratch, !side, below);
            scratch.undo_move(&mv);
            (mv.to_coordinate(), nodes)
        })
        .collect();

    split.sort_unstable();
    split
}

/// Execute/undo recursion on a board the caller owns.
fn walk(board: &mut Board, side: Color, depth: u32) -> u64 {
    match depth {
        0 => 1,
        // Leaves need counting, not playing.
        1 => board.legal_moves_for(side).len() as u64,
        _ => board
            .legal_moves_for(side)
            .iter()
            .map(|mv| {
                board.execute_move(mv);
                let nodes = walk(board, !side, depth - 1);
                board.undo_move(mv);
                nodes
            })
            .sum(),
    }
}
