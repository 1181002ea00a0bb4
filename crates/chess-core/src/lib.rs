//! Core types for chess.
//!
//! This crate provides the fundamental types used across the chess engine:
//! - [`Color`] for the two sides
//! - [`Square`], [`File`], and [`Rank`] for board coordinates and notation
//! - [`PieceKind`] and the placed [`Piece`] record
//! - FEN placement parsing for setting up positions

mod color;
mod fen;
mod piece;
mod square;

pub use color::{Color, ParseColorError};
pub use fen::{Fen, FenError};
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square, SquareDistance, SquareError};
