//! Chess rules engine: legal moves, check detection and game state.
//!
//! This crate provides:
//! - [`Board`] - piece placement, captured pieces and raw move execution
//! - [`movegen`] - the per-piece movement model and attack detection
//! - [`Move`] - move records with generated notation
//! - [`Game`] - turn order, legality filtering, checkmate/stalemate and undo
//!
//! # Legality
//!
//! A move is legal in two phases: the piece's movement model yields the
//! squares it can reach on the current board (pseudo-legal moves), then every
//! candidate that would leave the mover's own king attacked is discarded.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameResult};
//!
//! let mut game = Game::new();
//! game.make_move("f2", "f3").unwrap();
//! game.make_move("e7", "e5").unwrap();
//! game.make_move("g2", "g4").unwrap();
//! game.make_move("d8", "h4").unwrap();
//!
//! let state = game.state();
//! assert!(state.is_game_over);
//! assert_eq!(state.result, Some(GameResult::Checkmate));
//! println!("{}", game.board());
//! ```

mod board;
mod game;
mod mov;
pub mod movegen;
mod squareset;

pub use board::{Board, BoardError};
pub use game::{Game, GameError, GameResult, GameState, GameStatus};
pub use mov::Move;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{directions, reachable_squares, Direction, Gate};
pub use squareset::SquareSet;
