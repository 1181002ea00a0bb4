//! Game state machine: turn order, legality, terminal states and undo.
//!
//! The [`Game`] struct provides:
//! - Move validation with a specific error per violated rule
//! - Checkmate and stalemate detection after every move
//! - Move history with notation
//! - Single-step undo and reset

use std::fmt;

use chess_core::{Color, Piece, PieceKind, Square, SquareError};
use serde::Serialize;
use thiserror::Error;

use crate::{Board, BoardError, Move};

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A square was not written as a file letter followed by a rank digit.
    #[error(transparent)]
    InvalidNotation(#[from] SquareError),

    /// There is no piece on the source square.
    #[error("no piece at {0}")]
    EmptySquare(Square),

    /// The piece on the source square belongs to the side not to move.
    #[error("it is {to_move}'s turn, the piece on {square} is {color}")]
    WrongTurn {
        to_move: Color,
        color: Color,
        square: Square,
    },

    /// The destination is not among the piece's legal moves.
    #[error("illegal move: {color} {kind} cannot move from {from} to {to}")]
    IllegalMove {
        color: Color,
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    /// The game has already ended.
    #[error("game is over")]
    GameOver,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Checkmate,
    Stalemate,
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    /// `winner` delivered mate.
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn result(self) -> Option<GameResult> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Checkmate { .. } => Some(GameResult::Checkmate),
            GameStatus::Stalemate => Some(GameResult::Stalemate),
        }
    }

    /// Status of a position where `to_move` is about to play, `last_mover`
    /// having just moved.
    fn evaluate(board: &Board, to_move: Color, last_mover: Color) -> Self {
        let in_check = board.is_king_in_check(to_move);
        let has_reply = board.has_legal_move(to_move);
        match (in_check, has_reply) {
            (true, false) => GameStatus::Checkmate { winner: last_mover },
            (false, false) => GameStatus::Stalemate,
            _ => GameStatus::InProgress,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// Snapshot of a game, detached from the engine.
///
/// Every collection is an owned copy; changing it does not affect the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub current_player: Color,
    pub move_history: Vec<Move>,
    pub captured_pieces: Vec<Piece>,
    pub is_game_over: bool,
    pub winner: Option<Color>,
    pub result: Option<GameResult>,
    /// Whether the side to move is in check.
    pub is_check: bool,
}

/// A chess game from the standard starting position (or a custom one).
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
    history: Vec<Move>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            current_player: Color::White,
            history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Creates a game from a FEN string (placement and side to move).
    ///
    /// A position in which the side to move has no legal move starts out
    /// finished.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let active = chess_core::Fen::parse(fen)?.active_color;
        let board = Board::from_fen(fen)?;
        let status = GameStatus::evaluate(&board, active, active.opposite());
        Ok(Game {
            board,
            current_player: active,
            history: Vec::new(),
            status,
        })
    }

    /// Read access to the board, e.g. for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_king_in_check(self.current_player)
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Builds a detached snapshot of the game.
    pub fn state(&self) -> GameState {
        GameState {
            current_player: self.current_player,
            move_history: self.history.clone(),
            captured_pieces: self.board.captured().to_vec(),
            is_game_over: self.status.is_terminal(),
            winner: self.status.winner(),
            result: self.status.result(),
            is_check: self.is_check(),
        }
    }

    /// All legal moves of the side to move. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.board.legal_moves_for(self.current_player)
    }

    /// Legal moves of the piece on `square`; empty if the square is empty,
    /// holds a piece of the side not to move, or the game is over.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        match self.board.piece_at(square) {
            Some(piece) if piece.color == self.current_player && !self.status.is_terminal() => {
                self.board.legal_moves(piece)
            }
            _ => Vec::new(),
        }
    }

    /// Plays the move between two squares given in algebraic notation.
    pub fn make_move(&mut self, from: &str, to: &str) -> Result<&Move, GameError> {
        let from: Square = from.parse()?;
        let to: Square = to.parse()?;
        self.play(from, to)
    }

    /// Plays the move from `from` to `to` for the side to move.
    ///
    /// On success the board is updated, the validated move is appended to the
    /// history and returned, and the turn passes unless the game just ended.
    pub fn play(&mut self, from: Square, to: Square) -> Result<&Move, GameError> {
        let candidate = self.check_move(from, to).inspect_err(|e| {
            tracing::trace!(%from, %to, error = %e, "move rejected");
        })?;

        self.board.execute_move(&candidate);

        let mover = self.current_player;
        let opponent = mover.opposite();
        self.status = GameStatus::evaluate(&self.board, opponent, mover);

        let number = (self.history.len() / 2) as u32 + 1;
        let in_check = self.board.is_king_in_check(opponent);
        let record = candidate.validated(
            in_check,
            matches!(self.status, GameStatus::Checkmate { .. }),
            number,
        );
        tracing::debug!(color = %mover, notation = record.notation(), "move played");
        let index = self.history.len();
        self.history.push(record);

        match self.status {
            GameStatus::InProgress => self.current_player = opponent,
            GameStatus::Checkmate { winner } => tracing::info!(%winner, "checkmate"),
            GameStatus::Stalemate => tracing::info!("stalemate"),
        }

        Ok(&self.history[index])
    }

    /// Validates a move and returns it as a candidate.
    fn check_move(&self, from: Square, to: Square) -> Result<Move, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }

        let piece = self.board.piece_at(from).ok_or(GameError::EmptySquare(from))?;
        if piece.color != self.current_player {
            return Err(GameError::WrongTurn {
                to_move: self.current_player,
                color: piece.color,
                square: from,
            });
        }

        self.board
            .legal_moves(piece)
            .into_iter()
            .find(|mv| mv.to() == to)
            .ok_or(GameError::IllegalMove {
                color: piece.color,
                kind: piece.kind,
                from,
                to,
            })
    }

    /// Takes back the last move. Returns false if there is nothing to undo.
    ///
    /// The game returns to `InProgress`, which is exact: moves are only
    /// accepted while the game is in progress.
    pub fn undo(&mut self) -> bool {
        let Some(last) = self.history.pop() else {
            return false;
        };

        self.board.undo_move(&last);
        self.current_player = last.piece().color;
        self.status = GameStatus::InProgress;
        tracing::debug!(notation = last.notation(), "move undone");
        true
    }

    /// Discards the board and history and starts again from the initial
    /// position.
    pub fn reset(&mut self) {
        *self = Game::new();
        tracing::debug!("game reset");
    }

    /// The move history, one move per line.
    pub fn history_string(&self) -> String {
        self.history
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
