//! Replay scripts.
//!
//! A script is a TOML file listing moves to play, optionally from a custom
//! position:
//!
//! ```toml
//! fen = "7k/8/6K1/8/8/8/8/5Q2 w - - 0 1"
//!
//! [[moves]]
//! from = "f1"
//! to = "f7"
//! ```

use std::path::Path;

use chess_engine::{BoardError, Game, GameError};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a script.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the script file from disk.
    #[error("failed to read script: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML or does not match the script layout.
    #[error("failed to parse script: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The starting position could not be set up.
    #[error("invalid starting position: {0}")]
    Position(#[from] BoardError),
}

/// One scripted move.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScriptMove {
    pub from: String,
    pub to: String,
}

/// A list of moves, optionally from a custom position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Starting position. Defaults to the standard one.
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub moves: Vec<ScriptMove>,
}

/// Outcome of a replay.
#[derive(Debug)]
pub struct Replay {
    pub game: Game,
    /// Index and reason of the first move the engine refused, if any.
    pub rejected: Option<(usize, GameError)>,
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Plays the script, stopping at the first rejected move.
    pub fn replay(&self) -> Result<Replay, ConfigError> {
        let mut game = match &self.fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };

        for (index, mv) in self.moves.iter().enumerate() {
            if let Err(e) = game.make_move(&mv.from, &mv.to) {
                tracing::warn!(index, from = %mv.from, to = %mv.to, error = %e, "replay stopped");
                return Ok(Replay {
                    game,
                    rejected: Some((index, e)),
                });
            }
        }

        Ok(Replay {
            game,
            rejected: None,
        })
    }
}
