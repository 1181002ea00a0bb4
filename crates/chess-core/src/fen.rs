//! FEN piece-placement parsing.
//!
//! Only the placement and active-color fields are interpreted. Castling,
//! en passant and clock fields may be present and are ignored.

use thiserror::Error;

use crate::{Color, File, PieceKind, Rank, Square};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,

    #[error("invalid piece placement: expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid piece placement: rank {rank} describes {files} files")]
    RankWidth { rank: char, files: usize },

    #[error("invalid piece placement: unexpected character '{0}'")]
    InvalidPiece(char),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),
}

/// The placement and side to move read from a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Every occupied square, in the order the string lists them (rank 8 first).
    pub placement: Vec<(Square, PieceKind, Color)>,
    /// Side to move. Defaults to White when the field is absent.
    pub active_color: Color,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string or a bare placement field.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let placement_field = parts.next().ok_or(FenError::Empty)?;
        let placement = Self::parse_placement(placement_field)?;

        let active_color = match parts.next() {
            None => Color::White,
            Some(field) if field.len() == 1 => field
                .parse()
                .map_err(|_| FenError::InvalidActiveColor(field.to_string()))?,
            Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        Ok(Fen {
            placement,
            active_color,
        })
    }

    fn parse_placement(field: &str) -> Result<Vec<(Square, PieceKind, Color)>, FenError> {
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut placement = Vec::new();
        for (rank_str, rank) in ranks.iter().zip(Rank::ALL.iter().rev()) {
            let mut files = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    files += skip as usize;
                } else {
                    let (kind, color) = PieceKind::from_fen_char(c).ok_or(FenError::InvalidPiece(c))?;
                    if let Some(file) = File::from_index(files as u8) {
                        placement.push((Square::new(file, *rank), kind, color));
                    }
                    files += 1;
                }
            }
            if files != 8 {
                return Err(FenError::RankWidth {
                    rank: rank.to_char(),
                    files,
                });
            }
        }
        Ok(placement)
    }
}
