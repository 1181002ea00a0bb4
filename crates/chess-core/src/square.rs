//! Board coordinates: files, ranks and squares.
//!
//! Algebraic notation ("e4") is the only textual form a square has. Parsing
//! rejects anything that is not exactly a file letter `a`-`h` followed by a
//! rank digit `1`-`8`; nothing is clamped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when reading a square from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square notation: '{0}'")]
    InvalidNotation(String),
}

/// Declares one board axis: an eight-valued enum indexed 0-7 whose
/// notation is a single character counted up from `$first`.
macro_rules! board_axis {
    ($(#[$doc:meta])* $name:ident, $first:literal, [$($variant:ident),+ $(,)?]) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All values in board order.
            pub const ALL: [$name; 8] = [$($name::$variant),+];

            #[inline]
            pub const fn from_index(index: u8) -> Option<Self> {
                if index < 8 {
                    Some(Self::ALL[index as usize])
                } else {
                    None
                }
            }

            /// Reads the notation character. Anything outside the eight
            /// accepted characters is rejected, including other cases.
            #[inline]
            pub const fn from_char(c: char) -> Option<Self> {
                let offset = (c as u32).wrapping_sub($first as u32);
                if offset < 8 {
                    Self::from_index(offset as u8)
                } else {
                    None
                }
            }

            #[inline]
            pub const fn index(self) -> u8 {
                self as u8
            }

            #[inline]
            pub const fn to_char(self) -> char {
                ($first as u8 + self as u8) as char
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_char())
            }
        }
    };
}

board_axis!(
    /// A file (column), `a` to `h` from White's left.
    File,
    'a',
    [A, B, C, D, E, F, G, H]
);

board_axis!(
    /// A rank (row), `1` to `8` from White's side.
    Rank,
    '1',
    [R1, R2, R3, R4, R5, R6, R7, R8]
);

/// Absolute file and rank separation between two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareDistance {
    pub files: u8,
    pub ranks: u8,
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed in little-endian rank-file mapping:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
///
/// A `Square` is always on the board; every constructor that takes
/// untrusted input returns `Option` or `Result`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from 1-based file and rank numbers.
    ///
    /// Returns `None` unless both lie in `1..=8`.
    #[inline]
    pub const fn from_coords(file: i8, rank: i8) -> Option<Self> {
        if file < 1 || file > 8 || rank < 1 || rank > 8 {
            return None;
        }
        Some(Square(((rank - 1) * 8 + (file - 1)) as u8))
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 % 8) as usize]
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / 8) as usize]
    }

    /// Returns the 1-based file number (a = 1).
    #[inline]
    pub const fn file_number(self) -> i8 {
        (self.0 % 8) as i8 + 1
    }

    /// Returns the 1-based rank number.
    #[inline]
    pub const fn rank_number(self) -> i8 {
        (self.0 / 8) as i8 + 1
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Steps by `(files, ranks)`, or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        match (
            self.file_number().checked_add(files),
            self.rank_number().checked_add(ranks),
        ) {
            (Some(file), Some(rank)) => Self::from_coords(file, rank),
            _ => None,
        }
    }

    /// Absolute file and rank distance to `other`.
    #[inline]
    pub const fn distance(self, other: Square) -> SquareDistance {
        SquareDistance {
            files: (self.file_number() - other.file_number()).unsigned_abs(),
            ranks: (self.rank_number() - other.rank_number()).unsigned_abs(),
        }
    }

    /// True if both squares share a diagonal and are distinct.
    #[inline]
    pub const fn same_diagonal(self, other: Square) -> bool {
        let d = self.distance(other);
        d.files == d.ranks && d.files > 0
    }

    #[inline]
    pub const fn same_file(self, other: Square) -> bool {
        self.0 % 8 == other.0 % 8
    }

    #[inline]
    pub const fn same_rank(self, other: Square) -> bool {
        self.0 / 8 == other.0 / 8
    }

    /// Iterates over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    // Common squares
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| SquareError::InvalidNotation(s.to_string()))
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_algebraic()
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
