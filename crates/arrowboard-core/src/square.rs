//! Board squares, orientation and board dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest rank number accepted when parsing a square.
const MAX_RANK: u8 = 99;

/// Number of files that have a letter (`a` to `z`).
pub const MAX_FILES: u8 = 26;

/// Errors produced when parsing a square identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("Empty square identifier")]
    Empty,
    #[error("Invalid file in square identifier: {0}")]
    InvalidFile(String),
    #[error("Invalid rank in square identifier: {0}")]
    InvalidRank(String),
}

/// A board square such as `e4`.
///
/// Files are stored zero-based from `a`, ranks zero-based from `1`.
/// A square is only meaningful relative to a [`BoardDimensions`]; squares
/// outside the board are valid values but map to no pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square from zero-based file and rank indices.
    ///
    /// Returns `None` when the square has no text form: files past `z`
    /// or ranks past 99.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < MAX_FILES && rank < MAX_RANK {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Zero-based file index (`a` = 0).
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank `1` = 0).
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Check whether the square lies on a board of the given size.
    pub fn is_on(&self, dimensions: BoardDimensions) -> bool {
        self.file < dimensions.cols && self.rank < dimensions.rows
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.file), u16::from(self.rank) + 1)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file_char = chars.next().ok_or(SquareParseError::Empty)?;
        if !file_char.is_ascii_lowercase() {
            return Err(SquareParseError::InvalidFile(s.to_string()));
        }

        let rank_str = chars.as_str();
        if rank_str.is_empty() || !rank_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(SquareParseError::InvalidRank(s.to_string()));
        }
        let rank: u8 = rank_str
            .parse()
            .map_err(|_| SquareParseError::InvalidRank(s.to_string()))?;
        if rank == 0 || rank > MAX_RANK {
            return Err(SquareParseError::InvalidRank(s.to_string()));
        }

        Ok(Self {
            file: file_char as u8 - b'a',
            rank: rank - 1,
        })
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// Which side of the board is drawn at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    /// The opposite orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }
}

/// Number of columns (files) and rows (ranks) on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDimensions {
    pub cols: u8,
    pub rows: u8,
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self { cols: 8, rows: 8 }
    }
}

impl BoardDimensions {
    pub fn new(cols: u8, rows: u8) -> Self {
        Self { cols, rows }
    }
}

/// Parse a square, panicking on malformed input. Test helper.
#[cfg(test)]
pub(crate) fn sq(s: &str) -> Square {
    s.parse().unwrap()
}
