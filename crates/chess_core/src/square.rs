use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("square name must be two characters, got {0:?}")]
    BadLength(String),
    #[error("unexpected file character {0:?}")]
    BadFile(char),
    #[error("unexpected rank character {0:?}")]
    BadRank(char),
}

/// One of the 64 board cells.
///
/// The index follows board storage order: index 0 is the leftmost square of
/// the rank printed first in the notation (a8), index 63 the rightmost square
/// of the rank printed last (h1). `rank()` reports the chess rank zero-based,
/// so rank 0 is the rank printed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn new(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// `file` and `rank` are zero-based; rank 0 is the first player's back rank.
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self((7 - rank) * 8 + file))
        } else {
            None
        }
    }

    pub fn from_algebraic(notation: &str) -> Result<Self, SquareParseError> {
        let mut chars = notation.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(SquareParseError::BadLength(notation.to_string())),
        };

        if !('a'..='h').contains(&file) {
            return Err(SquareParseError::BadFile(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(SquareParseError::BadRank(rank));
        }

        Ok(Self((b'8' - rank as u8) * 8 + (file as u8 - b'a')))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn rank(self) -> u8 {
        7 - self.0 / 8
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    /// All squares in board storage order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}
