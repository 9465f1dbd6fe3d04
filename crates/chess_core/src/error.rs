use thiserror::Error;

/// Why a notation string was rejected. `index` is the byte offset of the
/// offending character; `found` is `None` when the input ended early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected character {found:?} in piece placement at index {index}")]
    UnexpectedCharacter { index: usize, found: Option<char> },

    #[error("rank {rank} covers {squares} squares instead of 8 (index {index})")]
    InvalidRankLength { index: usize, rank: u8, squares: u8 },

    #[error("side to move must be 'w' or 'b', found {found:?} at index {index}")]
    InvalidSideToMove { index: usize, found: Option<char> },

    #[error("expected {expected:?}, found {found:?} at index {index}")]
    MissingSeparator { index: usize, expected: char, found: Option<char> },

    #[error("castling field expected {expected:?} or '-', found {found:?} at index {index}")]
    InvalidCastlingField { index: usize, expected: char, found: Option<char> },

    #[error("invalid en-passant square at index {index} (found {found:?})")]
    InvalidEnPassantSquare { index: usize, found: Option<char> },

    #[error("invalid half-move clock at index {index} (found {found:?})")]
    InvalidHalfmoveClock { index: usize, found: Option<char> },

    #[error("invalid full-move counter at index {index} (found {found:?})")]
    InvalidFullmoveCounter { index: usize, found: Option<char> },

    #[error("unexpected trailing input {found:?} at index {index}")]
    TrailingInput { index: usize, found: Option<char> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    UnexpectedCharacter,
    InvalidRankLength,
    InvalidSideToMove,
    MissingSeparator,
    InvalidCastlingField,
    InvalidEnPassantSquare,
    InvalidHalfmoveClock,
    InvalidFullmoveCounter,
    TrailingInput,
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::UnexpectedCharacter { .. } => DecodeErrorKind::UnexpectedCharacter,
            DecodeError::InvalidRankLength { .. } => DecodeErrorKind::InvalidRankLength,
            DecodeError::InvalidSideToMove { .. } => DecodeErrorKind::InvalidSideToMove,
            DecodeError::MissingSeparator { .. } => DecodeErrorKind::MissingSeparator,
            DecodeError::InvalidCastlingField { .. } => DecodeErrorKind::InvalidCastlingField,
            DecodeError::InvalidEnPassantSquare { .. } => DecodeErrorKind::InvalidEnPassantSquare,
            DecodeError::InvalidHalfmoveClock { .. } => DecodeErrorKind::InvalidHalfmoveClock,
            DecodeError::InvalidFullmoveCounter { .. } => DecodeErrorKind::InvalidFullmoveCounter,
            DecodeError::TrailingInput { .. } => DecodeErrorKind::TrailingInput,
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            DecodeError::UnexpectedCharacter { index, .. }
            | DecodeError::InvalidRankLength { index, .. }
            | DecodeError::InvalidSideToMove { index, .. }
            | DecodeError::MissingSeparator { index, .. }
            | DecodeError::InvalidCastlingField { index, .. }
            | DecodeError::InvalidEnPassantSquare { index, .. }
            | DecodeError::InvalidHalfmoveClock { index, .. }
            | DecodeError::InvalidFullmoveCounter { index, .. }
            | DecodeError::TrailingInput { index, .. } => index,
        }
    }
}
