use std::fmt;
use std::str::FromStr;

use crate::piece::{Color, Piece, PieceType};
use crate::{decode, encode, DecodeError, Square};

pub const STARTING_NOTATION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: Self = Self {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

/// A complete board state: placement plus the five metadata fields of the
/// notation string.
///
/// Positions are values. Moves produce a new `Position` and leave the old one
/// untouched, so callers keep history by holding on to earlier values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_counter: u32,
}

impl Position {
    /// Blank board with White to move. Used before any notation is decoded.
    pub fn empty() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::default(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_counter: 1,
        }
    }

    pub fn starting() -> Self {
        let mut position = Self::empty();

        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in (0u8..8).zip(piece_order.iter()) {
            position.put(file, 0, Piece::new(piece_type, Color::White));
            position.put(file, 1, Piece::new(PieceType::Pawn, Color::White));
            position.put(file, 6, Piece::new(PieceType::Pawn, Color::Black));
            position.put(file, 7, Piece::new(piece_type, Color::Black));
        }

        position
    }

    fn put(&mut self, file: u8, rank: u8, piece: Piece) {
        if let Some(square) = Square::from_coords(file, rank) {
            self.board[square.index()] = Some(piece);
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    pub fn board(&self) -> &[Option<Piece>; 64] {
        &self.board
    }

    /// Occupied squares in board storage order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_counter(&self) -> u32 {
        self.fullmove_counter
    }

    pub fn with_piece(mut self, square: Square, piece: Option<Piece>) -> Self {
        self.board[square.index()] = piece;
        self
    }

    pub fn with_side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    pub fn with_castling_rights(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Returns `None` when the target is not on one of the two ranks a pawn
    /// double step passes over.
    pub fn with_en_passant_target(mut self, target: Option<Square>) -> Option<Self> {
        if let Some(square) = target {
            if !is_en_passant_rank(square.rank()) {
                return None;
            }
        }
        self.en_passant_target = target;
        Some(self)
    }

    pub fn with_clocks(mut self, halfmove_clock: u32, fullmove_counter: u32) -> Option<Self> {
        if fullmove_counter == 0 {
            return None;
        }
        self.halfmove_clock = halfmove_clock;
        self.fullmove_counter = fullmove_counter;
        Some(self)
    }
}

pub(crate) fn is_en_passant_rank(rank: u8) -> bool {
    rank == 2 || rank == 5
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Position {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}
