use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::{Color, Position, Square, SquareParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move must be four characters like \"e2e4\", got {0:?}")]
    BadLength(String),
    #[error(transparent)]
    Square(#[from] SquareParseError),
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_char_boundary(2) {
            return Err(MoveParseError::BadLength(s.to_string()));
        }
        let (from, to) = s.split_at(2);
        Ok(Self::new(from.parse()?, to.parse()?))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptySource,
    OccupiedByOwnPiece,
}

/// Result of [`apply_move`]. A rejected move hands back the input position
/// unchanged; it is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(Position),
    Rejected { position: Position, reason: Rejection },
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    pub fn position(&self) -> &Position {
        match self {
            MoveOutcome::Applied(position) => position,
            MoveOutcome::Rejected { position, .. } => position,
        }
    }

    pub fn into_position(self) -> Position {
        match self {
            MoveOutcome::Applied(position) => position,
            MoveOutcome::Rejected { position, .. } => position,
        }
    }
}

/// Moves the piece on `from` to `to` if the source is occupied and the
/// destination is empty or holds an opposing piece. Piece movement rules,
/// check, castling rights and the en-passant target are not considered.
pub fn apply_move(position: Position, from: Square, to: Square) -> MoveOutcome {
    let piece = match position.piece_at(from) {
        Some(piece) => piece,
        None => return reject(position, Move::new(from, to), Rejection::EmptySource),
    };

    if let Some(dest_piece) = position.piece_at(to) {
        if dest_piece.color == piece.color {
            return reject(position, Move::new(from, to), Rejection::OccupiedByOwnPiece);
        }
    }

    let mover = position.side_to_move;
    let mut next = position;
    next.board[from.index()] = None;
    next.board[to.index()] = Some(piece);
    next.side_to_move = mover.opposite();
    next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    if mover == Color::Black {
        next.fullmove_counter = next.fullmove_counter.saturating_add(1);
    }

    debug!("applied {}{} ({:?})", from, to, piece);
    MoveOutcome::Applied(next)
}

fn reject(position: Position, mv: Move, reason: Rejection) -> MoveOutcome {
    debug!("rejected {}: {:?}", mv, reason);
    MoveOutcome::Rejected { position, reason }
}

impl Position {
    pub fn apply_move(self, mv: Move) -> MoveOutcome {
        apply_move(self, mv.from, mv.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, PieceType};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn pawn_push_updates_the_clocks() {
        let outcome = apply_move(Position::starting(), sq("e2"), sq("e4"));
        assert!(outcome.is_applied());

        let next = outcome.into_position();
        assert_eq!(next.piece_at(sq("e2")), None);
        assert_eq!(next.piece_at(sq("e4")), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.halfmove_clock(), 1);
        assert_eq!(next.fullmove_counter(), 1);
    }

    #[test]
    fn black_reply_completes_the_move_pair() {
        let after_white = Position::starting().apply_move("e2e4".parse().unwrap()).into_position();
        let after_black = after_white.apply_move("e7e5".parse().unwrap()).into_position();
        assert_eq!(after_black.side_to_move(), Color::White);
        assert_eq!(after_black.halfmove_clock(), 2);
        assert_eq!(after_black.fullmove_counter(), 2);
    }

    #[test]
    fn capture_replaces_the_opposing_piece() {
        let position = Position::empty()
            .with_piece(sq("d4"), Some(Piece::new(PieceType::Queen, Color::White)))
            .with_piece(sq("d7"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        let next = apply_move(position, sq("d4"), sq("d7")).into_position();
        assert_eq!(next.piece_at(sq("d7")), Some(Piece::new(PieceType::Queen, Color::White)));
        assert_eq!(next.pieces().count(), 1);
    }

    #[test]
    fn empty_source_is_rejected() {
        let start = Position::starting();
        let outcome = apply_move(start.clone(), sq("e4"), sq("e5"));
        assert_eq!(
            outcome,
            MoveOutcome::Rejected { position: start, reason: Rejection::EmptySource }
        );
    }

    #[test]
    fn own_piece_destination_is_rejected() {
        let start = Position::starting();
        let outcome = apply_move(start.clone(), sq("a1"), sq("a2"));
        assert!(!outcome.is_applied());
        assert_eq!(outcome.position(), &start);
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected { reason: Rejection::OccupiedByOwnPiece, .. }
        ));
    }

    #[test]
    fn null_move_is_rejected() {
        let start = Position::starting();
        let outcome = apply_move(start.clone(), sq("g1"), sq("g1"));
        assert_eq!(outcome.into_position(), start);
    }

    #[test]
    fn castling_and_en_passant_are_carried_over() {
        let position: Position = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
            .parse()
            .unwrap();
        let next = position.apply_move("g8f6".parse().unwrap()).into_position();
        assert!(next.castling_rights().black_kingside);
        assert_eq!(next.en_passant_target(), Some(sq("e3")));
    }

    #[test]
    fn coordinate_moves_parse() {
        let mv: Move = "g1f3".parse().unwrap();
        assert_eq!(mv, Move::new(sq("g1"), sq("f3")));
        assert_eq!(mv.to_string(), "g1f3");
        assert!(matches!("g1".parse::<Move>(), Err(MoveParseError::BadLength(_))));
        assert!(matches!("g1z3".parse::<Move>(), Err(MoveParseError::Square(_))));
    }
}
