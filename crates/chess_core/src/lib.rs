// Board-position notation: model, decoder, encoder and pseudo-legal moves
pub mod decode;
pub mod encode;
pub mod error;
pub mod moves;
pub mod piece;
pub mod position;
pub mod record;
pub mod selection;
pub mod square;

// Re-export main types for convenience
pub use decode::decode;
pub use encode::encode;
pub use error::{DecodeError, DecodeErrorKind};
pub use moves::{apply_move, Move, MoveOutcome, MoveParseError, Rejection};
pub use piece::{Color, Piece, PieceType};
pub use position::{CastlingRights, Position, STARTING_NOTATION};
pub use record::GameRecord;
pub use selection::SquareSelector;
pub use square::{Square, SquareParseError};
