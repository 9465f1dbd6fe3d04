use crate::{Move, Position, Square};

/// Turns a stream of square selections (clicks) into moves. The first
/// selection picks up a piece, the second names the destination; selecting
/// the same square twice drops the piece again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareSelector {
    selected: Option<Square>,
}

impl SquareSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Feeds one selection. Returns the move once a source and a different
    /// destination have both been chosen. Empty squares cannot be picked up.
    pub fn select(&mut self, square: Square, position: &Position) -> Option<Move> {
        match self.selected.take() {
            None => {
                if position.piece_at(square).is_some() {
                    self.selected = Some(square);
                }
                None
            }
            Some(from) if from == square => None,
            Some(from) => Some(Move::new(from, square)),
        }
    }
}
