use log::debug;

use crate::{encode, Move, Position};

/// A line of play: the starting position followed by one position per
/// accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    earlier: Vec<Position>,
    current: Position,
    moves: Vec<Move>,
}

impl GameRecord {
    pub fn new(start: Position) -> Self {
        Self {
            earlier: Vec::new(),
            current: start,
            moves: Vec::new(),
        }
    }

    pub fn current(&self) -> &Position {
        &self.current
    }

    /// Applies `mv` to the current position. Rejected moves leave the record
    /// unchanged and return `false`.
    pub fn play(&mut self, mv: Move) -> bool {
        let outcome = self.current.clone().apply_move(mv);
        if !outcome.is_applied() {
            return false;
        }

        let next = outcome.into_position();
        debug!("{} -> {}", mv, encode(&next));
        self.earlier.push(std::mem::replace(&mut self.current, next));
        self.moves.push(mv);
        true
    }

    /// Takes back the last accepted move.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        // one earlier position per recorded move
        if let Some(previous) = self.earlier.pop() {
            self.current = previous;
        }
        Some(mv)
    }

    /// Every position in order, the start first and the current one last.
    pub fn positions(&self) -> impl Iterator<Item = &Position> + '_ {
        self.earlier.iter().chain(std::iter::once(&self.current))
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn notations(&self) -> Vec<String> {
        self.positions().map(encode).collect()
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new(Position::starting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    #[test]
    fn accepted_moves_extend_the_history() {
        let mut record = GameRecord::default();
        assert!(record.play(mv("e2e4")));
        assert!(record.play(mv("c7c5")));

        assert_eq!(record.moves(), &[mv("e2e4"), mv("c7c5")]);
        assert_eq!(record.positions().count(), 3);
        assert_eq!(
            record.notations().last().unwrap(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 2 2"
        );
    }

    #[test]
    fn rejected_moves_are_not_recorded() {
        let mut record = GameRecord::default();
        assert!(!record.play(mv("e3e4")));
        assert!(!record.play(mv("d1d2")));
        assert!(record.moves().is_empty());
        assert_eq!(record.current(), &Position::starting());
    }

    #[test]
    fn undo_restores_the_previous_position() {
        let mut record = GameRecord::default();
        record.play(mv("g1f3"));
        let after_first = record.current().clone();
        record.play(mv("g8f6"));

        assert_eq!(record.undo(), Some(mv("g8f6")));
        assert_eq!(record.current(), &after_first);
        assert_eq!(record.last_move(), Some(mv("g1f3")));
        assert_eq!(record.undo(), Some(mv("g1f3")));
        assert_eq!(record.undo(), None);
        assert_eq!(record.current(), &Position::starting());
    }

    #[test]
    fn current_is_always_the_last_position() {
        let mut record = GameRecord::default();
        for text in ["e2e4", "e7e5", "e1e1", "g1f3"] {
            record.play(mv(text));
            assert_eq!(record.positions().last(), Some(record.current()));
        }
        while record.undo().is_some() {
            assert_eq!(record.positions().last(), Some(record.current()));
            assert_eq!(record.positions().count(), record.moves().len() + 1);
        }
        assert_eq!(record.positions().collect::<Vec<_>>(), vec![&Position::starting()]);
    }
}
