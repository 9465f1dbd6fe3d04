use chess_core::{GameRecord, Move, Position, Square};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

pub const DEFAULT_PLAYOUT_PLIES: usize = 40;
pub const DEFAULT_SEED: u64 = 0x5EED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutConfig {
    pub plies: usize,
    pub seed: u64,
}

impl PlayoutConfig {
    pub fn new(plies: usize, seed: u64) -> Self {
        Self { plies, seed }
    }
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            plies: DEFAULT_PLAYOUT_PLIES,
            seed: DEFAULT_SEED,
        }
    }
}

/// Every move the applier would accept from `position`, preferring pieces of
/// the side to move. Falls back to any piece when that side has none.
pub fn candidate_moves(position: &Position) -> Vec<Move> {
    let side = position.side_to_move();
    let mut sources: Vec<Square> = position
        .pieces()
        .filter(|(_, piece)| piece.color == side)
        .map(|(square, _)| square)
        .collect();
    if sources.is_empty() {
        sources = position.pieces().map(|(square, _)| square).collect();
    }

    let mut moves = Vec::new();
    for from in sources {
        let Some(piece) = position.piece_at(from) else {
            continue;
        };
        for to in Square::all() {
            match position.piece_at(to) {
                Some(dest) if dest.color == piece.color => {}
                _ => moves.push(Move::new(from, to)),
            }
        }
    }
    moves
}

/// Plays up to `config.plies` random pseudo-legal moves from `start`. Stops
/// early on a bare board.
pub fn random_playout(start: Position, config: &PlayoutConfig) -> GameRecord {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut record = GameRecord::new(start);

    for _ in 0..config.plies {
        let moves = candidate_moves(record.current());
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        record.play(mv);
    }

    record
}

/// Runs `count` playouts in parallel, seeded `config.seed`, `config.seed + 1`, ...
pub fn random_playouts(start: &Position, count: usize, config: &PlayoutConfig) -> Vec<GameRecord> {
    let records: Vec<GameRecord> = (0..count)
        .into_par_iter()
        .map(|i| {
            let seeded = PlayoutConfig::new(config.plies, config.seed.wrapping_add(i as u64));
            random_playout(start.clone(), &seeded)
        })
        .collect();

    info!(
        "{} playouts, {} plies total",
        records.len(),
        records.iter().map(|r| r.moves().len()).sum::<usize>()
    );
    records
}
