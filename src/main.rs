use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{anyhow, bail, Context, Result};
use chess_core::{decode, encode, GameRecord, Move, Position, Square, STARTING_NOTATION};
use chess_tools::{audit_reader, random_playout, summarize, PlayoutConfig};

const USAGE: &str = "usage:
  chess-notation decode <notation>
  chess-notation play <notation|start> <move>...
  chess-notation audit [file]
  chess-notation playout [plies] [seed]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{USAGE}");
    };

    match command.as_str() {
        "decode" => {
            let text = args.get(1).ok_or_else(|| anyhow!("{USAGE}"))?;
            let position = decode(text).with_context(|| format!("cannot decode {text:?}"))?;
            print_position(&position);
        }
        "play" => {
            let text = args.get(1).ok_or_else(|| anyhow!("{USAGE}"))?;
            let text = if text == "start" { STARTING_NOTATION } else { text.as_str() };
            let start = decode(text).with_context(|| format!("cannot decode {text:?}"))?;

            let mut record = GameRecord::new(start);
            for arg in &args[2..] {
                let mv: Move = arg.parse().with_context(|| format!("bad move {arg:?}"))?;
                if record.play(mv) {
                    println!("{mv}  {}", encode(record.current()));
                } else {
                    println!("{mv}  rejected");
                }
            }
        }
        "audit" => {
            let reports = match args.get(1) {
                Some(path) => {
                    let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
                    audit_reader(BufReader::new(file))?
                }
                None => audit_reader(io::stdin().lock())?,
            };

            let summary = summarize(&reports);
            println!(
                "{} lines: {} round trips, {} canonicalized, {} unstable, {} rejected",
                summary.total,
                summary.round_trips,
                summary.canonicalized,
                summary.unstable,
                summary.rejected
            );
            if !summary.is_clean() {
                bail!("corpus failed the round-trip audit");
            }
        }
        "playout" => {
            let mut config = PlayoutConfig::default();
            if let Some(plies) = args.get(1) {
                config.plies = plies.parse().with_context(|| format!("bad ply count {plies:?}"))?;
            }
            if let Some(seed) = args.get(2) {
                config.seed = seed.parse().with_context(|| format!("bad seed {seed:?}"))?;
            }

            let record = random_playout(Position::starting(), &config);
            for (mv, position) in record.moves().iter().zip(record.positions().skip(1)) {
                println!("{mv}  {}", encode(position));
            }
        }
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }

    Ok(())
}

fn print_position(position: &Position) {
    for rank in (0..8u8).rev() {
        let row: String = (0..8u8)
            .filter_map(|file| Square::from_coords(file, rank))
            .map(|square| position.piece_at(square).map_or('.', |piece| piece.to_char()))
            .collect();
        println!("{} {row}", rank + 1);
    }
    println!("  abcdefgh");

    let rights = position.castling_rights();
    println!("side to move:     {:?}", position.side_to_move());
    println!(
        "castling:         K={} Q={} k={} q={}",
        rights.white_kingside, rights.white_queenside, rights.black_kingside, rights.black_queenside
    );
    match position.en_passant_target() {
        Some(square) => println!("en passant:       {square}"),
        None => println!("en passant:       -"),
    }
    println!("half-move clock:  {}", position.halfmove_clock());
    println!("full-move number: {}", position.fullmove_counter());
}
