use crate::{CastlingRights, Position};

/// Serializes a [`Position`] into its notation string. Inverse of
/// [`decode`](crate::decode) for every string `decode` accepts, except a lone
/// `-` castling field, which is written back as `----`.
pub fn encode(position: &Position) -> String {
    let mut notation = String::with_capacity(90);

    encode_placement(position, &mut notation);
    notation.push(' ');
    notation.push(position.side_to_move().to_char());
    notation.push(' ');
    encode_castling(position.castling_rights(), &mut notation);
    notation.push(' ');
    match position.en_passant_target() {
        Some(square) => notation.push_str(&square.to_string()),
        None => notation.push('-'),
    }
    notation.push(' ');
    notation.push_str(&position.halfmove_clock().to_string());
    notation.push(' ');
    notation.push_str(&position.fullmove_counter().to_string());

    notation
}

fn encode_placement(position: &Position, out: &mut String) {
    let mut empty_run = 0u8;

    for (index, square) in position.board().iter().enumerate() {
        match square {
            Some(piece) => {
                if empty_run > 0 {
                    out.push((b'0' + empty_run) as char);
                    empty_run = 0;
                }
                out.push(piece.to_char());
            }
            None => empty_run += 1,
        }

        if index % 8 == 7 {
            if empty_run > 0 {
                out.push((b'0' + empty_run) as char);
                empty_run = 0;
            }
            if index < 63 {
                out.push('/');
            }
        }
    }
}

fn encode_castling(rights: CastlingRights, out: &mut String) {
    let flags = [
        (rights.white_kingside, 'K'),
        (rights.white_queenside, 'Q'),
        (rights.black_kingside, 'k'),
        (rights.black_queenside, 'q'),
    ];
    for (granted, letter) in flags {
        out.push(if granted { letter } else { '-' });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Piece, PieceType, Square};

    #[test]
    fn empty_board_is_eight_eights() {
        let position = Position::empty().with_castling_rights(CastlingRights::NONE);
        assert_eq!(encode(&position), "8/8/8/8/8/8/8/8 w ---- - 0 1");
    }

    #[test]
    fn lone_castling_dash_is_written_as_four() {
        let position = crate::decode("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(encode(&position), "8/8/8/8/8/8/8/8 w ---- - 0 1");
    }

    #[test]
    fn runs_flush_before_pieces_and_at_rank_ends() {
        let e4: Square = "e4".parse().unwrap();
        let a8: Square = "a8".parse().unwrap();
        let h1: Square = "h1".parse().unwrap();
        let position = Position::empty()
            .with_piece(e4, Some(Piece::new(PieceType::Pawn, Color::White)))
            .with_piece(a8, Some(Piece::new(PieceType::Rook, Color::Black)))
            .with_piece(h1, Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(
            encode(&position),
            "r7/8/8/8/4P3/8/8/7K w KQkq - 0 1"
        );
    }

    #[test]
    fn metadata_fields_in_order() {
        let position = Position::empty()
            .with_side_to_move(Color::Black)
            .with_castling_rights(CastlingRights {
                white_kingside: false,
                white_queenside: true,
                black_kingside: true,
                black_queenside: false,
            })
            .with_en_passant_target(Some("d3".parse().unwrap()))
            .and_then(|p| p.with_clocks(12, 34))
            .unwrap();
        assert_eq!(encode(&position), "8/8/8/8/8/8/8/8 b -Qk- d3 12 34");
    }
}
