use log::{debug, trace};

use crate::{CastlingRights, Color, DecodeError, Piece, Position, Square};

/// Single read cursor over the notation text. Only ASCII bytes are ever
/// consumed, so `index` always sits on a char boundary.
struct Cursor<'a> {
    text: &'a str,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, index: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.index).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.text.as_bytes().get(self.index + 1).copied()
    }

    fn found(&self) -> Option<char> {
        self.text[self.index..].chars().next()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn eat(&mut self, expected: u8) -> Result<(), DecodeError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(DecodeError::MissingSeparator {
                index: self.index,
                expected: expected as char,
                found: self.found(),
            })
        }
    }
}

/// Parses a six-field notation string into a [`Position`].
///
/// Fields are read left to right with no backtracking. The first field that
/// fails stops decoding; the partly built position is dropped.
pub fn decode(text: &str) -> Result<Position, DecodeError> {
    let mut cursor = Cursor::new(text);
    decode_fields(&mut cursor).map_err(|err| {
        debug!("rejected notation {:?}: {}", text, err);
        err
    })
}

fn decode_fields(cursor: &mut Cursor<'_>) -> Result<Position, DecodeError> {
    let mut position = Position::empty();

    position.board = eat_placement(cursor)?;
    cursor.eat(b' ')?;
    position.side_to_move = eat_side_to_move(cursor)?;
    cursor.eat(b' ')?;
    position.castling_rights = eat_castling(cursor)?;
    cursor.eat(b' ')?;
    position.en_passant_target = eat_en_passant(cursor)?;
    cursor.eat(b' ')?;
    position.halfmove_clock = eat_number(cursor, true, |index, found| {
        DecodeError::InvalidHalfmoveClock { index, found }
    })?;
    trace!("half-move clock {}", position.halfmove_clock);
    cursor.eat(b' ')?;
    position.fullmove_counter = eat_number(cursor, false, |index, found| {
        DecodeError::InvalidFullmoveCounter { index, found }
    })?;
    trace!("full-move counter {}", position.fullmove_counter);

    if cursor.peek().is_some() {
        return Err(DecodeError::TrailingInput {
            index: cursor.index,
            found: cursor.found(),
        });
    }

    Ok(position)
}

fn eat_placement(cursor: &mut Cursor<'_>) -> Result<[Option<Piece>; 64], DecodeError> {
    let mut board = [None; 64];

    for rank in 1..=8u8 {
        if rank > 1 {
            cursor.eat(b'/')?;
        }

        let first_square = (rank as usize - 1) * 8;
        let mut filled = 0u8;
        let mut after_run = false;

        loop {
            match cursor.peek() {
                Some(c @ b'1'..=b'8') => {
                    // runs are written merged, "44" would not encode back
                    if after_run {
                        return Err(DecodeError::UnexpectedCharacter {
                            index: cursor.index,
                            found: cursor.found(),
                        });
                    }
                    after_run = true;
                    let run = c - b'0';
                    if filled + run > 8 {
                        return Err(DecodeError::InvalidRankLength {
                            index: cursor.index,
                            rank,
                            squares: filled + run,
                        });
                    }
                    // board starts out empty, so a run only moves the file
                    filled += run;
                }
                Some(b'/') | Some(b' ') | None => break,
                Some(c) => {
                    let piece = Piece::from_char(c as char).ok_or(DecodeError::UnexpectedCharacter {
                        index: cursor.index,
                        found: cursor.found(),
                    })?;
                    if filled == 8 {
                        return Err(DecodeError::InvalidRankLength {
                            index: cursor.index,
                            rank,
                            squares: 9,
                        });
                    }
                    board[first_square + filled as usize] = Some(piece);
                    filled += 1;
                    after_run = false;
                }
            }
            cursor.advance();
        }

        if filled != 8 {
            return Err(DecodeError::InvalidRankLength {
                index: cursor.index,
                rank,
                squares: filled,
            });
        }
    }

    trace!("placement decoded up to index {}", cursor.index);
    Ok(board)
}

fn eat_side_to_move(cursor: &mut Cursor<'_>) -> Result<Color, DecodeError> {
    let side = match cursor.peek() {
        Some(b'w') => Color::White,
        Some(b'b') => Color::Black,
        _ => {
            return Err(DecodeError::InvalidSideToMove {
                index: cursor.index,
                found: cursor.found(),
            })
        }
    };
    cursor.advance();
    trace!("side to move {:?}", side);
    Ok(side)
}

fn eat_castling(cursor: &mut Cursor<'_>) -> Result<CastlingRights, DecodeError> {
    // a lone '-' denies all four rights
    if cursor.peek() == Some(b'-') && cursor.peek_next() == Some(b' ') {
        cursor.advance();
        trace!("castling rights: none");
        return Ok(CastlingRights::NONE);
    }

    let mut granted = [false; 4];
    for (slot, letter) in granted.iter_mut().zip([b'K', b'Q', b'k', b'q']) {
        *slot = match cursor.peek() {
            Some(c) if c == letter => true,
            Some(b'-') => false,
            _ => {
                return Err(DecodeError::InvalidCastlingField {
                    index: cursor.index,
                    expected: letter as char,
                    found: cursor.found(),
                })
            }
        };
        cursor.advance();
    }

    let rights = CastlingRights {
        white_kingside: granted[0],
        white_queenside: granted[1],
        black_kingside: granted[2],
        black_queenside: granted[3],
    };
    trace!("castling rights {:?}", rights);
    Ok(rights)
}

fn eat_en_passant(cursor: &mut Cursor<'_>) -> Result<Option<Square>, DecodeError> {
    if cursor.peek() == Some(b'-') {
        cursor.advance();
        return Ok(None);
    }

    let file = match cursor.peek() {
        Some(c @ b'a'..=b'h') => c - b'a',
        _ => {
            return Err(DecodeError::InvalidEnPassantSquare {
                index: cursor.index,
                found: cursor.found(),
            })
        }
    };
    cursor.advance();

    let invalid = DecodeError::InvalidEnPassantSquare {
        index: cursor.index,
        found: cursor.found(),
    };
    let square = match cursor.peek() {
        Some(c @ (b'3' | b'6')) => Square::from_coords(file, c - b'1').ok_or(invalid)?,
        _ => return Err(invalid),
    };
    cursor.advance();

    trace!("en-passant target {}", square);
    Ok(Some(square))
}

/// Decimal digits accumulated left to right. A leading zero is only accepted
/// as the whole number, and only when `zero_allowed` is set.
fn eat_number(
    cursor: &mut Cursor<'_>,
    zero_allowed: bool,
    error: impl Fn(usize, Option<char>) -> DecodeError,
) -> Result<u32, DecodeError> {
    let mut value = match cursor.peek() {
        Some(b'0') if zero_allowed => 0,
        Some(c @ b'1'..=b'9') => u32::from(c - b'0'),
        _ => return Err(error(cursor.index, cursor.found())),
    };
    cursor.advance();

    while let Some(c @ b'0'..=b'9') = cursor.peek() {
        if value == 0 {
            return Err(error(cursor.index, cursor.found()));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(c - b'0')))
            .ok_or_else(|| error(cursor.index, cursor.found()))?;
        cursor.advance();
    }

    Ok(value)
}
