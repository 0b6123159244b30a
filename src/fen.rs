//! Parse and write positions in Forsyth-Edwards Notation.
//!
//! Only what Pyrrhic needs survives parsing: castling rights collapse to
//! a single flag, the halfmove clock saturates at 255, and the fullmove
//! number is checked but dropped.

use core::{fmt, fmt::Write as _, str::FromStr};

use crate::{File, Rank, Role, Square, TbColor, TbPosition};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidBoard => "invalid fen: invalid board part",
            ParseFenError::InvalidTurn => "invalid fen: invalid turn part",
            ParseFenError::InvalidCastling => "invalid fen: invalid castling part",
            ParseFenError::InvalidEpSquare => "invalid fen: invalid ep square",
            ParseFenError::InvalidHalfmoveClock => "invalid fen: invalid halfmove clock",
            ParseFenError::InvalidFullmoves => "invalid fen: invalid fullmove part",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseFenError {}

/// Accepts up to two white rights followed by up to two black rights, each
/// given as `K`, `Q` or a rook file.
fn is_valid_castling(castling: &[u8]) -> bool {
    let white = castling
        .iter()
        .take_while(|&&ch| matches!(ch, b'K' | b'Q' | b'A'..=b'H'))
        .count();
    let black = &castling[white..];
    !castling.is_empty()
        && white <= 2
        && black.len() <= 2
        && black
            .iter()
            .all(|&ch| matches!(ch, b'k' | b'q' | b'a'..=b'h'))
}

fn parse_board<H>(pos: &mut TbPosition<H>, board: &[u8]) -> Result<(), ParseFenError> {
    let mut rank = 7u32;
    let mut file = 0u32;
    let mut previous_was_digit = false;

    for &ch in board {
        if ch == b'/' {
            if file != 8 || rank == 0 {
                return Err(ParseFenError::InvalidBoard);
            }
            file = 0;
            rank -= 1;
            previous_was_digit = false;
        } else if (b'1'..=b'8').contains(&ch) {
            if previous_was_digit {
                return Err(ParseFenError::InvalidBoard);
            }
            file += u32::from(ch - b'0');
            if file > 8 {
                return Err(ParseFenError::InvalidBoard);
            }
            previous_was_digit = true;
        } else {
            previous_was_digit = false;
            let role = Role::from_char(char::from(ch)).ok_or(ParseFenError::InvalidBoard)?;
            let color = TbColor::from_white(ch.is_ascii_uppercase());
            let sq = Square::from_coords(
                File::try_from(file).map_err(|_| ParseFenError::InvalidBoard)?,
                Rank::try_from(rank).map_err(|_| ParseFenError::InvalidBoard)?,
            );
            pos.set_piece_at(sq, color, role);
            file += 1;
        }
    }

    if rank == 0 && file == 8 {
        Ok(())
    } else {
        Err(ParseFenError::InvalidBoard)
    }
}

impl<H> TbPosition<H> {
    /// Parses a FEN. Missing trailing fields take their defaults: white to
    /// move, no castling rights, no en passant square, clocks at zero.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] naming the first field that could not be
    /// parsed.
    pub fn from_ascii(fen: &[u8]) -> Result<TbPosition<H>, ParseFenError> {
        let mut pos = TbPosition::empty();
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        parse_board(&mut pos, parts.next().ok_or(ParseFenError::InvalidBoard)?)?;

        pos.turn = match parts.next() {
            Some(b"w") | None => TbColor::White,
            Some(b"b") => TbColor::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        match parts.next() {
            Some(b"-") | None => (),
            Some(castling) => {
                if !is_valid_castling(castling) {
                    return Err(ParseFenError::InvalidCastling);
                }
                pos.castling = true;
            }
        }

        match parts.next() {
            Some(b"-") | None => (),
            Some(ep) => {
                pos.ep = Some(Square::from_ascii(ep).map_err(|_| ParseFenError::InvalidEpSquare)?);
            }
        }

        if let Some(halfmoves) = parts.next() {
            let halfmoves: u32 =
                btoi::btou(halfmoves).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
            pos.rule50 = u8::try_from(halfmoves).unwrap_or(u8::MAX);
        }

        if let Some(fullmoves) = parts.next() {
            let _: u32 = btoi::btou(fullmoves).map_err(|_| ParseFenError::InvalidFullmoves)?;
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFullmoves);
        }

        Ok(pos)
    }
}

impl<H> FromStr for TbPosition<H> {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<TbPosition<H>, ParseFenError> {
        TbPosition::from_ascii(fen.as_bytes())
    }
}

/// Writes the FEN. Castling rights are written as `KQkq` when the flag is
/// set, since their exact extent is not kept.
impl<H> fmt::Display for TbPosition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                let sq = Square::from_coords(file, rank);
                match (self.role_at(sq), self.color_at(sq)) {
                    (Some(role), Some(color)) => {
                        if empty > 0 {
                            f.write_char(char::from(b'0' + empty))?;
                            empty = 0;
                        }
                        f.write_char(if color.is_white() {
                            role.upper_char()
                        } else {
                            role.char()
                        })?;
                    }
                    _ => empty += 1,
                }
            }
            if empty > 0 {
                f.write_char(char::from(b'0' + empty))?;
            }
            if rank > Rank::First {
                f.write_char('/')?;
            }
        }

        f.write_str(if self.turn.is_white() { " w " } else { " b " })?;
        f.write_str(if self.castling { "KQkq" } else { "-" })?;
        match self.ep {
            Some(ep) => write!(f, " {ep}")?,
            None => f.write_str(" -")?,
        }
        write!(f, " {} 1", self.rule50)
    }
}
