//! Pyrrhic's view of a host.
//!
//! [`Bindings`] exposes the host primitives under Pyrrhic's conventions.
//! Everything passes through unchanged, except for pawn attacks: Pyrrhic
//! numbers `White` as `1` and `Black` as `0`, hosts number them the other way
//! around, so the color is inverted before the host is called.

use core::{fmt, marker::PhantomData};

use crate::{Bitboard, Color, Host, Square, TbColor};

/// Pyrrhic-side bindings to the primitives of host `H`.
///
/// This type is never instantiated. All functions are associated and
/// statically dispatched to `H`.
///
/// # Example
///
/// ```
/// use pyrrhic_host::{Bindings, Builtin, Color, Host, Square, TbColor};
///
/// type Tb = Bindings<Builtin>;
///
/// // Tablebase White (flag 1) is host White (index 0).
/// assert_eq!(
///     Tb::pawn_attacks_flag(Square::E4, 1),
///     Builtin::pawn_attacks(Color::White, Square::E4)
/// );
/// assert_eq!(
///     Tb::pawn_attacks(Square::E4, TbColor::Black),
///     Builtin::pawn_attacks(Color::Black, Square::E4)
/// );
/// ```
pub struct Bindings<H> {
    _host: PhantomData<fn() -> H>,
}

impl<H> fmt::Debug for Bindings<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings").finish()
    }
}

impl<H: Host> Bindings<H> {
    #[inline]
    pub fn popcount(bb: Bitboard) -> u8 {
        H::popcount(bb)
    }

    #[inline]
    pub fn lsb(bb: Bitboard) -> Option<Square> {
        H::lsb(bb)
    }

    #[inline]
    pub fn pop_lsb(bb: &mut Bitboard) -> Option<Square> {
        H::pop_lsb(bb)
    }

    /// Squares attacked by a pawn of `color` (Pyrrhic numbering) on `sq`.
    #[inline]
    pub fn pawn_attacks(sq: Square, color: TbColor) -> Bitboard {
        H::pawn_attacks(Color::from(color), sq)
    }

    /// Like [`Bindings::pawn_attacks()`], but takes the raw color flag of
    /// Pyrrhic. Any nonzero flag is `White`.
    #[inline]
    pub fn pawn_attacks_flag(sq: Square, flag: u8) -> Bitboard {
        Bindings::<H>::pawn_attacks(sq, TbColor::from_flag(flag))
    }

    #[inline]
    pub fn knight_attacks(sq: Square) -> Bitboard {
        H::knight_attacks(sq)
    }

    #[inline]
    pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        H::bishop_attacks(sq, occupied)
    }

    #[inline]
    pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        H::rook_attacks(sq, occupied)
    }

    #[inline]
    pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        H::queen_attacks(sq, occupied)
    }

    #[inline]
    pub fn king_attacks(sq: Square) -> Bitboard {
        H::king_attacks(sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Builtin;

    /// Echoes its inputs back, so tests can see what the bindings passed on.
    struct Echo;

    impl Host for Echo {
        fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
            Bitboard((u64::from(color.to_u8()) << 32) | u64::from(sq))
        }
        fn knight_attacks(sq: Square) -> Bitboard {
            Bitboard(u64::from(sq) << 8)
        }
        fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
            Bitboard(u64::from(sq) << 16) ^ occupied
        }
        fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
            Bitboard(u64::from(sq) << 24) ^ occupied
        }
        fn king_attacks(sq: Square) -> Bitboard {
            Bitboard(u64::from(sq) << 40)
        }
    }

    #[test]
    fn test_pawn_color_is_inverted() {
        for sq in Square::ALL {
            for flag in 0..2u8 {
                let host_flag = u64::from(1 - flag);
                assert_eq!(
                    Bindings::<Echo>::pawn_attacks_flag(sq, flag),
                    Bitboard((host_flag << 32) | u64::from(sq))
                );
            }
        }
    }

    #[test]
    fn test_builtin_pawn_color() {
        for sq in Square::ALL {
            for flag in 0..2u8 {
                let host = Color::from_index(1 - flag).unwrap();
                assert_eq!(
                    Bindings::<Builtin>::pawn_attacks_flag(sq, flag),
                    Builtin::pawn_attacks(host, sq)
                );
            }
        }
    }

    #[test]
    fn test_pass_through() {
        let occupied = Bitboard(0x0040_0000_0100_0000);
        for sq in Square::ALL {
            assert_eq!(Bindings::<Echo>::knight_attacks(sq), Echo::knight_attacks(sq));
            assert_eq!(
                Bindings::<Echo>::bishop_attacks(sq, occupied),
                Echo::bishop_attacks(sq, occupied)
            );
            assert_eq!(
                Bindings::<Echo>::rook_attacks(sq, occupied),
                Echo::rook_attacks(sq, occupied)
            );
            assert_eq!(
                Bindings::<Echo>::queen_attacks(sq, occupied),
                Echo::queen_attacks(sq, occupied)
            );
            assert_eq!(Bindings::<Echo>::king_attacks(sq), Echo::king_attacks(sq));
        }

        let mut bb = occupied;
        assert_eq!(Bindings::<Echo>::popcount(bb), 2);
        assert_eq!(Bindings::<Echo>::lsb(bb), Some(Square::A4));
        assert_eq!(Bindings::<Echo>::pop_lsb(&mut bb), Some(Square::A4));
        assert_eq!(bb, Bitboard::from(Square::G7));
    }
}
