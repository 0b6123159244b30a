//! The primitives a host engine supplies to Pyrrhic.

use crate::{attacks, Bitboard, Color, Square};

/// Bit manipulation and attack generation supplied by a host engine.
///
/// All functions are associated functions without a receiver, so a host is
/// selected statically through a type parameter and every call resolves at
/// compile time. Implementations are expected to be pure and total over
/// valid squares.
///
/// Colors are in the host numbering, `White` being `0` (see [`Color`]). Pyrrhic
/// never calls these functions directly: it goes through
/// [`Bindings`](crate::Bindings), which translates its own color numbering.
///
/// # Example
///
/// Plugging in a host that reuses the built-in tables for everything but
/// knights:
///
/// ```
/// use pyrrhic_host::{attacks, Bitboard, Bindings, Color, Host, Square, TbColor};
///
/// struct MyEngine;
///
/// impl Host for MyEngine {
///     fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
///         attacks::pawn_attacks(color, sq)
///     }
///     fn knight_attacks(sq: Square) -> Bitboard {
///         attacks::knight_attacks(sq)
///     }
///     fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
///         attacks::bishop_attacks(sq, occupied)
///     }
///     fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
///         attacks::rook_attacks(sq, occupied)
///     }
///     fn king_attacks(sq: Square) -> Bitboard {
///         attacks::king_attacks(sq)
///     }
/// }
///
/// let white_pawn = Bindings::<MyEngine>::pawn_attacks(Square::E4, TbColor::White);
/// assert!(white_pawn.contains(Square::D5));
/// ```
pub trait Host {
    /// Number of squares in `bb`.
    #[inline]
    fn popcount(bb: Bitboard) -> u8 {
        bb.count() as u8
    }

    /// The lowest square in `bb`, or `None` if `bb` is empty.
    #[inline]
    fn lsb(bb: Bitboard) -> Option<Square> {
        bb.first()
    }

    /// Removes the lowest square from `bb` and returns it.
    #[inline]
    fn pop_lsb(bb: &mut Bitboard) -> Option<Square> {
        bb.pop_front()
    }

    /// Squares attacked by a pawn of `color` (host numbering) on `sq`.
    fn pawn_attacks(color: Color, sq: Square) -> Bitboard;

    /// Squares attacked by a knight on `sq`.
    fn knight_attacks(sq: Square) -> Bitboard;

    /// Squares attacked by a bishop on `sq`, given blocking `occupied`
    /// squares.
    fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard;

    /// Squares attacked by a rook on `sq`, given blocking `occupied` squares.
    fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard;

    /// Squares attacked by a queen on `sq`, given blocking `occupied`
    /// squares.
    #[inline]
    fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        Self::bishop_attacks(sq, occupied) | Self::rook_attacks(sq, occupied)
    }

    /// Squares attacked by a king on `sq`.
    fn king_attacks(sq: Square) -> Bitboard;
}

/// The host implemented by this crate, backed by the compile-time tables in
/// [`attacks`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Builtin;

impl Host for Builtin {
    #[inline]
    fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
        attacks::pawn_attacks(color, sq)
    }

    #[inline]
    fn knight_attacks(sq: Square) -> Bitboard {
        attacks::knight_attacks(sq)
    }

    #[inline]
    fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        attacks::bishop_attacks(sq, occupied)
    }

    #[inline]
    fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        attacks::rook_attacks(sq, occupied)
    }

    #[inline]
    fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        attacks::queen_attacks(sq, occupied)
    }

    #[inline]
    fn king_attacks(sq: Square) -> Bitboard {
        attacks::king_attacks(sq)
    }
}
