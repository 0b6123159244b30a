//! C symbols for Pyrrhic, backed by [`Builtin`].
//!
//! Names and signatures are the ones Pyrrhic declares and links against.
//! Colors are in the host numbering: `pawnAttacks(0, sq)` are the attacks of
//! a white pawn. Pyrrhic inverts its own color before calling.
//!
//! Empty bitboards yield square index `64`. Out-of-range squares yield an
//! empty bitboard.
//!
//! This crate builds as an rlib. To link the symbols from C, re-export this
//! module from a wrapper crate with `crate-type = ["staticlib"]`.

#![allow(non_snake_case)]

use crate::{Bitboard, Builtin, Color, Host, Square};

fn square(sq: u8) -> Option<Square> {
    let square = Square::try_from(sq).ok();
    if square.is_none() {
        tracing::trace!(sq, "square out of range");
    }
    square
}

fn index(sq: Option<Square>) -> u8 {
    sq.map_or(64, Square::to_u8)
}

#[unsafe(no_mangle)]
pub extern "C" fn popcount(bb: u64) -> u8 {
    Builtin::popcount(Bitboard(bb))
}

#[unsafe(no_mangle)]
pub extern "C" fn getlsb(bb: u64) -> u8 {
    index(Builtin::lsb(Bitboard(bb)))
}

/// Clears the lowest bit of `*bb` and returns its index.
///
/// # Safety
///
/// `bb` must be null or valid for reads and writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn poplsb(bb: *mut u64) -> u8 {
    // Safety: Upheld by the caller.
    let Some(bb) = (unsafe { bb.as_mut() }) else {
        tracing::trace!("poplsb called with null pointer");
        return 64;
    };
    let mut board = Bitboard(*bb);
    let sq = Builtin::pop_lsb(&mut board);
    *bb = board.0;
    index(sq)
}

#[unsafe(no_mangle)]
pub extern "C" fn pawnAttacks(col: u8, sq: u8) -> u64 {
    square(sq).map_or(0, |sq| Builtin::pawn_attacks(Color::from_black(col != 0), sq).0)
}

#[unsafe(no_mangle)]
pub extern "C" fn knightAttacks(sq: u8) -> u64 {
    square(sq).map_or(0, |sq| Builtin::knight_attacks(sq).0)
}

#[unsafe(no_mangle)]
pub extern "C" fn bishopAttacks(sq: u8, occ: u64) -> u64 {
    square(sq).map_or(0, |sq| Builtin::bishop_attacks(sq, Bitboard(occ)).0)
}

#[unsafe(no_mangle)]
pub extern "C" fn rookAttacks(sq: u8, occ: u64) -> u64 {
    square(sq).map_or(0, |sq| Builtin::rook_attacks(sq, Bitboard(occ)).0)
}

#[unsafe(no_mangle)]
pub extern "C" fn queenAttacks(sq: u8, occ: u64) -> u64 {
    square(sq).map_or(0, |sq| Builtin::queen_attacks(sq, Bitboard(occ)).0)
}

#[unsafe(no_mangle)]
pub extern "C" fn kingAttacks(sq: u8) -> u64 {
    square(sq).map_or(0, |sq| Builtin::king_attacks(sq).0)
}
