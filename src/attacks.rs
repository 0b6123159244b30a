//! Attack tables of the built-in host.
//!
//! All tables are computed at compile time. Sliding pieces use one table per
//! piece type, indexed by the occupancy of the relevant squares compressed
//! with a parallel bit extract (`pext`). The hardware instruction is used
//! when the build enables BMI2.
//!
//! # Example
//!
//! ```
//! use pyrrhic_host::{attacks, Bitboard, Rank, Square};
//!
//! let occupied = Bitboard::from(Rank::Sixth); // blocking pieces
//! let attacks = attacks::bishop_attacks(Square::C2, occupied);
//! // . . . . . . . .
//! // . . . . . . . .
//! // 0 0 0 0 0 0 1 0
//! // . . . . . 1 . .
//! // 1 . . . 1 . . .
//! // . 1 . 1 . . . .
//! // . . . . . . . .
//! // . 1 . 1 . . . .
//!
//! assert!(attacks.contains(Square::G6));
//! assert!(!attacks.contains(Square::H7));
//! ```

use crate::{Bitboard, ByColor, Color, Square};

const ROOK_DELTAS: [i32; 4] = [8, 1, -8, -1];
const BISHOP_DELTAS: [i32; 4] = [9, 7, -9, -7];
const KING_DELTAS: [i32; 8] = [9, 8, 7, 1, -9, -8, -7, -1];
const KNIGHT_DELTAS: [i32; 8] = [17, 15, 10, 6, -17, -15, -10, -6];
const WHITE_PAWN_DELTAS: [i32; 2] = [7, 9];
const BLACK_PAWN_DELTAS: [i32; 2] = [-7, -9];

const RANK_1: u64 = 0xff;
const RANK_8: u64 = 0xff00_0000_0000_0000;
const FILE_A: u64 = 0x0101_0101_0101_0101;
const FILE_H: u64 = 0x8080_8080_8080_8080;

/// Walks each delta from `square` until leaving the board or hitting an
/// occupied square (which is included).
const fn sliding_attacks(square: i32, occupied: u64, deltas: &[i32]) -> u64 {
    let mut attack = 0;

    let mut i = 0;
    while i < deltas.len() {
        let mut previous = square;
        loop {
            let sq = previous + deltas[i];
            let file_diff = (sq & 0x7) - (previous & 0x7);
            if file_diff > 2 || file_diff < -2 || sq < 0 || sq > 63 {
                break;
            }
            let bb = 1 << sq;
            attack |= bb;
            if occupied & bb != 0 {
                break;
            }
            previous = sq;
        }
        i += 1;
    }

    attack
}

const fn stepping_table(deltas: &[i32]) -> [u64; 64] {
    let mut table = [0; 64];
    let mut sq = 0;
    while sq < 64 {
        // Fully occupied board: every ray stops after one step.
        table[sq as usize] = sliding_attacks(sq, !0, deltas);
        sq += 1;
    }
    table
}

static KNIGHT_ATTACKS: [u64; 64] = stepping_table(&KNIGHT_DELTAS);
static KING_ATTACKS: [u64; 64] = stepping_table(&KING_DELTAS);
static PAWN_ATTACKS: ByColor<[u64; 64]> = ByColor {
    white: stepping_table(&WHITE_PAWN_DELTAS),
    black: stepping_table(&BLACK_PAWN_DELTAS),
};

/// Looks up attacks for a pawn of `color` on `sq`.
///
/// `color` uses the host numbering (see [`Color`]).
#[inline]
pub const fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS.get(color)[sq.to_usize()])
}

/// Looks up attacks for a knight on `sq`.
#[inline]
pub const fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.to_usize()])
}

/// Looks up attacks for a king on `sq`.
#[inline]
pub const fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.to_usize()])
}

/// Squares whose occupancy can change the attacks from `square`. Edge
/// squares never block anything behind them.
const fn relevant_mask(square: i32, deltas: &[i32]) -> u64 {
    let rank = RANK_1 << (8 * (square >> 3));
    let file = FILE_A << (square & 7);
    let edges = ((RANK_1 | RANK_8) & !rank) | ((FILE_A | FILE_H) & !file);
    sliding_attacks(square, 0, deltas) & !edges
}

struct SliderTable<const N: usize> {
    masks: [u64; 64],
    offsets: [usize; 64],
    attacks: [u64; N],
}

impl<const N: usize> SliderTable<N> {
    const fn bootstrap(deltas: &[i32]) -> SliderTable<N> {
        let mut table = SliderTable {
            masks: [0; 64],
            offsets: [0; 64],
            attacks: [0; N],
        };

        let mut offset = 0;
        let mut square = 0;
        while square < 64 {
            let mask = relevant_mask(square, deltas);
            table.masks[square as usize] = mask;
            table.offsets[square as usize] = offset;

            // Carry-Rippler. Visits the subsets of mask in the order of their
            // compressed index.
            let mut subset: u64 = 0;
            loop {
                table.attacks[offset] = sliding_attacks(square, subset, deltas);
                offset += 1;
                subset = subset.wrapping_sub(mask) & mask;
                if subset == 0 {
                    break;
                }
            }

            square += 1;
        }

        assert!(offset == N, "slider table size does not match masks");
        table
    }

    #[inline]
    fn lookup(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let i = sq.to_usize();
        Bitboard(self.attacks[self.offsets[i] + pext(occupied.0, self.masks[i]) as usize])
    }
}

#[allow(long_running_const_eval)]
static ROOK_TABLE: SliderTable<0x19000> = SliderTable::bootstrap(&ROOK_DELTAS);
#[allow(long_running_const_eval)]
static BISHOP_TABLE: SliderTable<0x1480> = SliderTable::bootstrap(&BISHOP_DELTAS);

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
fn pext(src: u64, mask: u64) -> u64 {
    // Safety: The bmi2 target feature is statically enabled.
    unsafe { core::arch::x86_64::_pext_u64(src, mask) }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
fn pext(src: u64, mut mask: u64) -> u64 {
    let mut result = 0;
    let mut bit = 1;
    while mask != 0 {
        if src & mask & mask.wrapping_neg() != 0 {
            result |= bit;
        }
        mask &= mask.wrapping_sub(1);
        bit <<= 1;
    }
    result
}

/// Looks up attacks for a rook on `sq` with `occupied` squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ROOK_TABLE.lookup(sq, occupied)
}

/// Looks up attacks for a bishop on `sq` with `occupied` squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    BISHOP_TABLE.lookup(sq, occupied)
}

/// Looks up attacks for a queen on `sq` with `occupied` squares.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(sq: Square, occupied: Bitboard, deltas: &[i32]) -> Bitboard {
        Bitboard(sliding_attacks(sq.to_u32() as i32, occupied.0, deltas))
    }

    #[test]
    fn test_rook_attacks() {
        assert_eq!(
            rook_attacks(Square::D6, Bitboard(0x3f7f_2880_2826_f5b9)),
            Bitboard(0x0008_3708_0800_0000)
        );
    }

    #[test]
    fn test_sliders_match_ray_walk() {
        let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
        for _ in 0..64 {
            // xorshift, sparse occupancies
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let occupied = Bitboard(state & state.rotate_left(11) & state.rotate_left(29));
            for sq in Square::ALL {
                assert_eq!(rook_attacks(sq, occupied), naive(sq, occupied, &ROOK_DELTAS));
                assert_eq!(
                    bishop_attacks(sq, occupied),
                    naive(sq, occupied, &BISHOP_DELTAS)
                );
            }
        }
    }

    #[test]
    fn test_empty_board_ranges() {
        for sq in Square::ALL {
            assert_eq!(rook_attacks(sq, Bitboard::EMPTY).count(), 14);
            assert!(queen_attacks(sq, Bitboard::EMPTY).count() >= 21);
        }
    }

    #[test]
    fn test_stepping_attacks() {
        assert_eq!(knight_attacks(Square::A1), Bitboard(0x0002_0400));
        assert_eq!(king_attacks(Square::H8).count(), 3);
        assert_eq!(
            pawn_attacks(Color::White, Square::E4),
            Bitboard::from(Square::D5) | Square::F5
        );
        assert_eq!(
            pawn_attacks(Color::Black, Square::A7),
            Bitboard::from(Square::B6)
        );
        assert_eq!(pawn_attacks(Color::White, Square::H8), Bitboard::EMPTY);
    }

    #[test]
    fn test_pext() {
        assert_eq!(pext(!0, 0), 0);
        assert_eq!(pext(!0, !0), !0);
        assert_eq!(pext(7, 1), 1);
        assert_eq!(pext(255, 16 | 4096), 1);
    }
}
