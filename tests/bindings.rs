use std::cell::Cell;

use pyrrhic_host::{attacks, Bindings, Bitboard, Builtin, Color, Host, Square, TbColor, TbPosition};

thread_local! {
    static PAWN_CALLS: Cell<usize> = const { Cell::new(0) };
    static LAST_PAWN_COLOR: Cell<Option<Color>> = const { Cell::new(None) };
}

/// A host that delegates to the built-in tables and records pawn lookups.
struct Recording;

impl Host for Recording {
    fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
        PAWN_CALLS.with(|calls| calls.set(calls.get() + 1));
        LAST_PAWN_COLOR.with(|last| last.set(Some(color)));
        attacks::pawn_attacks(color, sq)
    }
    fn knight_attacks(sq: Square) -> Bitboard {
        attacks::knight_attacks(sq)
    }
    fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        attacks::bishop_attacks(sq, occupied)
    }
    fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        attacks::rook_attacks(sq, occupied)
    }
    fn king_attacks(sq: Square) -> Bitboard {
        attacks::king_attacks(sq)
    }
}

#[test]
fn test_host_sees_inverted_color() {
    Bindings::<Recording>::pawn_attacks(Square::E4, TbColor::White);
    assert_eq!(LAST_PAWN_COLOR.with(Cell::get), Some(Color::White));
    assert_eq!(TbColor::White.to_flag(), 1);
    assert_eq!(Color::White.to_u8(), 0);

    Bindings::<Recording>::pawn_attacks_flag(Square::E4, 0);
    assert_eq!(LAST_PAWN_COLOR.with(Cell::get), Some(Color::Black));

    Bindings::<Recording>::pawn_attacks_flag(Square::E4, 0x80);
    assert_eq!(LAST_PAWN_COLOR.with(Cell::get), Some(Color::White));
}

#[test]
fn test_position_through_host() {
    let fen = "8/8/3k4/4P3/8/8/8/4K3 b - - 0 1";
    let recording: TbPosition<Recording> = fen.parse().expect("valid fen");
    let builtin: TbPosition<Builtin> = fen.parse().expect("valid fen");

    let before = PAWN_CALLS.with(Cell::get);
    assert!(recording.is_check());
    assert!(PAWN_CALLS.with(Cell::get) > before);

    assert_eq!(recording.is_check(), builtin.is_check());
    assert_eq!(recording.captures(), builtin.captures());
    assert_eq!(recording.material(), builtin.material());
    assert_eq!(recording.with_host::<Builtin>(), builtin);
}

#[test]
fn test_builtin_agrees_with_recording() {
    let occupied = Bitboard(0x00ff_0000_0000_ff00);
    for sq in Square::ALL {
        for color in [TbColor::White, TbColor::Black] {
            assert_eq!(
                Bindings::<Recording>::pawn_attacks(sq, color),
                Bindings::<Builtin>::pawn_attacks(sq, color)
            );
        }
        assert_eq!(
            Bindings::<Recording>::queen_attacks(sq, occupied),
            Bindings::<Builtin>::queen_attacks(sq, occupied)
        );
    }
}
