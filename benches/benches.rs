use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pyrrhic_host::{bench::pick, Bindings, Bitboard, Builtin, Square, TbColor, TbPosition};
use rand::{rngs::StdRng, SeedableRng as _};

type Tb = Bindings<Builtin>;

fn bench_pawn_attacks(c: &mut Criterion) {
    c.bench_function("pawn_attacks", |b| {
        b.iter(|| {
            let mut acc = Bitboard::EMPTY;
            for sq in Square::ALL {
                acc ^= Tb::pawn_attacks_flag(black_box(sq), black_box(1));
                acc ^= Tb::pawn_attacks_flag(black_box(sq), black_box(0));
            }
            acc
        })
    });
}

fn bench_slider_attacks(c: &mut Criterion) {
    let occupied = Bitboard(0x3f7f_2880_2826_f5b9);
    c.bench_function("queen_attacks", |b| {
        b.iter(|| {
            let mut acc = Bitboard::EMPTY;
            for sq in Square::ALL {
                acc ^= Tb::queen_attacks(black_box(sq), black_box(occupied));
            }
            acc
        })
    });
}

fn bench_pop_lsb(c: &mut Criterion) {
    c.bench_function("pop_lsb", |b| {
        b.iter(|| {
            let mut bb = black_box(Bitboard(0x3f7f_2880_2826_f5b9));
            let mut n = 0;
            while let Some(sq) = Tb::pop_lsb(&mut bb) {
                n += sq.to_u32();
            }
            n
        })
    });
}

fn bench_validate_and_captures(c: &mut Criterion) {
    let pos: TbPosition = "r1r1k3/1P6/8/8/8/8/4n3/4K2R w - - 0 1"
        .parse()
        .expect("valid fen");

    c.bench_function("validate", |b| b.iter(|| black_box(&pos).validate()));
    c.bench_function("captures", |b| b.iter(|| black_box(&pos).captures().len()));
    c.bench_function("is_check", |b| {
        b.iter(|| {
            let mut pos = *black_box(&pos);
            pos.turn = TbColor::White;
            pos.is_check()
        })
    });
}

fn bench_pick(c: &mut Criterion) {
    let fens: Vec<String> = (0..1000)
        .map(|i| match i % 3 {
            0 => format!("4k3/8/8/8/8/8/8/4K3 w - - {} 1", i % 100),
            1 => format!("4k3/8/8/8/8/8/8/4K2R w - - {} 1", i % 100),
            _ => format!("4k3/8/8/8/8/8/8/3QK2R w - - {} 1", i % 100),
        })
        .collect();

    c.bench_function("pick", |b| {
        b.iter(|| pick(black_box(&fens), 100, &mut StdRng::seed_from_u64(1)).map(|p| p.len()))
    });
}

criterion_group!(
    benches,
    bench_pawn_attacks,
    bench_slider_attacks,
    bench_pop_lsb,
    bench_validate_and_captures,
    bench_pick
);
criterion_main!(benches);
