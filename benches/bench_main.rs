use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use petrel::board::perft::perft;
use petrel::engine::history::PositionHistory;
use petrel::engine::search::SearchContext;
use petrel::tools::tt::TranspositionTable;
use petrel::Board;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_movegen(c: &mut Criterion) {
    let start = Board::start_pos();
    let middlegame = Board::from_fen(KIWIPETE).unwrap();
    c.bench_function("movegen startpos", |b| {
        b.iter(|| black_box(&start).generate_moves())
    });
    c.bench_function("movegen kiwipete", |b| {
        b.iter(|| black_box(&middlegame).generate_moves())
    });
}

fn bench_make_unmake(c: &mut Criterion) {
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    let moves = board.generate_moves();
    c.bench_function("make unmake kiwipete", |b| {
        b.iter(|| {
            for mv in &moves {
                let prior = board.make_move(*mv);
                let _ = black_box(board.zobrist());
                board.unmake_move(*mv, prior);
            }
        })
    });
}

fn bench_perft(c: &mut Criterion) {
    let mut start = Board::start_pos();
    c.bench_function("perft 4 startpos", |b| {
        b.iter(|| perft(&mut start, black_box(4)))
    });
    let mut middlegame = Board::from_fen(KIWIPETE).unwrap();
    c.bench_function("perft 3 kiwipete", |b| {
        b.iter(|| perft(&mut middlegame, black_box(3)))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = Board::from_fen(KIWIPETE).unwrap();
    c.bench_function("search depth 4 kiwipete", |b| {
        b.iter(|| {
            let tt = Arc::new(TranspositionTable::new(16));
            let stop = Arc::new(AtomicBool::new(false));
            let mut ctx = SearchContext::new(
                board.clone(),
                tt,
                stop,
                PositionHistory::new(),
            );
            ctx.iterative_deepening(black_box(4), |_, _, _| {})
        })
    });
}

criterion_group!(
    benches,
    bench_movegen,
    bench_make_unmake,
    bench_perft,
    bench_search
);
criterion_main!(benches);
