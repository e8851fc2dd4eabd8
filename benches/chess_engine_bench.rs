//! Move handling benchmarks
//!
//! Criterion benchmarks for the hot paths of a turn: listing legal moves, resolving typed
//! notation, writing SAN, and the engine's own move generation and evaluation.

use chess_engine::api::{game_from_fen, new_game, reply_uci};
use chess_engine::constants::COLOR_WHITE;
use chess_engine::evaluation::evaluate_position;
use chess_engine::move_gen::{generate_pseudo_legal_moves, perft};
use chessbot::game::notation::{parse, resolve_text, to_san};
use chessbot::game::resolver::{legal_moves, resolve};
use chessbot::game::BoardState;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_legal_moves(c: &mut Criterion) {
    let start = BoardState::initial();
    let kiwipete = BoardState::from_fen(KIWIPETE).unwrap();

    c.bench_function("legal_moves_starting_position", |b| {
        b.iter(|| black_box(legal_moves(black_box(&start)).unwrap().len()))
    });
    c.bench_function("legal_moves_kiwipete", |b| {
        b.iter(|| black_box(legal_moves(black_box(&kiwipete)).unwrap().len()))
    });
}

fn bench_parse_and_resolve(c: &mut Criterion) {
    let kiwipete = BoardState::from_fen(KIWIPETE).unwrap();
    let intent = parse("Nxf7").unwrap();

    c.bench_function("parse_san", |b| b.iter(|| black_box(parse(black_box("exd6")))));
    c.bench_function("resolve_intent", |b| {
        b.iter(|| black_box(resolve(&kiwipete, black_box(&intent))))
    });
    c.bench_function("resolve_text_castle", |b| {
        b.iter(|| black_box(resolve_text(&kiwipete, black_box("O-O-O"))))
    });
}

fn bench_to_san(c: &mut Criterion) {
    let kiwipete = BoardState::from_fen(KIWIPETE).unwrap();
    let moves = legal_moves(&kiwipete).unwrap();

    c.bench_function("to_san_all_moves_kiwipete", |b| {
        b.iter(|| {
            for mv in &moves {
                black_box(to_san(&kiwipete, mv).unwrap());
            }
        })
    });
}

fn bench_engine(c: &mut Criterion) {
    let game = new_game();

    c.bench_function("engine_generate_moves_starting", |b| {
        b.iter(|| black_box(generate_pseudo_legal_moves(&game, COLOR_WHITE)))
    });
    c.bench_function("engine_evaluate_position_starting", |b| {
        b.iter(|| black_box(evaluate_position(&game)))
    });
    c.bench_function("engine_perft_3_kiwipete", |b| {
        b.iter(|| {
            let mut game = game_from_fen(KIWIPETE).unwrap();
            black_box(perft(&mut game, 3))
        })
    });

    let mut group = c.benchmark_group("engine_search");
    group.sample_size(10);
    group.bench_function("reply_depth_3_kiwipete", |b| {
        b.iter(|| {
            let mut game = game_from_fen(KIWIPETE).unwrap();
            game.abs_max_depth = 3;
            game.secs_per_move = 30.0;
            black_box(futures_lite::future::block_on(reply_uci(&mut game)).unwrap())
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_moves,
    bench_parse_and_resolve,
    bench_to_san,
    bench_engine,
);
criterion_main!(benches);
