use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bitboard_chess::game_state::chess_types::GameState;
use bitboard_chess::square_tables::slider_moves::init_slider_tables;
use bitboard_chess::search::negamax::{best_move, SearchAlgorithm, SearchConfig};

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    SearchCase {
        name: "classical_mid",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    },
    SearchCase {
        name: "tactical",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    SearchCase {
        name: "end_kpk",
        fen: "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1",
    },
];

fn bench_search(c: &mut Criterion) {
    let depth = std::env::var("SEARCH_BENCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(4)
        .max(1);

    init_slider_tables();
    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        for algorithm in [SearchAlgorithm::Negamax, SearchAlgorithm::AlphaBeta] {
            // Plain negamax is exponential; keep it one ply shallower.
            let max_depth = match algorithm {
                SearchAlgorithm::Negamax => depth.saturating_sub(1).max(1),
                SearchAlgorithm::AlphaBeta => depth,
            };
            let mut bench_game = game.clone();

            group.bench_with_input(
                BenchmarkId::new(case.name, format!("{algorithm:?}_d{max_depth}")),
                &max_depth,
                |b, &max_depth| {
                    b.iter(|| {
                        let result = best_move(
                            black_box(&mut bench_game),
                            black_box(SearchConfig {
                                max_depth,
                                algorithm,
                            }),
                        );
                        black_box(result.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
