// Benchmarks for hint search and random map generation.
//
// Run with: cargo bench -p tilt_maze_sim
//
// `find_route` runs on every poll once the player is past the hint
// threshold, so it has to stay cheap for mazes far larger than the board
// ever builds.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tilt_maze_sim::hint::HintEngine;
use tilt_maze_sim::map_gen::{RandomMapParams, build_random_map};
use tilt_maze_sim::types::PieceId;

fn params(piece_count: u32) -> RandomMapParams {
    RandomMapParams {
        seed: 7,
        piece_count,
        duration_deviation: 500,
        finish_gold: 1000,
        base_duration: 3000,
    }
}

fn bench_find_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_route");
    for piece_count in [32u32, 256, 4096] {
        let map = build_random_map(&params(piece_count));
        let graph = map.graph;
        let mut engine = HintEngine::with_capacity(graph.len());
        group.bench_with_input(BenchmarkId::from_parameter(piece_count), &graph, |b, graph| {
            b.iter(|| {
                for i in 0..graph.len() as u32 {
                    black_box(engine.find_route(graph, PieceId(i), graph.finish()));
                }
            });
        });
    }
    group.finish();
}

fn bench_build_random_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_random_map");
    for piece_count in [32u32, 4096] {
        let p = params(piece_count);
        group.bench_with_input(BenchmarkId::from_parameter(piece_count), &p, |b, p| {
            b.iter(|| black_box(build_random_map(p)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_route, bench_build_random_map);
criterion_main!(benches);
