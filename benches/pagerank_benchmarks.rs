use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;
use webrank::algo::{build_matrix, page_rank, IndexOrder, IndexedGraph, PageRankConfig};
use webrank::RankPipeline;

/// Random directed graph with roughly `avg_degree` out-links per page
fn random_edges(pages: usize, avg_degree: usize, seed: u64) -> Vec<(u64, u64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..pages * avg_degree)
        .map(|_| (rng.gen_range(0..pages as u64), rng.gen_range(0..pages as u64)))
        .collect()
}

fn edge_list_text(edges: &[(u64, u64)]) -> String {
    let mut text = String::from("# FromNodeId\tToNodeId\n");
    for (src, dst) in edges {
        text.push_str(&format!("{}\t{}\n", src, dst));
    }
    text
}

/// Benchmark the solver alone over prebuilt matrices
fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");

    for size in [1_000, 10_000, 100_000].iter() {
        let graph = IndexedGraph::from_pairs(random_edges(*size, 8, 42), IndexOrder::SourcesFirst);
        let matrix = build_matrix(&graph).unwrap();

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| {
                let run = page_rank(&matrix, PageRankConfig::default()).unwrap();
                criterion::black_box(run.scores.len());
            });
        });

        let parallel = PageRankConfig {
            parallel: true,
            ..PageRankConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| {
                let run = page_rank(&matrix, parallel).unwrap();
                criterion::black_box(run.scores.len());
            });
        });
    }
    group.finish();
}

/// Benchmark the full text → ranks pipeline
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in [1_000, 10_000].iter() {
        let text = edge_list_text(&random_edges(*size, 8, 7));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let ranked = RankPipeline::default()
                    .rank_reader(Cursor::new(text.as_bytes()))
                    .unwrap();
                criterion::black_box(ranked.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solver, bench_pipeline);
criterion_main!(benches);
