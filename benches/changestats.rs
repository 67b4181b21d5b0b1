use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ergm::test_utilities::random_graph;
use ergm::{Term, TwoPathCacheKind};

fn bench_change_statistics(c: &mut Criterion) {
    let hash = random_graph(1000, 5000, false, None, TwoPathCacheKind::Hash, 42);
    let none = random_graph(1000, 5000, false, None, TwoPathCacheKind::None, 42);
    let alt_triangles = Term::AltKTriangles { decay: 2.0 };
    c.bench_function("alt_k_triangles_hash_cache", |b| {
        b.iter(|| alt_triangles.change(black_box(&hash), black_box(17), black_box(801)))
    });
    c.bench_function("alt_k_triangles_no_cache", |b| {
        b.iter(|| alt_triangles.change(black_box(&none), black_box(17), black_box(801)))
    });
    let alt_two_paths = Term::AltTwoPaths { decay: 2.0 };
    c.bench_function("alt_two_paths_hash_cache", |b| {
        b.iter(|| alt_two_paths.change(black_box(&hash), black_box(17), black_box(801)))
    });
}

fn bench_toggles(c: &mut Criterion) {
    c.bench_function("insert_remove_with_hash_cache", |b| {
        let mut graph = random_graph(1000, 5000, false, None, TwoPathCacheKind::Hash, 7);
        b.iter(|| {
            if graph.has_edge(3, 900) {
                graph.remove_edge(3, 900);
            } else {
                graph.insert_edge(3, 900);
            }
        })
    });
}

criterion_group!(benches, bench_change_statistics, bench_toggles);
criterion_main!(benches);
