//! Criterion benchmarks for the core heap operations
//!
//! ```sh
//! cargo bench --bench heap_ops
//! ```
//!
//! Graph inputs come from a seeded LCG so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_fibonacci_heap::fibonacci::FibonacciHeap;
use rust_fibonacci_heap::pathfinding::{minimum_spanning_forest, shortest_paths, Graph};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 33
    }
}

fn shuffled(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next() % (n as u64 * 4)).collect()
}

fn synthetic_graph(vertices: usize, degree: usize, seed: u64) -> Graph<u64> {
    let mut rng = Lcg::new(seed);
    let mut graph = Graph::new(vertices);
    for u in 0..vertices {
        // a ring keeps the graph connected
        graph.add_undirected_edge(u, (u + 1) % vertices, 1 + rng.next() % 100);
        for _ in 0..degree {
            let v = (rng.next() % vertices as u64) as usize;
            graph.add_undirected_edge(u, v, 1 + rng.next() % 1_000);
        }
    }
    graph
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in SIZES {
        let values = shuffled(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                for &v in values {
                    heap.insert(v);
                }
                black_box(heap.len())
            })
        });
    }
    group.finish();
}

fn bench_heapsort(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_then_extract_all");
    for n in SIZES {
        let values = shuffled(n, 2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| black_box(FibonacciHeap::from_values(values.iter().copied()).into_sorted_vec()))
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key_all");
    for n in SIZES {
        let values = shuffled(n, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                let handles: Vec<_> = values.iter().map(|&v| heap.insert(v + 1)).collect();
                // one extraction so there are trees to cut from
                heap.insert(0);
                let _ = heap.extract_min();
                for (h, &v) in handles.iter().zip(values) {
                    let _ = heap.decrease_key(h, v);
                }
                black_box(heap.peek_min().ok().copied())
            })
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for n in SIZES {
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter_batched(
                || {
                    let a = FibonacciHeap::from_values(shuffled(n, 4));
                    let other = FibonacciHeap::from_values(shuffled(n, 5));
                    (a, other)
                },
                |(mut a, mut other)| {
                    a.append(&mut other);
                    black_box(a.len())
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("graphs");
    group.sample_size(20);
    for n in [1_000usize, 10_000] {
        let graph = synthetic_graph(n, 4, 6);
        group.bench_with_input(BenchmarkId::new("dijkstra", n), &graph, |b, g| {
            b.iter(|| black_box(shortest_paths(g, 0).distance(n - 1)))
        });
        group.bench_with_input(BenchmarkId::new("prim", n), &graph, |b, g| {
            b.iter(|| black_box(minimum_spanning_forest(g).total))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_heapsort,
    bench_decrease_key,
    bench_merge,
    bench_graphs,
);
criterion_main!(benches);
