// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use tsp_kopt_engine::prelude::{Tour, TourKind};
use tsp_kopt_model::prelude::{Node, NodeIndex};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const NUM_NODES: usize = 250;

fn build_tour(num_nodes: usize) -> Tour<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let nodes = (0..num_nodes)
        .map(|_| {
            Node::two_d(
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
            )
        })
        .collect();
    Tour::new(nodes, TourKind::Cycle).expect("enough nodes")
}

fn ni(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_swap_feasible_restore(c: &mut Criterion) {
    let mut tour = build_tour(NUM_NODES);
    c.bench_function("tour_swap_feasible_restore", |b| {
        b.iter(|| {
            tour.swap_feasible(
                black_box(ni(0)),
                black_box(ni(1)),
                black_box(ni(100)),
                black_box(ni(99)),
                false,
                true,
            );
            tour.restore(1).expect("one record on the stack");
        })
    });
}

fn bench_double_bridge_restore(c: &mut Criterion) {
    let mut tour = build_tour(NUM_NODES);
    let mv = tour
        .double_bridge_move(
            ni(0),
            ni(1),
            ni(62),
            ni(63),
            ni(125),
            ni(126),
            ni(187),
            ni(188),
        )
        .expect("four disjoint edges");
    c.bench_function("tour_double_bridge_restore", |b| {
        b.iter(|| {
            tour.apply_double_bridge(black_box(mv));
            tour.restore(1).expect("one record on the stack");
        })
    });
}

fn bench_between_by_position(c: &mut Criterion) {
    let tour = build_tour(NUM_NODES);
    c.bench_function("tour_between_by_position", |b| {
        b.iter(|| {
            black_box(tour.between_by_position(
                black_box(ni(10)),
                black_box(ni(125)),
                black_box(ni(240)),
            ))
        })
    });
}

fn bench_between_by_links(c: &mut Criterion) {
    let tour = build_tour(NUM_NODES);
    c.bench_function("tour_between_by_links", |b| {
        b.iter(|| {
            black_box(tour.between_by_links(
                black_box(ni(10)),
                black_box(ni(125)),
                black_box(ni(240)),
            ))
        })
    });
}

fn bench_sequence(c: &mut Criterion) {
    let tour = build_tour(NUM_NODES);
    c.bench_function("tour_sequence", |b| {
        b.iter(|| black_box(tour.sequence()))
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let mut tour = build_tour(NUM_NODES);
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    c.bench_function("tour_shuffle", |b| {
        b.iter(|| {
            tour.shuffle(&mut rng);
            black_box(tour.len())
        })
    });
}

criterion_group!(
    benches,
    bench_swap_feasible_restore,
    bench_double_bridge_restore,
    bench_between_by_position,
    bench_between_by_links,
    bench_sequence,
    bench_shuffle
);
criterion_main!(benches);
