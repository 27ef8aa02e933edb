//! Benchmarks for the event-driven solver.
//!
//! Run with:
//! ```bash
//! cargo bench --bench solver
//! ```

use bde_rs::history::DelayedValues;
use bde_rs::model::Unforced;
use bde_rs::series::BooleanTimeSeries;
use bde_rs::solver::BdeSolver;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// A ring of `n` variables, each negating its predecessor with incommensurate delays.
fn ring_solver(n: usize) -> BdeSolver<impl Fn(&DelayedValues, &DelayedValues) -> Vec<bool>> {
    let model = move |z: &DelayedValues, _: &DelayedValues| {
        (0..n)
            .map(|v| {
                let prev = (v + n - 1) % n;
                !z[v % 3][prev] ^ z[2][v]
            })
            .collect::<Vec<_>>()
    };
    let histories = (0..n)
        .map(|v| BooleanTimeSeries::alternating(vec![0.0, 0.05 * (v + 1) as f64], v % 2 == 0, 2.0))
        .collect::<Result<Vec<_>, _>>()
        .expect("valid histories");
    BdeSolver::new(model, vec![1.0, 0.7071, 1.4142], histories)
}

fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("oscillator");
    for end_time in [100.0, 1000.0, 10000.0] {
        let history = BooleanTimeSeries::new(vec![0.0], &[true], 1.0).expect("valid history");
        let solver = BdeSolver::new(Unforced(|z: &DelayedValues| vec![!z[0][0]]), vec![1.0], vec![history]);
        group.throughput(Throughput::Elements(end_time as u64));
        group.bench_with_input(BenchmarkId::from_parameter(end_time), &end_time, |b, &end_time| {
            b.iter(|| solver.solve(end_time).expect("solvable"))
        });
    }
    group.finish();
}

fn bench_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring");
    for n in [2, 8, 32] {
        let solver = ring_solver(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| solver.solve(20.0).expect("solvable"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_oscillator, bench_ring);
criterion_main!(benches);
