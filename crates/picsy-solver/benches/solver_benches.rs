//! Criterion benchmarks for the contribution-solve hot paths.
//!
//! Covers: computation-matrix derivation, a single propagate step, and the
//! full solve at a representative community size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use picsy_core::matrix::EvaluationMatrix;
use picsy_core::traits::ContributionSolver;
use picsy_solver::PowerIteration;

const N: usize = 50;

/// Deterministic non-trivial evaluation matrix: every participant has liked
/// a few neighbours, so the solve has real work to do.
fn populated_matrix() -> EvaluationMatrix {
    let mut m = EvaluationMatrix::identity(N);
    for i in 0..N {
        for step in 1..=3 {
            let to = (i + step) % N;
            m.transfer(i, to, 0.05).expect("budget suffices for three likes");
        }
    }
    m
}

fn bench_derive_computation_matrix(c: &mut Criterion) {
    let m = populated_matrix();

    c.bench_function("derive_computation_matrix", |b| {
        b.iter(|| black_box(&m).computation_matrix())
    });
}

fn bench_propagate(c: &mut Criterion) {
    let cm = populated_matrix().computation_matrix().unwrap();
    let ones = vec![1.0; N];

    c.bench_function("propagate_step", |b| {
        b.iter(|| cm.propagate(black_box(&ones)))
    });
}

fn bench_solve(c: &mut Criterion) {
    let cm = populated_matrix().computation_matrix().unwrap();
    let solver = PowerIteration::new();

    c.bench_function("solve_contribution", |b| {
        b.iter(|| solver.solve(black_box(&cm), 100, 1e-7))
    });
}

criterion_group!(
    benches,
    bench_derive_computation_matrix,
    bench_propagate,
    bench_solve
);
criterion_main!(benches);
