//! Criterion benchmarks for pricer_core root-finding solvers.
//!
//! Compares the fixed-step relaxation loop against Newton-Raphson on the
//! same smooth target across tolerances.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::solvers::{NewtonRaphsonSolver, RelaxationSolver, SolverConfig};

/// Benchmark relaxation and Newton-Raphson on e^x = 3.
fn bench_root_finding(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_finding");

    for tolerance in [1e-6, 1e-10] {
        let config = SolverConfig::new(tolerance, 10_000);

        let relaxation = RelaxationSolver::new(config);
        group.bench_with_input(
            BenchmarkId::new("relaxation", tolerance),
            &relaxation,
            |b, solver| {
                b.iter(|| solver.solve(|x: f64| x.exp(), black_box(3.0), 0.3, black_box(1.0)));
            },
        );

        let newton = NewtonRaphsonSolver::new(config);
        group.bench_with_input(
            BenchmarkId::new("newton_raphson", tolerance),
            &newton,
            |b, solver| {
                b.iter(|| {
                    solver.find_root(
                        |x: f64| x.exp() - black_box(3.0),
                        |x: f64| x.exp(),
                        black_box(1.0),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_root_finding);
criterion_main!(benches);
