//! Benchmarks for the block puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blocker::orientation::enumerate;
use blocker::piece::{pentominoid_cube, soma};
use blocker::signals::SearchFlags;
use blocker::solver::SolverConfig;

/// Benchmark the complete Soma cube solve (first-solution search).
fn bench_solve_soma(c: &mut Criterion) {
    let problem = soma();
    let config = SolverConfig::default();
    let flags = SearchFlags::new();

    c.bench_function("solve_soma_first_solution", |b| {
        b.iter(|| problem.solve(black_box(&config), &flags, |_| {}).unwrap())
    });
}

/// Benchmark the first-solution search for the canonical 5x5x5 pentominoid cube.
fn bench_solve_pentominoid_cube(c: &mut Criterion) {
    let problem = pentominoid_cube();
    let config = SolverConfig::default();
    let flags = SearchFlags::new();

    c.bench_function("solve_pentominoid_cube_first_solution", |b| {
        b.iter(|| problem.solve(black_box(&config), &flags, |_| {}).unwrap())
    });
}

/// Benchmark computing all orientations for a single piece.
fn bench_orientations(c: &mut Criterion) {
    let problem = pentominoid_cube();
    let piece = &problem.pieces[0];
    let template = piece.template(&problem.space);

    c.bench_function("enumerate_orientations", |b| {
        b.iter(|| enumerate(black_box(template), &problem.space).unwrap())
    });
}

/// Benchmark formatting a solution for display.
fn bench_format_solution(c: &mut Criterion) {
    let problem = soma();
    let config = SolverConfig::default();
    let flags = SearchFlags::new();
    let report = problem.solve(&config, &flags, |_| {}).unwrap();
    let solution = &report.solutions[0];

    c.bench_function("format_solution", |b| {
        b.iter(|| problem.format_solution(black_box(solution)))
    });
}

criterion_group!(
    benches,
    bench_solve_soma,
    bench_solve_pentominoid_cube,
    bench_orientations,
    bench_format_solution
);
criterion_main!(benches);
