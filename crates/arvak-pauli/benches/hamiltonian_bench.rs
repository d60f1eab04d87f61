//! Benchmarks for Pauli-operator arithmetic
//!
//! Run with: cargo bench -p arvak-pauli

use arvak_pauli::paulis::{projector, x, z};
use arvak_pauli::{QubitHamiltonian, QubitWaveFunction};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use num_complex::Complex64;

/// Transverse-field Ising chain: -Σ Z_i Z_{i+1} - g Σ X_i
fn ising_chain(n: u32, g: f64) -> QubitHamiltonian {
    let coupling: QubitHamiltonian = (0..n - 1).map(|q| z(q) * z(q + 1)).sum();
    let field: QubitHamiltonian = (0..n).map(x).sum();
    -1.0 * coupling - g * field
}

/// Benchmark symbolic operator products
fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");

    for n in &[4_u32, 8, 16, 32] {
        let h = ising_chain(*n, 0.5);
        group.bench_with_input(BenchmarkId::new("ising_squared", n), &h, |b, h| {
            b.iter(|| black_box(h) * black_box(h));
        });
    }

    group.finish();
}

/// Benchmark adjoint and commutators
fn bench_conjugation(c: &mut Criterion) {
    let mut group = c.benchmark_group("conjugation");
    let h = ising_chain(16, 0.5);
    let k = Complex64::new(0.0, 1.0) * ising_chain(16, 1.5);

    group.bench_function("dagger", |b| {
        b.iter(|| black_box(&k).dagger());
    });

    group.bench_function("commutator", |b| {
        b.iter(|| black_box(&h).commutator(black_box(&k)));
    });

    group.finish();
}

/// Benchmark dense realisation against term-wise application
fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense");

    for n in &[4_u32, 6, 8] {
        let h = ising_chain(*n, 0.5);
        group.bench_with_input(BenchmarkId::new("to_matrix", n), &h, |b, h| {
            b.iter(|| h.to_matrix().unwrap());
        });

        let wfn = QubitWaveFunction::from_int(0, *n).unwrap();
        group.bench_with_input(BenchmarkId::new("apply", n), &(h, wfn), |b, (h, wfn)| {
            b.iter(|| h.apply(black_box(wfn)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark projector construction from a uniform superposition
fn bench_projector(c: &mut Criterion) {
    let mut group = c.benchmark_group("projector");

    for n in &[2_u32, 3, 4] {
        let dim = 1_usize << n;
        let amp = Complex64::new(1.0 / (dim as f64).sqrt(), 0.0);
        let wfn = QubitWaveFunction::from_amplitudes(vec![amp; dim]).unwrap();
        group.bench_with_input(BenchmarkId::new("uniform", n), &wfn, |b, wfn| {
            b.iter(|| projector(black_box(wfn)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_multiply,
    bench_conjugation,
    bench_dense,
    bench_projector,
);
criterion_main!(benches);
