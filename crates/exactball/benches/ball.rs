//! Benchmarks for ball arithmetic, elementary functions and constants.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;

use exactball::ball::{const_log2, const_pi, exp_taylor_naive, Acb, Arb};

const PRECS: [u64; 4] = [64, 256, 1024, 4096];

fn third(prec: u64) -> Arb {
    Arb::from_rational(&BigRational::new(BigInt::from(1), BigInt::from(3)), prec)
}

fn bench_arb_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arb_arithmetic");
    group.throughput(Throughput::Elements(1));

    for prec in PRECS.iter() {
        let x = third(*prec);
        let y = x.sqrt(*prec);
        group.bench_with_input(BenchmarkId::new("mul", prec), prec, |b, &p| {
            b.iter(|| black_box(x.mul(black_box(&y), p)));
        });
        group.bench_with_input(BenchmarkId::new("div", prec), prec, |b, &p| {
            b.iter(|| black_box(x.div(black_box(&y), p)));
        });
        group.bench_with_input(BenchmarkId::new("sqrt", prec), prec, |b, &p| {
            b.iter(|| black_box(black_box(&x).sqrt(p)));
        });
    }

    group.finish();
}

fn bench_arb_elementary(c: &mut Criterion) {
    let mut group = c.benchmark_group("arb_elementary");

    for prec in PRECS.iter() {
        let x = third(*prec);
        group.bench_with_input(BenchmarkId::new("exp", prec), prec, |b, &p| {
            b.iter(|| black_box(black_box(&x).exp(p)));
        });
        group.bench_with_input(BenchmarkId::new("log", prec), prec, |b, &p| {
            b.iter(|| black_box(black_box(&x).log(p)));
        });
    }

    group.finish();
}

fn bench_exp_taylor_naive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exp_taylor_naive");

    for wp in [128u64, 512, 2048].iter() {
        // x = 2^-8 in fixed point
        let x = BigUint::from(1u8) << (*wp - 8);
        let terms = *wp / 8 + 2;
        group.throughput(Throughput::Elements(terms));
        group.bench_with_input(BenchmarkId::from_parameter(wp), wp, |b, &wp| {
            b.iter(|| black_box(exp_taylor_naive(black_box(&x), wp, terms)));
        });
    }

    group.finish();
}

fn bench_constants(c: &mut Criterion) {
    let mut group = c.benchmark_group("constants");

    // Cached after the first call at the largest precision.
    let _ = const_log2(8192);
    for prec in PRECS.iter() {
        group.bench_with_input(BenchmarkId::new("log2_cached", prec), prec, |b, &p| {
            b.iter(|| black_box(const_log2(black_box(p))));
        });
        group.bench_with_input(BenchmarkId::new("pi", prec), prec, |b, &p| {
            b.iter(|| black_box(const_pi(black_box(p))));
        });
    }

    group.finish();
}

fn bench_acb_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("acb_mul");
    group.throughput(Throughput::Elements(1));

    for prec in PRECS.iter() {
        let z = Acb::new(third(*prec), third(*prec).neg());
        group.bench_with_input(BenchmarkId::from_parameter(prec), prec, |b, &p| {
            b.iter(|| black_box(z.mul(black_box(&z), p)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_arb_arithmetic,
    bench_arb_elementary,
    bench_exp_taylor_naive,
    bench_constants,
    bench_acb_mul,
);
criterion_main!(benches);
