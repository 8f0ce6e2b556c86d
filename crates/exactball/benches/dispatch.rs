//! Benchmarks for generic ring dispatch and the rational bulk paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use exactball::gr::generic::{mat_det_elimination, mat_mul_classical, poly_mullow_classical};
use exactball::gr::{GrCtx, GrMat};
use exactball::{Elem, RandState};

fn random_vec(ctx: &GrCtx, state: &mut RandState, len: usize) -> Vec<Elem> {
    let mut v = ctx.vec_init(len);
    for x in &mut v {
        let _ = ctx.randtest(x, state);
    }
    v
}

fn random_mat(ctx: &GrCtx, state: &mut RandState, n: usize) -> GrMat {
    let mut m = GrMat::new(n, n, ctx);
    let _ = m.fill(|e, _, _| ctx.randtest(e, state));
    m
}

fn bench_scalar_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_dispatch");
    group.throughput(Throughput::Elements(1));

    let contexts = [
        ("fmpz", GrCtx::fmpz()),
        ("fmpq", GrCtx::fmpq()),
        ("nmod", GrCtx::nmod(1_000_000_007).unwrap()),
        ("arb", GrCtx::real_ball(128)),
    ];
    for (name, ctx) in contexts.iter() {
        let x = ctx.elem_si(12345).unwrap();
        let y = ctx.elem_si(-678).unwrap();
        let mut res = ctx.init();
        group.bench_function(BenchmarkId::new("mul", name), |b| {
            b.iter(|| black_box(ctx.mul(&mut res, black_box(&x), black_box(&y))));
        });
        group.bench_function(BenchmarkId::new("pow_ui", name), |b| {
            b.iter(|| black_box(ctx.pow_ui(&mut res, black_box(&x), 7)));
        });
    }

    group.finish();
}

fn bench_fmpq_poly_mullow(c: &mut Criterion) {
    let mut group = c.benchmark_group("fmpq_poly_mullow");
    let ctx = GrCtx::fmpq();
    let mut state = RandState::new(7);

    for len in [8usize, 32, 128].iter() {
        let a = random_vec(&ctx, &mut state, *len);
        let b = random_vec(&ctx, &mut state, *len);
        let mut res = ctx.vec_init(*len);
        group.throughput(Throughput::Elements(*len as u64));
        group.bench_with_input(BenchmarkId::new("common_denominator", len), len, |bn, &n| {
            bn.iter(|| black_box(ctx.poly_mullow(&mut res, &a, &b, n)));
        });
        group.bench_with_input(BenchmarkId::new("classical", len), len, |bn, &n| {
            bn.iter(|| black_box(poly_mullow_classical(&mut res, &a, &b, n, &ctx)));
        });
    }

    group.finish();
}

fn bench_fmpq_mat(c: &mut Criterion) {
    let mut group = c.benchmark_group("fmpq_mat");
    let ctx = GrCtx::fmpq();
    let mut state = RandState::new(11);

    for n in [4usize, 8, 16].iter() {
        let a = random_mat(&ctx, &mut state, *n);
        let b = random_mat(&ctx, &mut state, *n);
        let mut prod = GrMat::new(*n, *n, &ctx);
        let mut det = ctx.init();
        group.bench_with_input(BenchmarkId::new("mul_common_denominator", n), n, |bn, _| {
            bn.iter(|| black_box(ctx.mat_mul(&mut prod, &a, &b)));
        });
        group.bench_with_input(BenchmarkId::new("mul_classical", n), n, |bn, _| {
            bn.iter(|| black_box(mat_mul_classical(&mut prod, &a, &b, &ctx)));
        });
        group.bench_with_input(BenchmarkId::new("det_fraction_free", n), n, |bn, _| {
            bn.iter(|| black_box(ctx.mat_det(&mut det, &a)));
        });
        group.bench_with_input(BenchmarkId::new("det_elimination", n), n, |bn, _| {
            bn.iter(|| black_box(mat_det_elimination(&mut det, &a, &ctx)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_dispatch,
    bench_fmpq_poly_mullow,
    bench_fmpq_mat,
);
criterion_main!(benches);
