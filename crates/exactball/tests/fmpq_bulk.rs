//! The rational field's common-denominator bulk operations must agree
//! exactly with the element-wise generic algorithms.

use exactball::gr::generic::{mat_det_elimination, mat_mul_classical, poly_mullow_classical};
use exactball::gr::{GrCtx, GrMat, Method};
use exactball::{Elem, RandState};

const TRIALS: usize = 200;

fn random_vec(ctx: &GrCtx, state: &mut RandState, len: usize) -> Vec<Elem> {
    let mut v = ctx.vec_init(len);
    for x in &mut v {
        assert!(ctx.randtest(x, state).is_success());
    }
    v
}

fn random_mat(ctx: &GrCtx, state: &mut RandState, rows: usize, cols: usize) -> GrMat {
    let mut m = GrMat::new(rows, cols, ctx);
    assert!(m.fill(|e, _, _| ctx.randtest(e, state)).is_success());
    m
}

fn same_entries(ctx: &GrCtx, a: &[Elem], b: &[Elem]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| ctx.equal(x, y).is_true())
}

#[test]
fn test_bulk_methods_are_native() {
    let ctx = GrCtx::fmpq();
    for m in [Method::PolyMullow, Method::MatMul, Method::MatDet] {
        assert!(ctx.methods().is_native(m), "{}", m.name());
    }
}

#[test]
fn test_poly_mullow_matches_classical() {
    let ctx = GrCtx::fmpq();
    let mut state = RandState::new(1);
    for trial in 0..TRIALS {
        let la = state.randint(8) as usize;
        let lb = state.randint(8) as usize;
        let len = state.randint(16) as usize;
        let a = random_vec(&ctx, &mut state, la);
        let b = random_vec(&ctx, &mut state, lb);
        let mut fast = ctx.vec_init(len);
        let mut slow = ctx.vec_init(len);
        assert!(ctx.poly_mullow(&mut fast, &a, &b, len).is_success());
        assert!(poly_mullow_classical(&mut slow, &a, &b, len, &ctx).is_success());
        assert!(same_entries(&ctx, &fast, &slow), "trial {trial}");
    }
}

#[test]
fn test_mat_mul_matches_classical() {
    let ctx = GrCtx::fmpq();
    let mut state = RandState::new(2);
    for trial in 0..TRIALS {
        let (m, k, n) = (
            1 + state.randint(5) as usize,
            state.randint(5) as usize,
            1 + state.randint(5) as usize,
        );
        let a = random_mat(&ctx, &mut state, m, k);
        let b = random_mat(&ctx, &mut state, k, n);
        let mut fast = GrMat::new(m, n, &ctx);
        let mut slow = GrMat::new(m, n, &ctx);
        assert!(ctx.mat_mul(&mut fast, &a, &b).is_success());
        assert!(mat_mul_classical(&mut slow, &a, &b, &ctx).is_success());
        assert!(same_entries(&ctx, fast.entries(), slow.entries()), "trial {trial}");
    }
}

#[test]
fn test_mat_det_matches_elimination() {
    let ctx = GrCtx::fmpq();
    let mut state = RandState::new(3);
    for trial in 0..TRIALS {
        let n = state.randint(6) as usize;
        let a = random_mat(&ctx, &mut state, n, n);
        let mut fast = ctx.init();
        let mut slow = ctx.init();
        assert!(ctx.mat_det(&mut fast, &a).is_success());
        assert!(mat_det_elimination(&mut slow, &a, &ctx).is_success());
        assert!(ctx.equal(&fast, &slow).is_true(), "trial {trial}");
    }
}

#[test]
fn test_singular_matrix_has_zero_determinant() {
    let ctx = GrCtx::fmpq();
    let mut state = RandState::new(4);
    let mut a = random_mat(&ctx, &mut state, 4, 4);
    let copy: Vec<Elem> = a.row(0).iter().map(|x| ctx.elem_clone(x)).collect();
    for (j, x) in copy.iter().enumerate() {
        assert!(ctx.set(a.entry_mut(2, j), x).is_success());
    }
    let mut det = ctx.init();
    assert!(ctx.mat_det(&mut det, &a).is_success());
    assert!(ctx.is_zero(&det).is_true());
}

#[test]
fn test_integer_bulk_matches_classical() {
    let ctx = GrCtx::fmpz();
    let mut state = RandState::new(5);
    for trial in 0..TRIALS {
        let n = state.randint(5) as usize;
        let a = random_mat(&ctx, &mut state, n, n);
        let mut fast = ctx.init();
        let mut slow = ctx.init();
        assert!(ctx.mat_det(&mut fast, &a).is_success());
        assert!(mat_det_elimination(&mut slow, &a, &ctx).is_success());
        assert!(ctx.equal(&fast, &slow).is_true(), "trial {trial}");
    }
}
