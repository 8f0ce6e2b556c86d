//! One generic algorithm, many domains.
//!
//! These tests drive the dispatch layer through every concrete domain:
//! method tables are complete, fallbacks compose the native methods,
//! conversions cross domains, and failures surface as statuses.

use std::cmp::Ordering;

use exactball::gr::{fmpz_ctx, GrCtx, GrMat, Method, RingTag};
use exactball::{Elem, GrError, RandState, Status, Truth};
use num_bigint::BigInt;
use num_rational::BigRational;

fn all_contexts() -> Vec<GrCtx> {
    vec![
        GrCtx::fmpz(),
        GrCtx::fmpq(),
        GrCtx::nmod(1_000_000_007).unwrap(),
        GrCtx::nmod(12).unwrap(),
        GrCtx::padic(&BigInt::from(7), 20).unwrap(),
        GrCtx::real_ball(128),
        GrCtx::complex_ball(128),
    ]
}

fn matrix(ctx: &GrCtx, rows: usize, cols: usize, vals: &[i64]) -> GrMat {
    let mut m = GrMat::new(rows, cols, ctx);
    assert!(m.fill(|e, i, j| ctx.set_si(e, vals[i * cols + j])).is_success());
    m
}

// =============================================================================
// Tables and descriptions
// =============================================================================

#[test]
fn test_every_context_has_a_complete_table() {
    for ctx in all_contexts() {
        let table = ctx.methods();
        assert_eq!(table.ring(), ctx.which_ring());
        for &m in Method::ALL {
            assert_eq!(table.slot(m).kind(), m.kind(), "{} in {}", m.name(), ctx);
        }
        assert!(table.is_native(Method::Init));
        assert!(!ctx.ctx_to_string().is_empty());
    }
}

#[test]
fn test_structure_predicates() {
    let expect = [
        (GrCtx::fmpz(), Truth::False, Truth::True),
        (GrCtx::fmpq(), Truth::True, Truth::True),
        (GrCtx::nmod(13).unwrap(), Truth::True, Truth::True),
        (GrCtx::nmod(14).unwrap(), Truth::False, Truth::True),
        (GrCtx::padic(&BigInt::from(3), 5).unwrap(), Truth::True, Truth::False),
        (GrCtx::real_ball(64), Truth::True, Truth::False),
    ];
    for (ctx, field, exact) in expect {
        assert_eq!(ctx.is_field(), field, "{ctx}");
        assert_eq!(ctx.is_exact(), exact, "{ctx}");
    }
}

#[test]
fn test_shared_integer_context() {
    let ctx = fmpz_ctx();
    let x = ctx.elem_si(41).unwrap();
    let mut r = ctx.init();
    assert!(ctx.add_ui(&mut r, &x, 1).is_success());
    assert_eq!(ctx.to_fmpz(&r).unwrap(), BigInt::from(42));
}

// =============================================================================
// Generic algorithms over every domain
// =============================================================================

#[test]
fn test_powers_agree_with_repeated_multiplication() {
    for ctx in all_contexts() {
        let x = ctx.elem_si(3).unwrap();
        let mut by_pow = ctx.init();
        assert!(ctx.pow_ui(&mut by_pow, &x, 13).is_success(), "{ctx}");
        let mut acc = ctx.elem_si(1).unwrap();
        let mut t = ctx.init();
        for _ in 0..13 {
            assert!(ctx.mul(&mut t, &acc, &x).is_success());
            acc.swap(&mut t);
        }
        assert_ne!(ctx.equal(&by_pow, &acc), Truth::False, "{ctx}");
        assert_ne!(ctx.equal(&by_pow, &ctx.elem_si(1_594_323).unwrap()), Truth::False, "{ctx}");
    }
}

#[test]
fn test_size_limit_boundary_is_shared_by_native_and_generic_powers() {
    let contexts = [
        GrCtx::fmpz().with_size_limit(10),
        GrCtx::fmpq().with_size_limit(10),
        GrCtx::padic(&BigInt::from(7), 20).unwrap().with_size_limit(10),
    ];
    assert!(contexts[0].methods().is_native(Method::PowUi));
    assert!(contexts[1].methods().is_native(Method::PowUi));
    assert!(!contexts[2].methods().is_native(Method::PowUi));
    for ctx in &contexts {
        let x = ctx.elem_si(3).unwrap();
        let mut r = ctx.init();
        assert!(ctx.pow_ui(&mut r, &x, 9).is_success(), "{ctx}");
        assert_eq!(ctx.equal(&r, &ctx.elem_si(19_683).unwrap()), Truth::True, "{ctx}");
        assert_eq!(ctx.pow_ui(&mut r, &x, 10), Status::UNABLE, "{ctx}");
        assert_eq!(ctx.pow_ui(&mut r, &x, 11), Status::UNABLE, "{ctx}");
    }
}

#[test]
fn test_polynomial_product_over_every_domain() {
    // (1 + 2x + 3x^2)(4 + 5x) = 4 + 13x + 22x^2 + 15x^3
    for ctx in all_contexts() {
        let a: Vec<Elem> = [1, 2, 3].iter().map(|&v| ctx.elem_si(v).unwrap()).collect();
        let b: Vec<Elem> = [4, 5].iter().map(|&v| ctx.elem_si(v).unwrap()).collect();
        let mut res = ctx.vec_init(4);
        assert!(ctx.poly_mullow(&mut res, &a, &b, 4).is_success(), "{ctx}");
        for (c, want) in res.iter().zip([4, 13, 22, 15]) {
            let want = ctx.elem_si(want).unwrap();
            assert_ne!(ctx.equal(c, &want), Truth::False, "{ctx}");
        }
    }
}

#[test]
fn test_determinant_over_exact_domains() {
    let vals = [2, -1, 0, -1, 2, -1, 0, -1, 2];
    for ctx in [GrCtx::fmpz(), GrCtx::fmpq(), GrCtx::nmod(101).unwrap()] {
        let m = matrix(&ctx, 3, 3, &vals);
        let mut det = ctx.init();
        assert!(ctx.mat_det(&mut det, &m).is_success(), "{ctx}");
        assert!(ctx.equal(&det, &ctx.elem_si(4).unwrap()).is_true(), "{ctx}");
    }
}

#[test]
fn test_determinant_over_balls() {
    let ctx = GrCtx::real_ball(128);
    let m = matrix(&ctx, 2, 2, &[3, 1, 4, 2]);
    let mut det = ctx.init();
    assert!(ctx.mat_det(&mut det, &m).is_success());
    assert_ne!(ctx.equal(&det, &ctx.elem_si(2).unwrap()), Truth::False);
}

#[test]
fn test_matrix_product_shapes() {
    let ctx = GrCtx::nmod(7).unwrap();
    let a = matrix(&ctx, 2, 3, &[1, 2, 3, 4, 5, 6]);
    let b = matrix(&ctx, 3, 1, &[1, 1, 1]);
    let mut c = GrMat::new(2, 1, &ctx);
    assert!(ctx.mat_mul(&mut c, &a, &b).is_success());
    assert_eq!(ctx.to_fmpz(c.entry(0, 0)).unwrap(), BigInt::from(6));
    assert_eq!(ctx.to_fmpz(c.entry(1, 0)).unwrap(), BigInt::from(1));
    let mut wrong = GrMat::new(3, 3, &ctx);
    assert_eq!(ctx.mat_mul(&mut wrong, &a, &b), Status::DOMAIN);
}

// =============================================================================
// Conversions between domains
// =============================================================================

#[test]
fn test_rational_reaches_every_field() {
    let half = BigRational::new(1.into(), 2.into());
    let src = GrCtx::fmpq();
    let x = src.elem_fmpq(&half).unwrap();
    for ctx in all_contexts() {
        let mut r = ctx.init();
        let status = ctx.set_other(&mut r, &x, &src);
        match ctx.which_ring() {
            RingTag::Fmpz => assert_eq!(status, Status::DOMAIN),
            RingTag::Nmod if ctx.is_field().is_false() => assert_eq!(status, Status::DOMAIN),
            _ => {
                assert!(status.is_success(), "{ctx}");
                let mut two = ctx.init();
                assert!(ctx.mul_si(&mut two, &r, 2).is_success());
                assert_ne!(ctx.is_one(&two), Truth::False, "{ctx}");
            }
        }
    }
}

#[test]
fn test_chain_of_conversions() {
    let z = GrCtx::fmpz();
    let q = GrCtx::fmpq();
    let real = GrCtx::real_ball(64);
    let complex = GrCtx::complex_ball(64);
    let x = z.elem_si(-12).unwrap();
    let mut xq = q.init();
    assert!(q.set_other(&mut xq, &x, &z).is_success());
    let mut xr = real.init();
    assert!(real.set_other(&mut xr, &xq, &q).is_success());
    let mut xc = complex.init();
    assert!(complex.set_other(&mut xc, &xr, &real).is_success());
    assert_eq!(complex.to_fmpz(&xc).unwrap(), BigInt::from(-12));
    let mut back = z.init();
    assert!(z.set_other(&mut back, &xc, &complex).is_success());
    assert!(z.equal(&back, &x).is_true());
}

// =============================================================================
// Failure reporting
// =============================================================================

#[test]
fn test_division_by_zero_is_domain_everywhere() {
    for ctx in all_contexts() {
        let one = ctx.elem_si(1).unwrap();
        let zero = ctx.init();
        assert_eq!(ctx.apply2(GrCtx::div, &one, &zero).err(), Some(GrError::Domain), "{ctx}");
    }
}

#[test]
fn test_order_on_unordered_domains() {
    for ctx in [
        GrCtx::nmod(5).unwrap(),
        GrCtx::padic(&BigInt::from(5), 4).unwrap(),
        GrCtx::complex_ball(64),
    ] {
        let a = ctx.elem_si(1).unwrap();
        assert_eq!(ctx.compare(&a, &a), Err(GrError::Domain), "{ctx}");
    }
    let ctx = GrCtx::fmpq();
    let a = ctx.elem_si(1).unwrap();
    let b = ctx.elem_si(2).unwrap();
    assert_eq!(ctx.compare(&a, &b), Ok(Ordering::Less));
}

#[test]
fn test_statuses_accumulate() {
    let ctx = GrCtx::fmpq();
    let two = ctx.elem_si(2).unwrap();
    let zero = ctx.init();
    let mut r = ctx.init();
    let mut status = ctx.sqrt(&mut r, &two);
    status |= ctx.pow_ui(&mut r, &two, u64::MAX);
    status |= ctx.inv(&mut r, &zero);
    assert!(status.has_domain() && status.has_unable());
    assert_eq!(status.check(), Err(GrError::DomainAndUnable));
}

#[test]
fn test_random_elements_cancel() {
    let mut state = RandState::new(11);
    for ctx in all_contexts() {
        for _ in 0..50 {
            let mut x = ctx.init();
            assert!(ctx.randtest(&mut x, &mut state).is_success(), "{ctx}");
            let mut d = ctx.init();
            assert!(ctx.sub(&mut d, &x, &x).is_success(), "{ctx}");
            assert_ne!(ctx.is_zero(&d), Truth::False, "{ctx}: {}", ctx.elem_to_string(&x));
            assert!(!ctx.elem_to_string(&x).is_empty());
        }
    }
}
