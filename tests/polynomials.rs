use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};

use genpoly::{
    domains::{
        algebraic_number::AlgebraicExtension,
        integer::Z,
        rational::{Rational, Q},
        Ring,
    },
    error::PolynomialError,
    poly::{
        polynomial::GenPolynomial,
        ring::GenPolynomialRing,
        term_order::{OrderKind, TermOrder},
    },
};

fn ring_xyz() -> Arc<GenPolynomialRing<Q>> {
    GenPolynomialRing::new(Q, 3, TermOrder::default(), &["x", "y", "z"]).unwrap()
}

fn ring_x() -> Arc<GenPolynomialRing<Q>> {
    GenPolynomialRing::new(Q, 1, TermOrder::new(OrderKind::Lex), &["x"]).unwrap()
}

#[test]
fn ring_laws() {
    let r = ring_xyz();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let a = r.random(10, 5, 4, 0.6, &mut rng).unwrap();
        let b = r.random(10, 5, 4, 0.6, &mut rng).unwrap();
        let c = r.random(10, 5, 4, 0.6, &mut rng).unwrap();

        assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&a + &r.zero(), a);
        assert!((&a - &a).is_zero());
        assert_eq!(&a - &b, &a + &(-&b));

        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        assert_eq!(&a * &r.one(), a);
        assert!((&a * &r.zero()).is_zero());

        assert_eq!(a.pow(3).unwrap(), &(&a * &a) * &a);
        assert!(a.pow(0).unwrap().is_one());
    }
}

#[test]
fn degrees_of_products() {
    let r = ring_xyz();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..20 {
        let a = r.random(10, 4, 4, 0.7, &mut rng).unwrap();
        let b = r.random(10, 4, 4, 0.7, &mut rng).unwrap();
        if a.is_zero() || b.is_zero() {
            continue;
        }

        let p = &a * &b;
        assert_eq!(p.total_degree(), a.total_degree() + b.total_degree());
        for v in 0..3 {
            assert_eq!(p.degree_in(v), a.degree_in(v) + b.degree_in(v));
        }
        assert_eq!(
            p.leading_exp_vector().unwrap(),
            &a.leading_exp_vector()
                .unwrap()
                .sum(b.leading_exp_vector().unwrap())
                .unwrap()
        );
    }
}

#[test]
fn evaluation_is_a_homomorphism() {
    let r = ring_xyz();
    let mut rng = StdRng::seed_from_u64(3);
    let point = [Rational::from(2), Rational::from_i64(-1, 3), Rational::from(5)];

    for _ in 0..10 {
        let a = r.random(10, 5, 3, 0.6, &mut rng).unwrap();
        let b = r.random(10, 5, 3, 0.6, &mut rng).unwrap();

        let va = a.evaluate_all(&point).unwrap();
        let vb = b.evaluate_all(&point).unwrap();
        assert_eq!((&a * &b).evaluate_all(&point).unwrap(), Q.mul(&va, &vb));
        assert_eq!((&a + &b).evaluate_all(&point).unwrap(), Q.add(&va, &vb));
    }
}

#[test]
fn division_scenario() {
    let r = ring_x();
    let x = r.univariate(0, 1);
    let a = &x.pow(2).unwrap() - &r.one();
    let b = &x - &r.one();

    let (q, rem) = a.quotient_remainder(&b).unwrap();
    assert_eq!(q.to_string(), "x+1");
    assert!(rem.is_zero());
    assert_eq!(a.divide(&b).unwrap(), q);

    assert!(matches!(
        a.quotient_remainder(&r.zero()),
        Err(PolynomialError::DivisionByZero)
    ));
}

#[test]
fn division_identity() {
    let r = ring_x();
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..30 {
        let a = r.random(20, 6, 8, 0.8, &mut rng).unwrap();
        let b = r.random(20, 3, 4, 0.8, &mut rng).unwrap();
        if b.is_zero() {
            continue;
        }

        let (q, rem) = a.quotient_remainder(&b).unwrap();
        assert_eq!(&(&q * &b) + &rem, a);
        assert!(rem.is_zero() || rem.degree() < b.degree());
    }
}

#[test]
fn multivariate_top_reduction() {
    let r = ring_xyz();
    let x = r.univariate(0, 1);
    let y = r.univariate(1, 1);
    let z = r.univariate(2, 1);

    // x^2*y + z divided by x*y
    let a = &(&x.pow(2).unwrap() * &y) + &z;
    let b = &x * &y;
    let (q, rem) = a.quotient_remainder(&b).unwrap();
    assert_eq!(q, x);
    assert_eq!(rem, z);
}

#[test]
fn pseudo_division_over_integers() {
    let r = GenPolynomialRing::<_, i64>::new(Z, 1, TermOrder::default(), &["x"]).unwrap();
    let x = r.univariate(0, 1);
    let a = &x.pow(3).unwrap() + &r.from_integer(1);
    let b = &x.scalar_multiply(&Z.nth(2)) + &r.from_integer(1);

    assert!(matches!(
        a.quotient_remainder(&b),
        Err(PolynomialError::NotInvertible(_))
    ));

    let (m, q, rem) = a.pseudo_quotient_remainder(&b).unwrap();
    assert_eq!(a.scalar_multiply(&m), &(&q * &b) + &rem);
    assert!(rem.degree() < b.degree());
}

#[test]
fn gcd_contains_common_factor() {
    let r = ring_x();
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..20 {
        let a = r.random(10, 4, 5, 0.8, &mut rng).unwrap();
        let b = r.random(10, 4, 5, 0.8, &mut rng).unwrap();
        let c = r.random(10, 3, 3, 0.8, &mut rng).unwrap();
        if a.is_zero() || b.is_zero() || c.is_zero() {
            continue;
        }

        let g = (&a * &c).gcd(&(&b * &c)).unwrap();
        assert!(Q.is_one(&g.leading_base_coefficient()));
        assert!(g.remainder(&c).unwrap().is_zero());
        assert!((&a * &c).remainder(&g).unwrap().is_zero());
        assert!((&b * &c).remainder(&g).unwrap().is_zero());
    }
}

#[test]
fn gcd_scenario() {
    let r = ring_x();
    let x = r.univariate(0, 1);
    let a = &(&x - &r.one()) * &(&x + &r.from_integer(2));
    let b = (&x - &r.one()).scalar_multiply(&Rational::from(3)) * (&x - &r.from_integer(3));

    assert_eq!(a.gcd(&b).unwrap().to_string(), "x-1");
    assert!(a.gcd(&r.zero()).unwrap() == a.monic().unwrap());

    let y = GenPolynomialRing::<_, i64>::new(Q, 2, TermOrder::default(), &["x", "y"]).unwrap();
    assert!(matches!(
        y.one().gcd(&y.one()),
        Err(PolynomialError::DimensionMismatch { expected: 1, .. })
    ));
}

#[test]
fn extended_gcd_identity() {
    let r = ring_x();
    let mut rng = StdRng::seed_from_u64(29);

    for _ in 0..20 {
        let a = r.random(10, 4, 6, 0.8, &mut rng).unwrap();
        let b = r.random(10, 4, 6, 0.8, &mut rng).unwrap();
        if a.is_zero() || b.is_zero() {
            continue;
        }

        let (g, s, t) = a.egcd(&b).unwrap();
        assert_eq!(&(&s * &a) + &(&t * &b), g);
        assert_eq!(g, a.gcd(&b).unwrap());

        let (h, s2) = a.hegcd(&b).unwrap();
        assert_eq!(h, g);
        assert!((&(&s2 * &a) - &h).remainder(&b).unwrap().is_zero());
    }
}

#[test]
fn recursive_representation() {
    let r = ring_xyz();
    let mut rng = StdRng::seed_from_u64(31);

    for i in 1..3 {
        let rr = r.recursive(i).unwrap();
        assert_eq!(rr.nvars(), i);
        assert_eq!(rr.coefficient_ring().nvars(), 3 - i);

        for _ in 0..10 {
            let p = r.random(10, 6, 4, 0.6, &mut rng).unwrap();
            let rec = p.to_recursive(&rr).unwrap();
            assert_eq!(GenPolynomial::from_recursive(&r, &rec).unwrap(), p);
        }
    }
}

#[test]
fn complex_numbers() {
    let c = AlgebraicExtension::complex(Q);
    assert_eq!(c.to_string(), "Q[i]/(i^2+1)");

    for a in -3i64..4 {
        for b in -3i64..4 {
            let z = c.from_parts(Rational::from(a), Rational::from(b));
            let conj = c.from_parts(Rational::from(a), Rational::from(-b));
            assert_eq!(c.mul(&z, &conj), c.constant(Rational::from(a * a + b * b)));

            if a != 0 || b != 0 {
                let inv = c.inv(&z).unwrap();
                assert!(c.is_one(&c.mul(&z, &inv)));
            } else {
                assert!(c.inv(&z).is_err());
            }
        }
    }

    let i = c.generator();
    assert_eq!(c.pow(&i, 2), c.nth(-1));
}

#[test]
fn polynomials_over_polynomials() {
    let inner = GenPolynomialRing::<_, i64>::new(Q, 1, TermOrder::default(), &["y"]).unwrap();
    let outer = GenPolynomialRing::<_, i64>::new(inner.clone(), 1, TermOrder::default(), &["x"])
        .unwrap();

    let y = inner.univariate(0, 1);
    let x = outer.univariate(0, 1);
    let p = &x.scalar_multiply(&y) + &outer.value_of(inner.one());
    let sq = &p * &p;

    assert_eq!(sq.to_string(), "y^2*x^2+2*y*x+1");
    assert_eq!(sq.leading_base_coefficient(), &y * &y);
}

#[test]
fn polynomials_of_different_rings_are_rejected() {
    let lex = GenPolynomialRing::<_, i64>::new(Q, 2, TermOrder::new(OrderKind::Lex), &["x", "y"])
        .unwrap();
    let grevlex = GenPolynomialRing::<_, i64>::new(Q, 2, TermOrder::default(), &["x", "y"])
        .unwrap();
    let a = &lex.univariate(0, 1) + &lex.univariate(1, 2);
    let b = &grevlex.univariate(0, 1) + &grevlex.univariate(1, 2);

    assert!(matches!(a.sum(&b), Err(PolynomialError::IncompatibleRings(_))));
    assert!(matches!(a.subtract(&b), Err(PolynomialError::IncompatibleRings(_))));
    assert!(matches!(a.multiply(&b), Err(PolynomialError::IncompatibleRings(_))));
    assert!(matches!(
        a.quotient_remainder(&b),
        Err(PolynomialError::IncompatibleRings(_))
    ));

    let c = ring_xyz().univariate(2, 1);
    assert_eq!(
        a.sum(&c),
        Err(PolynomialError::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );

    // separately built rings with the same description are the same ring
    let p = ring_xyz().univariate(0, 1);
    let q = ring_xyz().univariate(1, 1);
    assert_eq!(p.sum(&q).unwrap().nterms(), 2);
    assert_eq!(p.multiply(&q).unwrap().total_degree(), 2);
}

#[test]
#[should_panic(expected = "Cannot add")]
fn adding_polynomials_of_different_rings_panics() {
    let lex = GenPolynomialRing::<_, i64>::new(Q, 1, TermOrder::new(OrderKind::Lex), &["x"])
        .unwrap();
    let renamed = GenPolynomialRing::<_, i64>::new(Q, 1, TermOrder::new(OrderKind::Lex), &["t"])
        .unwrap();
    let _ = &lex.univariate(0, 1) + &renamed.univariate(0, 1);
}

#[test]
fn partially_reversed_polynomials() {
    let t = TermOrder::block(OrderKind::Lex, OrderKind::GRevLex, 2, 3).unwrap();
    let r = GenPolynomialRing::<_, i64>::new(Q, 3, t, &["x", "y", "z"]).unwrap();
    let rev = r.reverse(true).unwrap();
    let vars: Vec<&str> = rev.vars().iter().map(|v| v.as_str()).collect();
    assert_eq!(vars, ["y", "x", "z"]);
    assert!(*rev.reverse(true).unwrap() == *r);

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10 {
        let p = r.random(10, 6, 4, 0.6, &mut rng).unwrap();
        let q = GenPolynomial::from_terms(
            &rev,
            p.into_iter()
                .map(|t| (t.exponent.reverse_part(2), t.coefficient.clone())),
        )
        .unwrap();
        q.check_consistency();
        assert_eq!(q.nterms(), p.nterms());
        assert_eq!(
            q.leading_exp_vector().cloned(),
            p.leading_exp_vector().map(|e| e.reverse_part(2))
        );

        let back = rev.reverse(true).unwrap();
        let p2 = GenPolynomial::from_terms(
            &back,
            q.into_iter()
                .map(|t| (t.exponent.reverse_part(2), t.coefficient.clone())),
        )
        .unwrap();
        assert_eq!(p2, p);
        assert_eq!(p2.to_string(), p.to_string());
    }
}

#[test]
fn narrow_exponents() {
    let vars = ["x", "y", "z"];
    let r64 = GenPolynomialRing::<_, i64>::new(Q, 3, TermOrder::default(), &vars).unwrap();
    let r16 = GenPolynomialRing::<_, i16>::new(Q, 3, TermOrder::default(), &vars).unwrap();
    let narrow = |p: &GenPolynomial<Q>| {
        GenPolynomial::from_terms(
            &r16,
            p.into_iter()
                .map(|t| (t.exponent.narrow::<i16>().unwrap(), t.coefficient.clone())),
        )
        .unwrap()
    };

    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..10 {
        let a = r64.random(10, 5, 4, 0.6, &mut rng).unwrap();
        let b = r64.random(10, 5, 4, 0.6, &mut rng).unwrap();
        let (a16, b16) = (narrow(&a), narrow(&b));

        assert_eq!((&a16 + &b16).to_string(), (&a + &b).to_string());
        assert_eq!((&a16 - &b16).to_string(), (&a - &b).to_string());
        assert_eq!((&a16 * &b16).to_string(), (&a * &b).to_string());
        assert_eq!(&a16 * &b16, &b16 * &a16);
        assert_eq!(a16.total_degree(), a.total_degree());
    }

    let x = r16.univariate(0, 1);
    let big = r16.univariate(0, i16::MAX);
    assert!(matches!(
        x.multiply(&big),
        Err(PolynomialError::ExponentOverflow { .. })
    ));
    assert!(matches!(
        r16.univariate(1, 200).pow(200),
        Err(PolynomialError::ExponentOverflow { .. })
    ));
}
