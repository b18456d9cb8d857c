use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};

use genpoly::{
    domains::{modular::Zn, rational::Q},
    error::PolynomialError,
    poly::{
        exponent::ExpVector,
        ring::GenPolynomialRing,
        term_order::{OrderKind, TermOrder},
    },
};

/// The Weyl algebra in `x1, x2` and their derivations `d1, d2`.
fn weyl() -> Arc<GenPolynomialRing<Q>> {
    let r = GenPolynomialRing::new_solvable(
        Q,
        4,
        TermOrder::new(OrderKind::GrLex),
        &["x1", "x2", "d1", "d2"],
    )
    .unwrap();

    for i in 0..2 {
        let x = r.univariate(i, 1);
        let d = r.univariate(i + 2, 1);
        let p = &(&x * &d) + &r.one();
        r.add_relation(i + 2, i, &p).unwrap();
    }
    r
}

#[test]
fn weyl_relation_scenario() {
    let r = GenPolynomialRing::<_, i64>::new_solvable(Q, 2, TermOrder::default(), &["x", "y"])
        .unwrap();
    let x = r.univariate(0, 1);
    let y = r.univariate(1, 1);
    r.add_relation(1, 0, &(&(&x * &y) - &r.one())).unwrap();

    assert!(r.is_solvable());
    assert_eq!(r.relation_table().unwrap().size(), 1);
    assert_eq!((&y * &x).to_string(), "x*y-1");
    assert_eq!((&x * &y).to_string(), "x*y");
    assert_ne!(&y * &x, &x * &y);
}

#[test]
fn derivations() {
    let r = weyl();
    let x1 = r.univariate(0, 1);
    let x2 = r.univariate(1, 1);
    let d1 = r.univariate(2, 1);
    let d2 = r.univariate(3, 1);

    assert_eq!((&d1 * &x1.pow(2).unwrap()).to_string(), "x1^2*d1+2*x1");
    assert_eq!((&d1 * &x2).to_string(), "x2*d1");
    assert_eq!((&d2 * &(&x1 * &x2)).to_string(), "x1*x2*d2+x1");

    // commutators
    assert!((&(&d1 * &x1) - &(&x1 * &d1)).is_one());
    assert!((&(&d1 * &x2) - &(&x2 * &d1)).is_zero());
    assert!((&(&d1 * &d2) - &(&d2 * &d1)).is_zero());
}

#[test]
fn products_are_associative() {
    let r = weyl();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..10 {
        let a = r.random(5, 3, 3, 0.5, &mut rng).unwrap();
        let b = r.random(5, 3, 3, 0.5, &mut rng).unwrap();
        let c = r.random(5, 3, 3, 0.5, &mut rng).unwrap();

        assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        assert_eq!(&(&a + &b) * &c, &(&a * &c) + &(&b * &c));
    }
}

#[test]
fn leading_terms_multiply() {
    let r = weyl();
    let mut rng = StdRng::seed_from_u64(13);

    for _ in 0..10 {
        let a = r.random(5, 3, 3, 0.5, &mut rng).unwrap();
        let b = r.random(5, 3, 3, 0.5, &mut rng).unwrap();
        if a.is_zero() || b.is_zero() {
            continue;
        }

        let p = &a * &b;
        let lead = a
            .leading_exp_vector()
            .unwrap()
            .sum(b.leading_exp_vector().unwrap())
            .unwrap();
        assert_eq!(p.leading_exp_vector(), Some(&lead));
    }
}

#[test]
fn solvable_division() {
    let r = weyl();
    let x1 = r.univariate(0, 1);
    let d1 = r.univariate(2, 1);

    // d1 * x1 = x1 * d1 + 1, reduced by d1 from the left
    let a = &d1 * &x1;
    let (q, rem) = a.quotient_remainder(&d1).unwrap();
    assert_eq!(&(&q * &d1) + &rem, a);
    assert_eq!(q, x1);
    assert!(rem.is_one());
}

#[test]
fn vanishing_leading_terms_stop_division() {
    let r = GenPolynomialRing::<_, i64>::new_solvable(
        Zn::new(8),
        2,
        TermOrder::new(OrderKind::GrLex),
        &["x", "y"],
    )
    .unwrap();
    let x = r.univariate(0, 1);
    let y = r.univariate(1, 1);
    r.add_relation(1, 0, &(&(&x * &y).scalar_multiply(&2) + &r.one()))
        .unwrap();

    // y^3 * x = 8 x y^3 + 7 y^2
    let y3 = y.pow(3).unwrap();
    assert_eq!(&y3 * &x, r.univariate(1, 2).scalar_multiply(&7));

    let a = &x * &y3;
    assert!(matches!(
        a.quotient_remainder(&x),
        Err(PolynomialError::NotInvertible(_))
    ));
    assert!(matches!(
        a.pseudo_quotient_remainder(&x),
        Err(PolynomialError::NotInvertible(_))
    ));
    assert!(matches!(
        a.divide_exact(&x),
        Err(PolynomialError::NotInvertible(_))
    ));

    let (q, rem) = a.quotient_remainder(&y).unwrap();
    assert_eq!(q, &x * &y.pow(2).unwrap());
    assert!(rem.is_zero());
}

#[test]
fn transformed_rings_keep_relations() {
    let r = GenPolynomialRing::<_, i64>::new_solvable(
        Q,
        2,
        TermOrder::new(OrderKind::GrLex),
        &["x", "y"],
    )
    .unwrap();
    r.add_relation(1, 0, &(&(&r.univariate(0, 1) * &r.univariate(1, 1)) - &r.one()))
        .unwrap();

    let e = r.extend(1).unwrap();
    assert_eq!(e.vars()[0].as_str(), "e1");
    assert_eq!(e.relation_table().unwrap().size(), 1);
    assert_eq!(
        (&e.univariate(2, 1) * &e.univariate(1, 1)).to_string(),
        "x*y-1"
    );

    // y * x = x*y - 1 is x * y = y*x + 1 with the variables reversed
    let rev = r.reverse(false).unwrap();
    assert_eq!(rev.vars()[0].as_str(), "y");
    assert_eq!(
        (&rev.univariate(1, 1) * &rev.univariate(0, 1)).to_string(),
        "y*x+1"
    );

    let c = r.contract(1).unwrap();
    assert_eq!(c.nvars(), 1);
    assert!(c.relation_table().unwrap().is_empty());

    assert!(matches!(
        r.recursive(1),
        Err(PolynomialError::InconsistentRelation(_))
    ));
    let rr = e.recursive(1).unwrap();
    assert_eq!(rr.coefficient_ring().relation_table().unwrap().size(), 1);
}

#[test]
fn first_matching_rule_wins() {
    let r = GenPolynomialRing::<_, i64>::new_solvable(
        Q,
        2,
        TermOrder::new(OrderKind::GrLex),
        &["x", "y"],
    )
    .unwrap();
    let t = r.relation_table().unwrap();
    let x = r.univariate(0, 1);
    let y = r.univariate(1, 1);

    let ex = ExpVector::new(&[1, 0]).unwrap();
    let ey = ExpVector::new(&[0, 1]).unwrap();
    let ey2 = ExpVector::new(&[0, 2]).unwrap();

    t.update(&r, &ey, &ex, &(&(&x * &y) - &r.one())).unwrap();
    t.update(&r, &ey2, &ex, &(&x * &y.pow(2).unwrap())).unwrap();
    assert_eq!(t.size(), 2);

    // y^2 * x is covered by both rules, the first one is used
    let rel = t.lookup(&r, &ey2, &ex).unwrap();
    assert_eq!(rel.e, ey);
    assert!(rel.f.is_zero());
    assert_eq!(rel.p.to_string(), "x*y-1");

    // replacing a rule keeps its position
    t.update(&r, &ey, &ex, &(&x * &y)).unwrap();
    assert_eq!(t.size(), 2);
    assert!((&y * &x - &x * &y).is_zero());

    assert!(matches!(
        t.update(&r, &ey, &ex, &x),
        Err(PolynomialError::InconsistentRelation(_))
    ));
    assert_eq!(t.size(), 2);
}
