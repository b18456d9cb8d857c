//! Division with remainder and univariate gcds.
use tracing::{instrument, trace};

use crate::domains::Ring;
use crate::error::PolynomialError;

use super::exponent::ExpVector;
use super::polynomial::GenPolynomial;
use super::Exponent;

/// In a solvable ring with zero divisors, the leading term of `x^d * div` may vanish.
/// Such a multiple cannot cancel the leading term `f` of the remainder.
fn check_reducer<C: Ring, E: Exponent>(
    f: &ExpVector<E>,
    d: &ExpVector<E>,
    div: &GenPolynomial<C, E>,
    t: &GenPolynomial<C, E>,
) -> Result<(), PolynomialError> {
    if t.leading_exp_vector() == Some(f) {
        Ok(())
    } else {
        Err(PolynomialError::NotInvertible(format!(
            "the leading term of x^{} * ({}) is not x^{}",
            d, div, f
        )))
    }
}

impl<C: Ring, E: Exponent> GenPolynomial<C, E> {
    fn check_global_order(&self) -> Result<(), PolynomialError> {
        if self.ring.term_order().is_global() {
            Ok(())
        } else {
            Err(PolynomialError::InvalidTermOrder(format!(
                "division requires a global term order, found {}",
                self.ring.term_order()
            )))
        }
    }

    fn check_univariate(&self) -> Result<(), PolynomialError> {
        if self.nvars() == 1 {
            Ok(())
        } else {
            Err(PolynomialError::DimensionMismatch {
                expected: 1,
                found: self.nvars(),
            })
        }
    }

    /// Divide by `div` as long as the leading term of the remainder is a multiple of the leading term of `div`.
    /// The result `(q, r)` satisfies `self = q * div + r`, where `q` multiplies `div` from the left.
    ///
    /// The leading coefficient of `div` must be a unit.
    #[instrument(level = "trace", skip_all)]
    pub fn quotient_remainder(&self, div: &Self) -> Result<(Self, Self), PolynomialError> {
        self.ring.check_member(div)?;
        if div.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        self.check_global_order()?;

        let field = self.ring.coefficient_ring();
        let one = field.one();
        let lead = &div.exponents[0];

        let not_invertible = |c: &C::Element| {
            PolynomialError::NotInvertible(format!(
                "leading coefficient {} of {}",
                field.printer(c),
                div
            ))
        };

        // in a commutative ring every multiple x^d * div has the leading coefficient of div
        let lc_inv = if self.ring.is_solvable() {
            None
        } else {
            Some(
                field
                    .inv(&div.coefficients[0])
                    .map_err(|_| not_invertible(&div.coefficients[0]))?,
            )
        };

        let mut q = self.ring.zero();
        let mut r = self.clone();

        while !r.is_zero() {
            let f = &r.exponents[0];
            if !f.multiple_of(lead) {
                break;
            }

            let d = f.subtract(lead)?;
            let t = self
                .ring
                .multiply(&self.ring.value_of_term(one.clone(), d.clone())?, div)?;
            check_reducer(f, &d, div, &t)?;

            let inv = match &lc_inv {
                Some(inv) => inv.clone(),
                None => field
                    .inv(&t.coefficients[0])
                    .map_err(|_| not_invertible(&t.coefficients[0]))?,
            };

            let c = field.mul(&r.coefficients[0], &inv);
            r = r.subtract(&t.scalar_multiply(&c))?;
            q = q.sum(&self.ring.value_of_term(c, d)?)?;
        }

        Ok((q, r))
    }

    /// The quotient of [Self::quotient_remainder].
    pub fn divide(&self, div: &Self) -> Result<Self, PolynomialError> {
        Ok(self.quotient_remainder(div)?.0)
    }

    /// The remainder of [Self::quotient_remainder].
    pub fn remainder(&self, div: &Self) -> Result<Self, PolynomialError> {
        Ok(self.quotient_remainder(div)?.1)
    }

    /// Divide by `div` using exact division of coefficients, so that the leading
    /// coefficient of `div` need not be a unit. Returns `None` when `div` does not divide `self`.
    pub fn divide_exact(&self, div: &Self) -> Result<Option<Self>, PolynomialError> {
        self.ring.check_member(div)?;
        if div.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        self.check_global_order()?;

        let field = self.ring.coefficient_ring();
        let lead = &div.exponents[0];

        let mut q = self.ring.zero();
        let mut r = self.clone();

        while !r.is_zero() {
            let f = &r.exponents[0];
            if !f.multiple_of(lead) {
                return Ok(None);
            }

            let d = f.subtract(lead)?;
            let t = self
                .ring
                .multiply(&self.ring.value_of_term(field.one(), d.clone())?, div)?;
            check_reducer(f, &d, div, &t)?;

            let Some(c) = field.try_div(&r.coefficients[0], &t.coefficients[0]) else {
                return Ok(None);
            };
            r = r.subtract(&t.scalar_multiply(&c))?;
            q = q.sum(&self.ring.value_of_term(c, d)?)?;
        }

        Ok(Some(q))
    }

    /// Pseudo-divide by `div`, which does not require the leading coefficient of `div` to be
    /// a unit. The result `(m, q, r)` satisfies `m * self = q * div + r`, where `m` is a
    /// power of the leading coefficient of `div`.
    pub fn pseudo_quotient_remainder(
        &self,
        div: &Self,
    ) -> Result<(C::Element, Self, Self), PolynomialError> {
        self.ring.check_member(div)?;
        if div.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        self.check_global_order()?;

        let field = self.ring.coefficient_ring();
        let lead = &div.exponents[0];

        let mut m = field.one();
        let mut q = self.ring.zero();
        let mut r = self.clone();

        while !r.is_zero() {
            let f = &r.exponents[0];
            if !f.multiple_of(lead) {
                break;
            }

            let d = f.subtract(lead)?;
            let t = self
                .ring
                .multiply(&self.ring.value_of_term(field.one(), d.clone())?, div)?;
            check_reducer(f, &d, div, &t)?;

            if let Some(c) = field.try_div(&r.coefficients[0], &t.coefficients[0]) {
                r = r.subtract(&t.scalar_multiply(&c))?;
                q = q.sum(&self.ring.value_of_term(c, d)?)?;
            } else {
                let c = r.coefficients[0].clone();
                r = r
                    .scalar_multiply(&t.coefficients[0])
                    .subtract(&t.scalar_multiply(&c))?;
                q = q
                    .scalar_multiply(&t.coefficients[0])
                    .sum(&self.ring.value_of_term(c, d)?)?;
                field.mul_assign(&mut m, &t.coefficients[0]);
            }
        }

        Ok((m, q, r))
    }

    /// The remainder of [Self::pseudo_quotient_remainder].
    pub fn pseudo_remainder(&self, div: &Self) -> Result<Self, PolynomialError> {
        Ok(self.pseudo_quotient_remainder(div)?.2)
    }

    /// Make the leading coefficient one if it is a unit, or positive otherwise.
    fn normalize_gcd(self) -> Result<Self, PolynomialError> {
        if self.is_zero() {
            return Ok(self);
        }

        let field = self.ring.coefficient_ring();
        if field.is_unit(&self.coefficients[0]) {
            self.monic()
        } else if field.signum(&self.coefficients[0]) < 0 {
            Ok(self.negate())
        } else {
            Ok(self)
        }
    }

    /// The greatest common divisor of two univariate polynomials, computed with a
    /// remainder sequence. Over a field the result is monic.
    #[instrument(level = "trace", skip_all)]
    pub fn gcd(&self, other: &Self) -> Result<Self, PolynomialError> {
        self.check_univariate()?;
        self.check_global_order()?;
        self.ring.check_member(other)?;

        let field = self.ring.coefficient_ring();
        let (mut r0, mut r1) = if self.degree() >= other.degree() {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };

        while !r1.is_zero() {
            let r = if field.is_unit(&r1.coefficients[0]) {
                r0.remainder(&r1)?
            } else {
                r0.pseudo_remainder(&r1)?
            };
            trace!("Remainder sequence degree {}", r.degree());

            r0 = r1;
            r1 = r;
        }

        r0.normalize_gcd()
    }

    /// The extended gcd of two univariate polynomials: `(g, s, t)` with `g = s * self + t * other`
    /// and `g` monic. All leading coefficients in the remainder sequence must be units.
    #[instrument(level = "trace", skip_all)]
    pub fn egcd(&self, other: &Self) -> Result<(Self, Self, Self), PolynomialError> {
        self.check_univariate()?;
        self.check_global_order()?;
        self.ring.check_member(other)?;

        let field = self.ring.coefficient_ring();

        if self.is_zero() {
            if other.is_zero() {
                return Ok((self.clone(), self.clone(), self.clone()));
            }

            let inv = field.inv(&other.coefficients[0])?;
            return Ok((
                other.scalar_multiply(&inv),
                self.ring.zero(),
                self.ring.value_of(inv),
            ));
        }

        let inv = field.inv(&self.coefficients[0])?;
        let mut r0 = self.scalar_multiply(&inv);
        let mut s0 = self.ring.value_of(inv);
        let mut t0 = self.ring.zero();

        if other.is_zero() {
            return Ok((r0, s0, t0));
        }

        let inv = field.inv(&other.coefficients[0])?;
        let mut r1 = other.scalar_multiply(&inv);
        let mut s1 = self.ring.zero();
        let mut t1 = self.ring.value_of(inv);

        loop {
            let (q, r) = r0.quotient_remainder(&r1)?;
            if r.is_zero() {
                return Ok((r1, s1, t1));
            }

            let a = field.inv(&r.coefficients[0])?;

            let s = s0.subtract(&q.multiply(&s1)?)?.scalar_multiply(&a);
            let t = t0.subtract(&q.multiply(&t1)?)?.scalar_multiply(&a);

            (r0, r1) = (r1, r.scalar_multiply(&a));
            (s0, s1) = (s1, s);
            (t0, t1) = (t1, t);
        }
    }

    /// The half extended gcd of two univariate polynomials: `(g, s)` with `g = s * self mod other`.
    pub fn hegcd(&self, other: &Self) -> Result<(Self, Self), PolynomialError> {
        self.check_univariate()?;
        self.check_global_order()?;
        self.ring.check_member(other)?;

        let field = self.ring.coefficient_ring();

        if self.is_zero() {
            if other.is_zero() {
                return Ok((self.clone(), self.clone()));
            }

            return Ok((other.monic()?, self.ring.zero()));
        }

        let inv = field.inv(&self.coefficients[0])?;
        let mut r0 = self.scalar_multiply(&inv);
        let mut s0 = self.ring.value_of(inv);

        if other.is_zero() {
            return Ok((r0, s0));
        }

        let mut r1 = other.monic()?;
        let mut s1 = self.ring.zero();

        loop {
            let (q, r) = r0.quotient_remainder(&r1)?;
            if r.is_zero() {
                return Ok((r1, s1));
            }

            let a = field.inv(&r.coefficients[0])?;
            let s = s0.subtract(&q.multiply(&s1)?)?.scalar_multiply(&a);

            (r0, r1) = (r1, r.scalar_multiply(&a));
            (s0, s1) = (s1, s);
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
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

    fn qx() -> Arc<GenPolynomialRing<Q>> {
        GenPolynomialRing::new(Q, 1, TermOrder::default(), &["x"]).unwrap()
    }

    fn parse(r: &Arc<GenPolynomialRing<Q>>, coeffs: &[i64]) -> GenPolynomial<Q> {
        // coefficients from the highest power down
        let n = coeffs.len() as i64;
        let mut p = r.zero();
        for (i, c) in coeffs.iter().enumerate() {
            p = p + r.univariate(0, n - 1 - i as i64).scalar_multiply(&Rational::from(*c));
        }
        p
    }

    #[test]
    fn exact_division() {
        let r = qx();
        let a = parse(&r, &[1, 0, -1]);
        let b = parse(&r, &[1, -1]);
        let (q, rem) = a.quotient_remainder(&b).unwrap();
        assert_eq!(q, parse(&r, &[1, 1]));
        assert!(rem.is_zero());
        assert_eq!(q.to_string(), "x+1");
    }

    #[test]
    fn division_identity() {
        let r = qx();
        let a = parse(&r, &[3, 0, 2, -5, 1]);
        let b = parse(&r, &[2, 0, 1]);
        let (q, rem) = a.quotient_remainder(&b).unwrap();
        assert_eq!(&(&q * &b) + &rem, a);
        assert!(rem.degree() < b.degree());
    }

    #[test]
    fn division_errors() {
        let r = qx();
        let a = parse(&r, &[1, 1]);
        assert_eq!(
            a.quotient_remainder(&r.zero()),
            Err(PolynomialError::DivisionByZero)
        );

        let local =
            GenPolynomialRing::<_, i64>::new(Q, 1, TermOrder::new(OrderKind::NegLex), &["x"])
                .unwrap();
        let x = local.univariate(0, 1);
        assert!(matches!(
            x.quotient_remainder(&x),
            Err(PolynomialError::InvalidTermOrder(_))
        ));

        let zx = GenPolynomialRing::<_, i64>::new(Z, 1, TermOrder::default(), &["x"]).unwrap();
        let two_x = zx.univariate(0, 1).scalar_multiply(&Z.nth(2));
        assert!(matches!(
            zx.univariate(0, 2).quotient_remainder(&two_x),
            Err(PolynomialError::NotInvertible(_))
        ));
    }

    #[test]
    fn pseudo_division() {
        let zx = GenPolynomialRing::<_, i64>::new(Z, 1, TermOrder::default(), &["x"]).unwrap();
        let x = zx.univariate(0, 1);
        let a = &x * &x + zx.one();
        let b = x.scalar_multiply(&Z.nth(2)) + zx.one();
        let (m, q, rem) = a.pseudo_quotient_remainder(&b).unwrap();
        assert_eq!(a.scalar_multiply(&m), &(&q * &b) + &rem);
        assert!(rem.is_constant());
    }

    #[test]
    fn exact_division_over_integers() {
        let zx = GenPolynomialRing::<_, i64>::new(Z, 1, TermOrder::default(), &["x"]).unwrap();
        let x = zx.univariate(0, 1);
        let two_x = x.scalar_multiply(&Z.nth(2));
        let a = &zx.univariate(0, 2).scalar_multiply(&Z.nth(2)) + &two_x;

        assert_eq!(a.divide_exact(&two_x), Ok(Some(&x + &zx.one())));
        assert_eq!(zx.univariate(0, 2).divide_exact(&two_x), Ok(None));
        assert_eq!((&zx.univariate(0, 2) + &zx.one()).divide_exact(&x), Ok(None));
        assert_eq!(a.divide_exact(&zx.zero()), Err(PolynomialError::DivisionByZero));
        assert_eq!(zx.zero().divide_exact(&two_x), Ok(Some(zx.zero())));
    }

    #[test]
    fn gcd() {
        let r = qx();
        let a = parse(&r, &[1, 0, -1]);
        let b = parse(&r, &[1, 2, 1]);
        assert_eq!(a.gcd(&b).unwrap(), parse(&r, &[1, 1]));
        assert_eq!(a.gcd(&r.zero()).unwrap(), a);
        assert_eq!(
            b.scalar_multiply(&Rational::from(3)).gcd(&r.zero()).unwrap(),
            b
        );

        let two = GenPolynomialRing::<_, i64>::new(Q, 2, TermOrder::default(), &["x", "y"])
            .unwrap();
        assert_eq!(
            two.one().gcd(&two.one()),
            Err(PolynomialError::DimensionMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn extended_gcd() {
        let r = qx();
        let a = parse(&r, &[1, 0, -1]);
        let b = parse(&r, &[1, 2, 1]);
        let (g, s, t) = a.egcd(&b).unwrap();
        assert_eq!(g, parse(&r, &[1, 1]));
        assert_eq!(&(&s * &a) + &(&t * &b), g);

        let c = parse(&r, &[1, 0, 1]);
        let d = parse(&r, &[1, -1]);
        let (g, s, t) = c.egcd(&d).unwrap();
        assert!(g.is_one());
        assert_eq!(&(&s * &c) + &(&t * &d), g);

        let (g2, s2) = c.hegcd(&d).unwrap();
        assert_eq!(g2, g);
        assert_eq!(s2, s);
    }
}
