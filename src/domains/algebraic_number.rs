//! Algebraic extensions, e.g. the complex numbers `Q[i]/(i^2+1)`.

use std::fmt::{Display, Error, Formatter};
use std::sync::Arc;

use rand::Rng as _;

use crate::{
    error::PolynomialError,
    poly::{
        exponent::ExpVector,
        polynomial::GenPolynomial,
        ring::GenPolynomialRing,
        term_order::{OrderKind, TermOrder},
    },
};

use super::{integer::Integer, EuclideanDomain, Field, InternalOrdering, Ring};

/// The quotient of the univariate polynomial ring `R[x]` by a monic minimal polynomial.
/// Every element is represented by its remainder, i.e. a polynomial of degree
/// below the degree of the minimal polynomial.
///
/// # Examples
///
/// ```
/// use genpoly::domains::{algebraic_number::AlgebraicExtension, rational::Q, Ring};
///
/// let c = AlgebraicExtension::complex(Q);
/// let i = c.generator();
/// assert_eq!(c.mul(&i, &i), c.nth(-1));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AlgebraicExtension<R: Ring> {
    poly: Arc<GenPolynomial<R>>,
}

impl<R: Ring> AlgebraicExtension<R> {
    /// Create a new algebraic extension from a univariate polynomial. The polynomial
    /// is made monic, which requires its leading coefficient to be a unit.
    pub fn new(poly: GenPolynomial<R>) -> Result<AlgebraicExtension<R>, PolynomialError> {
        if poly.nvars() != 1 {
            return Err(PolynomialError::DimensionMismatch {
                expected: 1,
                found: poly.nvars(),
            });
        }

        if poly.degree() < 1 {
            return Err(PolynomialError::NotInvertible(format!(
                "constant minimal polynomial {}",
                poly
            )));
        }

        Ok(AlgebraicExtension {
            poly: Arc::new(poly.monic()?),
        })
    }

    /// The complex numbers over `ring`: the quotient by `i^2+1`.
    pub fn complex(ring: R) -> AlgebraicExtension<R> {
        let r = univariate_ring(ring, "i");
        let i2 = r.univariate(0, 2);
        AlgebraicExtension {
            poly: Arc::new(&i2 + &r.one()),
        }
    }

    /// Get the minimal polynomial.
    pub fn poly(&self) -> &GenPolynomial<R> {
        &self.poly
    }

    pub fn degree(&self) -> i64 {
        self.poly.degree()
    }

    pub fn base_ring(&self) -> &R {
        self.poly.ring().coefficient_ring()
    }

    pub fn constant(&self, c: R::Element) -> AlgebraicNumber<R> {
        AlgebraicNumber {
            poly: self.poly.ring().value_of(c),
        }
    }

    /// The root of the minimal polynomial, for example `i` in the complex numbers.
    pub fn generator(&self) -> AlgebraicNumber<R> {
        self.to_element(self.poly.ring().univariate(0, 1))
    }

    /// Reduce a polynomial in the variable of the minimal polynomial.
    pub fn to_element(&self, poly: GenPolynomial<R>) -> AlgebraicNumber<R> {
        if poly.degree() >= self.poly.degree() {
            AlgebraicNumber {
                poly: self.reduce(&poly),
            }
        } else {
            AlgebraicNumber { poly }
        }
    }

    /// The element `re + im * alpha` for the generator `alpha`.
    pub fn from_parts(&self, re: R::Element, im: R::Element) -> AlgebraicNumber<R> {
        let r = self.poly.ring();
        let p = &r.value_of(re) + &r.univariate(0, 1).scalar_multiply(&im);
        self.to_element(p)
    }

    fn reduce(&self, p: &GenPolynomial<R>) -> GenPolynomial<R> {
        // the minimal polynomial is monic, so only an exponent overflow can make this fail
        p.remainder(&self.poly)
            .unwrap_or_else(|e| panic!("Cannot reduce {} modulo {}: {}", p, self.poly, e))
    }
}

fn univariate_ring<R: Ring>(ring: R, var: &str) -> Arc<GenPolynomialRing<R>> {
    match GenPolynomialRing::new(ring, 1, TermOrder::new(OrderKind::Lex), &[var]) {
        Ok(r) => r,
        Err(e) => unreachable!("Univariate ring construction failed: {}", e),
    }
}

impl<R: Ring> std::fmt::Debug for AlgebraicExtension<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " % {:?}", self.poly)
    }
}

impl<R: Ring> std::fmt::Display for AlgebraicExtension<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]/({})", self.base_ring(), self.poly.ring().vars()[0], self.poly)
    }
}

/// A number in an algebraic extension.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AlgebraicNumber<R: Ring> {
    pub(crate) poly: GenPolynomial<R>,
}

impl<R: Ring> InternalOrdering for AlgebraicNumber<R> {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.poly.internal_cmp(&other.poly)
    }
}

impl<R: Ring> std::fmt::Debug for AlgebraicNumber<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.poly)
    }
}

impl<R: Ring> std::fmt::Display for AlgebraicNumber<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.poly)
    }
}

impl<R: Ring> AlgebraicNumber<R> {
    pub fn mul_coeff(&self, c: &R::Element) -> Self {
        AlgebraicNumber {
            poly: self.poly.scalar_multiply(c),
        }
    }

    /// The coefficient of `alpha^i`.
    pub fn coefficient(&self, i: i64) -> R::Element {
        match ExpVector::new(&[i]) {
            Ok(e) => self.poly.coefficient(&e),
            Err(_) => self.poly.ring().coefficient_ring().zero(),
        }
    }

    pub fn poly(&self) -> &GenPolynomial<R> {
        &self.poly
    }

    pub fn into_poly(self) -> GenPolynomial<R> {
        self.poly
    }
}

impl<R: Ring> Ring for AlgebraicExtension<R> {
    type Element = AlgebraicNumber<R>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        AlgebraicNumber {
            poly: &a.poly + &b.poly,
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        AlgebraicNumber {
            poly: &a.poly - &b.poly,
        }
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        AlgebraicNumber {
            poly: self.reduce(&(&a.poly * &b.poly)),
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        AlgebraicNumber {
            poly: a.poly.negate(),
        }
    }

    fn zero(&self) -> Self::Element {
        AlgebraicNumber {
            poly: self.poly.ring().zero(),
        }
    }

    fn one(&self) -> Self::Element {
        AlgebraicNumber {
            poly: self.poly.ring().one(),
        }
    }

    fn nth(&self, n: i64) -> Self::Element {
        AlgebraicNumber {
            poly: self.poly.ring().from_integer(n),
        }
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut x = b.clone();
        let mut result = self.one();
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(&result, &x);
            }
            e >>= 1;
            if e > 0 {
                x = self.mul(&x, &x);
            }
        }
        result
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.poly.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.poly.is_one()
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        self.inv(a).is_ok()
    }

    fn characteristic(&self) -> Integer {
        self.base_ring().characteristic()
    }

    /// Invert `a` with the extended gcd of `a` and the minimal polynomial.
    fn inv(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        if a.poly.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        let (g, s) = a.poly.hegcd(&self.poly)?;
        if !g.is_one() {
            return Err(PolynomialError::NotInvertible(format!(
                "{} shares the factor {} with {}",
                a, g, self.poly
            )));
        }

        Ok(self.to_element(s))
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        Some(self.mul(a, &self.inv(b).ok()?))
    }

    fn generators(&self) -> Vec<Self::Element> {
        vec![self.one(), self.generator()]
    }

    /// Sample an element with random coefficients.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = self.poly.ring();
        let mut p = r.zero();
        for i in 0..self.poly.degree() {
            if rng.gen_bool(0.9) {
                if let Ok(e) = ExpVector::new(&[i]) {
                    let c = self.base_ring().sample(rng, range);
                    if let Ok(t) = r.value_of_term(c, e) {
                        p = &p + &t;
                    }
                }
            }
        }

        AlgebraicNumber { poly: p }
    }

    fn fmt_display(&self, element: &Self::Element, f: &mut Formatter<'_>) -> Result<(), Error> {
        element.poly.fmt(f)
    }
}

impl<R: Field> EuclideanDomain for AlgebraicExtension<R> {
    fn rem(&self, _a: &Self::Element, _b: &Self::Element) -> Self::Element {
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if Self::is_zero(a) && Self::is_zero(b) {
            self.zero()
        } else {
            self.one()
        }
    }
}

/// An extension of a field by an irreducible minimal polynomial is a field.
impl<R: Field> Field for AlgebraicExtension<R> {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match self.inv(b) {
            Ok(inv) => self.mul(a, &inv),
            Err(e) => panic!("Cannot divide {} by {}: {}", a, b, e),
        }
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }
}
