use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use ahash::HashMap;

use crate::domains::{EuclideanDomain, InternalOrdering, Ring};
use crate::error::PolynomialError;
use crate::printer::PolynomialPrinter;

use super::exponent::ExpVector;
use super::ring::GenPolynomialRing;
use super::Exponent;

/// A sparse multivariate polynomial over the coefficient ring `C`.
///
/// The terms are stored in parallel vectors, sorted from the highest to the
/// lowest term under the term order of the ring. No zero coefficient is stored,
/// so the zero polynomial has no terms. Polynomials are values: every operation
/// returns a new polynomial.
#[derive(Clone)]
pub struct GenPolynomial<C: Ring, E: Exponent = i64> {
    pub(crate) coefficients: Vec<C::Element>,
    pub(crate) exponents: Vec<ExpVector<E>>,
    pub(crate) ring: Arc<GenPolynomialRing<C, E>>,
}

/// Accumulates terms in arbitrary order before they are frozen into a [GenPolynomial].
pub(crate) struct PolynomialBuilder<C: Ring, E: Exponent> {
    ring: Arc<GenPolynomialRing<C, E>>,
    terms: HashMap<ExpVector<E>, C::Element>,
}

impl<C: Ring, E: Exponent> PolynomialBuilder<C, E> {
    pub(crate) fn new(ring: &Arc<GenPolynomialRing<C, E>>) -> Self {
        PolynomialBuilder {
            ring: ring.clone(),
            terms: HashMap::default(),
        }
    }

    pub(crate) fn add_term(&mut self, exponent: ExpVector<E>, coefficient: C::Element) {
        if C::is_zero(&coefficient) {
            return;
        }

        match self.terms.entry(exponent) {
            Entry::Occupied(mut o) => {
                self.ring
                    .coefficient_ring()
                    .add_assign(o.get_mut(), &coefficient);
            }
            Entry::Vacant(v) => {
                v.insert(coefficient);
            }
        }
    }

    /// Drop the cancelled terms and sort the rest under the term order of the ring.
    pub(crate) fn freeze(self) -> GenPolynomial<C, E> {
        let mut terms: Vec<_> = self
            .terms
            .into_iter()
            .filter(|(_, c)| !C::is_zero(c))
            .collect();

        let order = self.ring.term_order();
        terms.sort_unstable_by(|a, b| order.descend(&a.0, &b.0));

        let (exponents, coefficients) = terms.into_iter().unzip();
        GenPolynomial {
            coefficients,
            exponents,
            ring: self.ring,
        }
    }
}

impl<C: Ring, E: Exponent> GenPolynomial<C, E> {
    /// Create a polynomial from terms that are already sorted and non-zero.
    #[inline]
    pub(crate) fn from_sorted(
        ring: &Arc<GenPolynomialRing<C, E>>,
        exponents: Vec<ExpVector<E>>,
        coefficients: Vec<C::Element>,
    ) -> Self {
        let p = GenPolynomial {
            coefficients,
            exponents,
            ring: ring.clone(),
        };

        #[cfg(debug_assertions)]
        p.check_consistency();

        p
    }

    /// Create a polynomial from a list of terms in any order. Equal exponents are merged.
    pub fn from_terms(
        ring: &Arc<GenPolynomialRing<C, E>>,
        terms: impl IntoIterator<Item = (ExpVector<E>, C::Element)>,
    ) -> Result<Self, PolynomialError> {
        let mut b = PolynomialBuilder::new(ring);
        for (e, c) in terms {
            ring.check_exponent(&e)?;
            b.add_term(e, c);
        }
        Ok(b.freeze())
    }

    /// Panics when the terms are not sorted or a coefficient is zero.
    pub fn check_consistency(&self) {
        assert_eq!(self.coefficients.len(), self.exponents.len());

        for c in &self.coefficients {
            if C::is_zero(c) {
                panic!("Inconsistent polynomial (0 coefficient): {:?}", self);
            }
        }

        for t in 1..self.nterms() {
            match self
                .ring
                .term_order()
                .compare(&self.exponents[t - 1], &self.exponents[t])
            {
                Ordering::Greater => {}
                Ordering::Equal => panic!("Inconsistent polynomial (equal monomials): {:?}", self),
                Ordering::Less => panic!("Inconsistent polynomial (wrong order): {:?}", self),
            }
        }
    }

    #[inline]
    pub fn ring(&self) -> &Arc<GenPolynomialRing<C, E>> {
        &self.ring
    }

    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.ring.nvars()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1
            && self.exponents[0].is_zero()
            && self.ring.coefficient_ring().is_one(&self.coefficients[0])
    }

    /// Returns `true` if the polynomial is constant. The zero polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        match self.nterms() {
            0 => true,
            1 => self.exponents[0].is_zero(),
            _ => false,
        }
    }

    pub fn is_unit(&self) -> bool {
        self.nterms() == 1
            && self.exponents[0].is_zero()
            && self.ring.coefficient_ring().is_unit(&self.coefficients[0])
    }

    /// Get the constant term of the polynomial.
    pub fn get_constant(&self) -> C::Element {
        match self.exponents.last() {
            Some(e) if e.is_zero() => self.coefficients[self.nterms() - 1].clone(),
            _ => self.ring.coefficient_ring().zero(),
        }
    }

    /// Get the coefficient of the term with exponent `e`, which is zero when the term is absent.
    pub fn coefficient(&self, e: &ExpVector<E>) -> C::Element {
        let order = self.ring.term_order();
        match self.exponents.binary_search_by(|x| order.descend(x, e)) {
            Ok(i) => self.coefficients[i].clone(),
            Err(_) => self.ring.coefficient_ring().zero(),
        }
    }

    #[inline]
    pub fn term(&self, i: usize) -> TermView<'_, C, E> {
        TermView {
            exponent: &self.exponents[i],
            coefficient: &self.coefficients[i],
        }
    }

    /// The highest term under the term order of the ring, or `None` for the zero polynomial.
    pub fn leading_monomial(&self) -> Option<TermView<'_, C, E>> {
        if self.is_zero() {
            None
        } else {
            Some(self.term(0))
        }
    }

    pub fn leading_exp_vector(&self) -> Option<&ExpVector<E>> {
        self.exponents.first()
    }

    /// The coefficient of the highest term, or zero for the zero polynomial.
    pub fn leading_base_coefficient(&self) -> C::Element {
        match self.coefficients.first() {
            Some(c) => c.clone(),
            None => self.ring.coefficient_ring().zero(),
        }
    }

    pub fn trailing_monomial(&self) -> Option<TermView<'_, C, E>> {
        if self.is_zero() {
            None
        } else {
            Some(self.term(self.nterms() - 1))
        }
    }

    pub fn trailing_exp_vector(&self) -> Option<&ExpVector<E>> {
        self.exponents.last()
    }

    pub fn trailing_base_coefficient(&self) -> C::Element {
        match self.coefficients.last() {
            Some(c) => c.clone(),
            None => self.ring.coefficient_ring().zero(),
        }
    }

    /// The polynomial without its leading term.
    pub fn reductum(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        GenPolynomial {
            coefficients: self.coefficients[1..].to_vec(),
            exponents: self.exponents[1..].to_vec(),
            ring: self.ring.clone(),
        }
    }

    /// The maximal exponent of the variable `i`. The zero polynomial has degree 0.
    pub fn degree_in(&self, i: usize) -> i64 {
        self.exponents
            .iter()
            .map(|e| e.get(i).to_i64())
            .max()
            .unwrap_or(0)
    }

    /// The maximal exponent of any variable.
    pub fn degree(&self) -> i64 {
        self.exponents
            .iter()
            .map(|e| e.max_deg())
            .max()
            .unwrap_or(0)
    }

    /// The componentwise maximum of all exponent vectors.
    pub fn degree_vector(&self) -> ExpVector<E> {
        self.exponents
            .iter()
            .fold(self.ring.zero_exponent().clone(), |acc, e| acc.lcm(e))
    }

    /// The maximal total degree of a term.
    pub fn total_degree(&self) -> i128 {
        self.exponents
            .iter()
            .map(|e| e.total_deg())
            .max()
            .unwrap_or(0)
    }

    /// Returns `true` if all terms have the same total degree.
    pub fn is_homogeneous(&self) -> bool {
        match self.exponents.first() {
            Some(e) => {
                let d = e.total_deg();
                self.exponents.iter().all(|x| x.total_deg() == d)
            }
            None => true,
        }
    }

    /// Merge two sorted term lists, where the coefficients of `other` are
    /// transformed by `map` first.
    fn merge(
        &self,
        other: &Self,
        map: impl Fn(&C::Element) -> C::Element,
    ) -> Result<Self, PolynomialError> {
        let field = self.ring.coefficient_ring();
        let order = self.ring.term_order();

        let mut new_coefficients = Vec::with_capacity(self.nterms() + other.nterms());
        let mut new_exponents = Vec::with_capacity(self.nterms() + other.nterms());
        let mut i = 0;
        let mut j = 0;

        macro_rules! insert_monomial {
            ($exp:expr, $coeff:expr) => {
                new_coefficients.push($coeff);
                new_exponents.push($exp.clone());
            };
        }

        while i < self.nterms() && j < other.nterms() {
            match order.compare(&self.exponents[i], &other.exponents[j]) {
                Ordering::Greater => {
                    insert_monomial!(self.exponents[i], self.coefficients[i].clone());
                    i += 1;
                }
                Ordering::Less => {
                    insert_monomial!(other.exponents[j], map(&other.coefficients[j]));
                    j += 1;
                }
                Ordering::Equal => {
                    let coeff = field.add(&self.coefficients[i], &map(&other.coefficients[j]));
                    if !C::is_zero(&coeff) {
                        insert_monomial!(self.exponents[i], coeff);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        while i < self.nterms() {
            insert_monomial!(self.exponents[i], self.coefficients[i].clone());
            i += 1;
        }

        while j < other.nterms() {
            insert_monomial!(other.exponents[j], map(&other.coefficients[j]));
            j += 1;
        }

        Ok(GenPolynomial {
            coefficients: new_coefficients,
            exponents: new_exponents,
            ring: self.ring.clone(),
        })
    }

    /// Add two polynomials of the same ring.
    pub fn sum(&self, other: &Self) -> Result<Self, PolynomialError> {
        self.ring.check_member(other)?;

        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        self.merge(other, |c| c.clone())
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, PolynomialError> {
        self.ring.check_member(other)?;

        if other.is_zero() {
            return Ok(self.clone());
        }

        let field = self.ring.coefficient_ring();
        self.merge(other, |c| field.neg(c))
    }

    pub fn negate(&self) -> Self {
        let field = self.ring.coefficient_ring();
        GenPolynomial {
            coefficients: self.coefficients.iter().map(|c| field.neg(c)).collect(),
            exponents: self.exponents.clone(),
            ring: self.ring.clone(),
        }
    }

    /// Add the term `c * x^e`.
    pub fn sum_term(&self, c: C::Element, e: ExpVector<E>) -> Result<Self, PolynomialError> {
        self.sum(&self.ring.value_of_term(c, e)?)
    }

    /// Multiply every coefficient by `c` from the left.
    pub fn scalar_multiply(&self, c: &C::Element) -> Self {
        let field = self.ring.coefficient_ring();
        if C::is_zero(c) {
            return self.ring.zero();
        }
        if field.is_one(c) {
            return self.clone();
        }

        let mut coefficients = Vec::with_capacity(self.nterms());
        let mut exponents = Vec::with_capacity(self.nterms());
        for t in self {
            // the coefficient ring may have zero divisors
            let m = field.mul(c, t.coefficient);
            if !C::is_zero(&m) {
                coefficients.push(m);
                exponents.push(t.exponent.clone());
            }
        }

        GenPolynomial {
            coefficients,
            exponents,
            ring: self.ring.clone(),
        }
    }

    /// Multiply two polynomials of the same ring. In a solvable ring, the relations
    /// of the ring are applied.
    pub fn multiply(&self, other: &Self) -> Result<Self, PolynomialError> {
        self.ring.multiply(self, other)
    }

    /// The commutative product: the pairwise convolution of the terms.
    pub(crate) fn multiply_commutative(&self, other: &Self) -> Result<Self, PolynomialError> {
        if self.is_zero() || other.is_zero() {
            return Ok(self.ring.zero());
        }

        if other.is_constant() {
            return Ok(self.scalar_multiply_right(&other.coefficients[0]));
        }

        if self.is_constant() {
            return Ok(other.scalar_multiply(&self.coefficients[0]));
        }

        let field = self.ring.coefficient_ring();
        let mut b = PolynomialBuilder::new(&self.ring);
        for t1 in self {
            for t2 in other {
                b.add_term(
                    t1.exponent.sum(t2.exponent)?,
                    field.mul(t1.coefficient, t2.coefficient),
                );
            }
        }

        Ok(b.freeze())
    }

    /// Multiply every coefficient by `c` from the right.
    pub(crate) fn scalar_multiply_right(&self, c: &C::Element) -> Self {
        let field = self.ring.coefficient_ring();
        let mut coefficients = Vec::with_capacity(self.nterms());
        let mut exponents = Vec::with_capacity(self.nterms());
        for t in self {
            let m = field.mul(t.coefficient, c);
            if !C::is_zero(&m) {
                coefficients.push(m);
                exponents.push(t.exponent.clone());
            }
        }

        GenPolynomial {
            coefficients,
            exponents,
            ring: self.ring.clone(),
        }
    }

    /// Multiply by the term `c * x^e` from the right.
    pub fn multiply_term(&self, c: C::Element, e: ExpVector<E>) -> Result<Self, PolynomialError> {
        let m = self.ring.value_of_term(c, e)?;
        self.ring.multiply(self, &m)
    }

    /// Compute `self^pow` by repeated squaring.
    pub fn pow(&self, mut pow: u64) -> Result<Self, PolynomialError> {
        if pow == 0 {
            return Ok(self.ring.one());
        }

        if self.is_constant() && !self.is_zero() {
            let field = self.ring.coefficient_ring();
            return Ok(self
                .ring
                .value_of(field.pow(&self.coefficients[0], pow)));
        }

        let mut x = self.clone();
        let mut y = self.ring.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = y.multiply(&x)?;
                pow -= 1;
            }

            x = x.multiply(&x)?;
            pow /= 2;
        }

        x.multiply(&y)
    }

    /// Take the derivative of the polynomial w.r.t the variable `var`.
    pub fn derivative(&self, var: usize) -> Result<Self, PolynomialError> {
        debug_assert!(var < self.nvars());

        let field = self.ring.coefficient_ring();
        let mut b = PolynomialBuilder::new(&self.ring);
        for t in self {
            let pow = t.exponent.get(var).to_i64();
            if pow != 0 {
                let e = t.exponent.set(var, pow - 1)?;
                b.add_term(e, field.mul(t.coefficient, &field.nth(pow)));
            }
        }

        Ok(b.freeze())
    }

    /// Divide by the leading coefficient. The zero polynomial is returned unchanged.
    pub fn monic(&self) -> Result<Self, PolynomialError> {
        if self.is_zero() {
            return Ok(self.clone());
        }

        let field = self.ring.coefficient_ring();
        let lc = &self.coefficients[0];
        if field.is_one(lc) {
            return Ok(self.clone());
        }

        let inv = field.inv(lc)?;
        Ok(self.scalar_multiply(&inv))
    }

    /// Substitute `v` for the variable `var`. The result lives in the same ring.
    pub fn evaluate(&self, var: usize, v: &C::Element) -> Result<Self, PolynomialError> {
        if var >= self.nvars() {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.nvars(),
                found: var + 1,
            });
        }

        let field = self.ring.coefficient_ring();
        let mut b = PolynomialBuilder::new(&self.ring);
        for t in self {
            let pow = t.exponent.get(var).to_i64();
            let c = if pow == 0 {
                t.coefficient.clone()
            } else {
                field.mul(t.coefficient, &power(field, v, pow)?)
            };
            b.add_term(t.exponent.set(var, 0)?, c);
        }

        Ok(b.freeze())
    }

    /// Substitute a value for every variable.
    pub fn evaluate_all(&self, values: &[C::Element]) -> Result<C::Element, PolynomialError> {
        if values.len() != self.nvars() {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.nvars(),
                found: values.len(),
            });
        }

        let field = self.ring.coefficient_ring();
        let mut res = field.zero();
        for t in self {
            let mut c = t.coefficient.clone();
            for (v, e) in values.iter().zip(t.exponent.iter()) {
                let e = e.to_i64();
                if e != 0 {
                    field.mul_assign(&mut c, &power(field, v, e)?);
                }
            }
            field.add_assign(&mut res, &c);
        }

        Ok(res)
    }

    /// Map the coefficients into the ring `ring`. Terms that map to zero are dropped.
    pub fn map_coefficients<D: Ring>(
        &self,
        ring: &Arc<GenPolynomialRing<D, E>>,
        f: impl Fn(&C::Element) -> D::Element,
    ) -> Result<GenPolynomial<D, E>, PolynomialError> {
        if ring.nvars() != self.nvars() {
            return Err(PolynomialError::DimensionMismatch {
                expected: ring.nvars(),
                found: self.nvars(),
            });
        }

        let mut b = PolynomialBuilder::new(ring);
        for t in self {
            b.add_term(t.exponent.clone(), f(t.coefficient));
        }
        Ok(b.freeze())
    }

    /// Print the polynomial with the variable names `vars` instead of the names of the ring.
    pub fn to_string_with<S: AsRef<str>>(&self, vars: &[S]) -> String {
        PolynomialPrinter::new_with_vars(self, vars).to_string()
    }
}

/// Compute `v^e`, inverting `v` for negative exponents.
fn power<C: Ring>(field: &C, v: &C::Element, e: i64) -> Result<C::Element, PolynomialError> {
    if e < 0 {
        Ok(field.pow(&field.inv(v)?, e.unsigned_abs()))
    } else {
        Ok(field.pow(v, e as u64))
    }
}

impl<C: EuclideanDomain, E: Exponent> GenPolynomial<C, E> {
    /// Get the content, i.e. the gcd of all coefficients.
    pub fn content(&self) -> C::Element {
        let field = self.ring.coefficient_ring();
        let mut c = field.zero();
        for cc in &self.coefficients {
            if field.is_one(&c) {
                break;
            }
            c = field.gcd(&c, cc);
        }
        c
    }

    /// Divide out the content. The leading coefficient of the result has a non-negative sign.
    pub fn primitive_part(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let field = self.ring.coefficient_ring();
        let mut c = self.content();
        if field.signum(&self.coefficients[0]) < 0 {
            c = field.neg(&c);
        }

        if field.is_one(&c) {
            return self.clone();
        }

        GenPolynomial {
            coefficients: self
                .coefficients
                .iter()
                .map(|x| field.quot_rem(x, &c).0)
                .collect(),
            exponents: self.exponents.clone(),
            ring: self.ring.clone(),
        }
    }
}

/// View object for a term in a polynomial.
pub struct TermView<'a, C: Ring, E: Exponent> {
    pub exponent: &'a ExpVector<E>,
    pub coefficient: &'a C::Element,
}

impl<'a, C: Ring, E: Exponent> Clone for TermView<'a, C, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C: Ring, E: Exponent> Copy for TermView<'a, C, E> {}

impl<'a, C: Ring, E: Exponent> std::fmt::Debug for TermView<'a, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ {:?}, {} }}", self.coefficient, self.exponent)
    }
}

/// Iterator over the terms of a polynomial, from the highest to the lowest term.
pub struct TermViewIterator<'a, C: Ring, E: Exponent> {
    poly: &'a GenPolynomial<C, E>,
    index: usize,
}

impl<'a, C: Ring, E: Exponent> Iterator for TermViewIterator<'a, C, E> {
    type Item = TermView<'a, C, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.poly.nterms() {
            None
        } else {
            let view = self.poly.term(self.index);
            self.index += 1;
            Some(view)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.poly.nterms() - self.index;
        (n, Some(n))
    }
}

impl<'a, C: Ring, E: Exponent> IntoIterator for &'a GenPolynomial<C, E> {
    type Item = TermView<'a, C, E>;
    type IntoIter = TermViewIterator<'a, C, E>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        TermViewIterator {
            poly: self,
            index: 0,
        }
    }
}

impl<C: Ring, E: Exponent> std::fmt::Debug for GenPolynomial<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for monomial in self {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", monomial)?;
        }
        write!(f, " ]")
    }
}

impl<C: Ring, E: Exponent> Display for GenPolynomial<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        PolynomialPrinter::new(self).fmt(f)
    }
}

impl<C: Ring, E: Exponent> PartialEq for GenPolynomial<C, E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.nvars() == other.nvars()
            && self.exponents == other.exponents
            && self.coefficients == other.coefficients
    }
}

impl<C: Ring, E: Exponent> Eq for GenPolynomial<C, E> {}

impl<C: Ring, E: Exponent> std::hash::Hash for GenPolynomial<C, E> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.exponents.hash(state);
        self.coefficients.hash(state);
    }
}

impl<C: Ring, E: Exponent> InternalOrdering for GenPolynomial<C, E> {
    /// Compare the terms from the highest down, the polynomial with the
    /// larger term at the first difference is the larger one.
    fn internal_cmp(&self, other: &Self) -> Ordering {
        let order = self.ring.term_order();
        for (t1, t2) in self.into_iter().zip(other) {
            match order
                .compare(t1.exponent, t2.exponent)
                .then_with(|| t1.coefficient.internal_cmp(t2.coefficient))
            {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        self.nterms().cmp(&other.nterms())
    }
}

impl<'a, 'b, C: Ring, E: Exponent> Add<&'a GenPolynomial<C, E>> for &'b GenPolynomial<C, E> {
    type Output = GenPolynomial<C, E>;

    /// Add two polynomials. Panics when the rings differ.
    fn add(self, other: &'a GenPolynomial<C, E>) -> Self::Output {
        self.sum(other)
            .unwrap_or_else(|e| panic!("Cannot add {} and {}: {}", self, other, e))
    }
}

impl<C: Ring, E: Exponent> Add for GenPolynomial<C, E> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        &self + &other
    }
}

impl<'a, 'b, C: Ring, E: Exponent> Sub<&'a GenPolynomial<C, E>> for &'b GenPolynomial<C, E> {
    type Output = GenPolynomial<C, E>;

    /// Subtract two polynomials. Panics when the rings differ.
    fn sub(self, other: &'a GenPolynomial<C, E>) -> Self::Output {
        self.subtract(other)
            .unwrap_or_else(|e| panic!("Cannot subtract {} from {}: {}", other, self, e))
    }
}

impl<C: Ring, E: Exponent> Sub for GenPolynomial<C, E> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        &self - &other
    }
}

impl<C: Ring, E: Exponent> Neg for GenPolynomial<C, E> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'a, C: Ring, E: Exponent> Neg for &'a GenPolynomial<C, E> {
    type Output = GenPolynomial<C, E>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'a, 'b, C: Ring, E: Exponent> Mul<&'a GenPolynomial<C, E>> for &'b GenPolynomial<C, E> {
    type Output = GenPolynomial<C, E>;

    /// Multiply two polynomials. Panics when the rings differ or an exponent overflows.
    fn mul(self, other: &'a GenPolynomial<C, E>) -> Self::Output {
        self.multiply(other)
            .unwrap_or_else(|e| panic!("Cannot multiply {} and {}: {}", self, other, e))
    }
}

impl<C: Ring, E: Exponent> Mul for GenPolynomial<C, E> {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        &self * &other
    }
}
