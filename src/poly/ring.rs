use std::fmt::{Display, Error, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::Rng as _;
use smartstring::{LazyCompact, SmartString};
use tracing::debug;

use crate::domains::integer::Integer;
use crate::domains::Ring;
use crate::error::PolynomialError;

use super::exponent::ExpVector;
use super::polynomial::{GenPolynomial, PolynomialBuilder};
use super::solvable::RelationTable;
use super::term_order::TermOrder;
use super::Exponent;

/// A polynomial ring over the coefficient ring `C`, with named variables and a term order.
///
/// The ring is shared by all its polynomials through an [Arc]. In a solvable ring,
/// the ring also owns the [RelationTable] that defines the product of variables.
pub struct GenPolynomialRing<C: Ring, E: Exponent = i64> {
    coefficient_ring: C,
    nvars: usize,
    order: TermOrder,
    vars: Vec<SmartString<LazyCompact>>,
    zero_exponent: ExpVector<E>,
    one_coefficient: C::Element,
    table: Option<Arc<RelationTable<C, E>>>,
}

/// The ring of polynomials in the first variables with coefficients in the
/// polynomial ring of the remaining ones.
pub type RecursiveRing<C, E> = GenPolynomialRing<Arc<GenPolynomialRing<C, E>>, E>;

impl<C: Ring, E: Exponent> GenPolynomialRing<C, E> {
    /// Create a commutative polynomial ring with the variables `vars`.
    pub fn new<S: AsRef<str>>(
        coefficient_ring: C,
        nvars: usize,
        order: TermOrder,
        vars: &[S],
    ) -> Result<Arc<Self>, PolynomialError> {
        Ok(Arc::new(Self::build(coefficient_ring, nvars, order, vars, None)?))
    }

    /// Create a commutative polynomial ring with the variables `x0, x1, ...`.
    pub fn with_default_vars(
        coefficient_ring: C,
        nvars: usize,
        order: TermOrder,
    ) -> Result<Arc<Self>, PolynomialError> {
        let vars: Vec<_> = (0..nvars).map(|i| format!("x{}", i)).collect();
        Self::new(coefficient_ring, nvars, order, &vars)
    }

    /// Create a solvable polynomial ring with an empty relation table. Rules are
    /// added with [Self::add_relation].
    pub fn new_solvable<S: AsRef<str>>(
        coefficient_ring: C,
        nvars: usize,
        order: TermOrder,
        vars: &[S],
    ) -> Result<Arc<Self>, PolynomialError> {
        Ok(Arc::new(Self::build(
            coefficient_ring,
            nvars,
            order,
            vars,
            Some(Arc::new(RelationTable::new())),
        )?))
    }

    fn build<S: AsRef<str>>(
        coefficient_ring: C,
        nvars: usize,
        order: TermOrder,
        vars: &[S],
        table: Option<Arc<RelationTable<C, E>>>,
    ) -> Result<Self, PolynomialError> {
        if vars.len() != nvars {
            return Err(PolynomialError::DimensionMismatch {
                expected: nvars,
                found: vars.len(),
            });
        }

        let order = match order {
            TermOrder::Block { nvars: n, .. } if n != nvars => {
                return Err(PolynomialError::DimensionMismatch {
                    expected: nvars,
                    found: n,
                });
            }
            TermOrder::Weighted { weights, tie_break } => {
                if let Some(row) = weights.iter().find(|row| row.len() > nvars) {
                    return Err(PolynomialError::DimensionMismatch {
                        expected: nvars,
                        found: row.len(),
                    });
                }

                // missing weights are zero
                TermOrder::Weighted {
                    weights: weights
                        .into_iter()
                        .map(|mut row| {
                            row.resize(nvars, 0);
                            row
                        })
                        .collect(),
                    tie_break,
                }
            }
            order => order,
        };

        Ok(GenPolynomialRing {
            one_coefficient: coefficient_ring.one(),
            coefficient_ring,
            nvars,
            order,
            vars: vars.iter().map(|v| v.as_ref().into()).collect(),
            zero_exponent: ExpVector::zero(nvars),
            table,
        })
    }

    /// A ring with the same structure as `self` but with a new relation table.
    fn with_table(&self, table: Option<Arc<RelationTable<C, E>>>) -> Self {
        GenPolynomialRing {
            coefficient_ring: self.coefficient_ring.clone(),
            nvars: self.nvars,
            order: self.order.clone(),
            vars: self.vars.clone(),
            zero_exponent: self.zero_exponent.clone(),
            one_coefficient: self.one_coefficient.clone(),
            table,
        }
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    #[inline]
    pub fn term_order(&self) -> &TermOrder {
        &self.order
    }

    #[inline]
    pub fn vars(&self) -> &[SmartString<LazyCompact>] {
        &self.vars
    }

    #[inline]
    pub fn coefficient_ring(&self) -> &C {
        &self.coefficient_ring
    }

    #[inline]
    pub fn zero_exponent(&self) -> &ExpVector<E> {
        &self.zero_exponent
    }

    #[inline]
    pub fn is_solvable(&self) -> bool {
        self.table.is_some()
    }

    pub fn relation_table(&self) -> Option<&Arc<RelationTable<C, E>>> {
        self.table.as_ref()
    }

    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|v| v == name)
    }

    pub(crate) fn check_exponent(&self, e: &ExpVector<E>) -> Result<(), PolynomialError> {
        if e.len() != self.nvars {
            Err(PolynomialError::DimensionMismatch {
                expected: self.nvars,
                found: e.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Check that `p` is a polynomial of this ring.
    pub(crate) fn check_member(
        self: &Arc<Self>,
        p: &GenPolynomial<C, E>,
    ) -> Result<(), PolynomialError> {
        let other = p.ring();
        if Arc::ptr_eq(self, other) || **self == **other {
            return Ok(());
        }

        if self.nvars != other.nvars {
            Err(PolynomialError::DimensionMismatch {
                expected: self.nvars,
                found: other.nvars,
            })
        } else {
            Err(PolynomialError::IncompatibleRings(format!(
                "{} is not a polynomial of {}",
                p, self
            )))
        }
    }

    /// Returns `true` if polynomials of both rings can be combined.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.nvars == other.nvars && self.coefficient_ring == other.coefficient_ring
    }

    pub fn zero(self: &Arc<Self>) -> GenPolynomial<C, E> {
        GenPolynomial::from_sorted(self, vec![], vec![])
    }

    pub fn one(self: &Arc<Self>) -> GenPolynomial<C, E> {
        self.value_of(self.one_coefficient.clone())
    }

    /// The constant polynomial `c`.
    pub fn value_of(self: &Arc<Self>, c: C::Element) -> GenPolynomial<C, E> {
        if C::is_zero(&c) {
            self.zero()
        } else {
            GenPolynomial::from_sorted(self, vec![self.zero_exponent.clone()], vec![c])
        }
    }

    /// The term `c * x^e`.
    pub fn value_of_term(
        self: &Arc<Self>,
        c: C::Element,
        e: ExpVector<E>,
    ) -> Result<GenPolynomial<C, E>, PolynomialError> {
        self.check_exponent(&e)?;

        if C::is_zero(&c) {
            Ok(self.zero())
        } else {
            Ok(GenPolynomial::from_sorted(self, vec![e], vec![c]))
        }
    }

    /// The constant polynomial `n`.
    pub fn from_integer(self: &Arc<Self>, n: i64) -> GenPolynomial<C, E> {
        self.value_of(self.coefficient_ring.nth(n))
    }

    /// The polynomial `x_i^e`.
    pub fn univariate(self: &Arc<Self>, i: usize, e: E) -> GenPolynomial<C, E> {
        GenPolynomial::from_sorted(
            self,
            vec![ExpVector::univariate(self.nvars, i, e)],
            vec![self.one_coefficient.clone()],
        )
    }

    /// The variables `x_0, ..., x_{n-1}` as polynomials.
    pub fn univariate_list(self: &Arc<Self>) -> Vec<GenPolynomial<C, E>> {
        match E::from_i64(1) {
            Some(one) => (0..self.nvars).map(|i| self.univariate(i, one)).collect(),
            None => vec![],
        }
    }

    /// The generators of the ring: the generators of the coefficient ring followed by the variables.
    pub fn generators(self: &Arc<Self>) -> Vec<GenPolynomial<C, E>> {
        let mut gens: Vec<_> = self
            .coefficient_ring
            .generators()
            .into_iter()
            .map(|c| self.value_of(c))
            .collect();
        gens.extend(self.univariate_list());
        gens
    }

    /// Multiply two polynomials of this ring, using the relation table of a solvable ring.
    pub fn multiply(
        self: &Arc<Self>,
        a: &GenPolynomial<C, E>,
        b: &GenPolynomial<C, E>,
    ) -> Result<GenPolynomial<C, E>, PolynomialError> {
        self.check_member(a)?;
        self.check_member(b)?;

        match &self.table {
            Some(t) if !t.is_empty() => self.multiply_solvable(t, a, b),
            _ => a.multiply_commutative(b),
        }
    }

    /// A ring with the same structure but with other variable names.
    pub fn with_vars<S: AsRef<str>>(
        self: &Arc<Self>,
        vars: &[S],
    ) -> Result<Arc<Self>, PolynomialError> {
        if vars.len() != self.nvars {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.nvars,
                found: vars.len(),
            });
        }

        let mut r = self.with_table(self.table.clone());
        r.vars = vars.iter().map(|v| v.as_ref().into()).collect();
        Ok(Arc::new(r))
    }

    /// The ring with `k` new leading variables named `e1, ..., ek`.
    pub fn extend(self: &Arc<Self>, k: usize) -> Result<Arc<Self>, PolynomialError> {
        let names: Vec<_> = (1..=k).map(|i| format!("e{}", i)).collect();
        self.extend_vars(&names)
    }

    /// The ring with new leading variables `names`. The new variables form the
    /// first block of an elimination order and the relations are shifted accordingly.
    pub fn extend_vars<S: AsRef<str>>(
        self: &Arc<Self>,
        names: &[S],
    ) -> Result<Arc<Self>, PolynomialError> {
        let k = names.len();
        let mut vars: Vec<SmartString<LazyCompact>> =
            names.iter().map(|v| v.as_ref().into()).collect();
        vars.extend(self.vars.iter().cloned());

        let ring = Arc::new(Self::build(
            self.coefficient_ring.clone(),
            self.nvars + k,
            self.order.extend(self.nvars, k),
            &vars,
            None,
        )?);

        self.transfer_table(ring, |e| e.extend(k, 0, 0).ok())
    }

    /// The ring of the last `nvars - k` variables.
    pub fn contract(self: &Arc<Self>, k: usize) -> Result<Arc<Self>, PolynomialError> {
        if k > self.nvars {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.nvars,
                found: k,
            });
        }

        let len = self.nvars - k;
        let ring = Arc::new(Self::build(
            self.coefficient_ring.clone(),
            len,
            self.order.contract(k, len),
            &self.vars[k..],
            None,
        )?);

        self.transfer_table(ring, |e| {
            if e.iter().take(k).all(|x| x.is_zero()) {
                e.contract(k, len).ok()
            } else {
                None
            }
        })
    }

    /// The ring with the variables in reverse order, with an order that sorts reversed
    /// exponent vectors like the current one. With `partial` set, only the first block of
    /// an elimination order is reversed.
    pub fn reverse(self: &Arc<Self>, partial: bool) -> Result<Arc<Self>, PolynomialError> {
        let split = self.order.reversed_prefix(partial);

        let mut vars = self.vars.clone();
        match split {
            Some(j) => vars[..j].reverse(),
            None => vars.reverse(),
        }

        let ring = Arc::new(Self::build(
            self.coefficient_ring.clone(),
            self.nvars,
            self.order.reverse(partial),
            &vars,
            None,
        )?);

        self.transfer_table(ring, |e| match split {
            Some(j) => Some(e.reverse_part(j)),
            None => Some(e.reverse()),
        })
    }

    /// Give `ring` a copy of the relation table of `self`, with every rule mapped by `map`.
    fn transfer_table(
        self: &Arc<Self>,
        ring: Arc<Self>,
        map: impl Fn(&ExpVector<E>) -> Option<ExpVector<E>>,
    ) -> Result<Arc<Self>, PolynomialError> {
        let Some(table) = &self.table else {
            return Ok(ring);
        };

        let new_table = table.remap(&ring, map)?;
        debug!(
            "Transferred {} of {} relations to {}",
            new_table.size(),
            table.size(),
            ring
        );

        Ok(Arc::new(ring.with_table(Some(Arc::new(new_table)))))
    }

    /// The ring of polynomials in the first `i` variables, with coefficients that are
    /// polynomials in the remaining variables. The term order is split accordingly.
    ///
    /// The relations of a solvable ring are kept in the coefficient ring. Relations
    /// that involve one of the first `i` variables cannot be represented and are rejected.
    pub fn recursive(
        self: &Arc<Self>,
        i: usize,
    ) -> Result<Arc<RecursiveRing<C, E>>, PolynomialError> {
        if i > self.nvars {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.nvars,
                found: i,
            });
        }

        if let Some(t) = &self.table {
            if t.involves(|v| v < i) {
                return Err(PolynomialError::InconsistentRelation(format!(
                    "a relation of {} involves one of the first {} variables",
                    self, i
                )));
            }
        }

        let inner = self.contract(i)?;
        Ok(Arc::new(GenPolynomialRing::build(
            inner,
            i,
            self.order.contract(0, i),
            &self.vars[..i],
            None,
        )?))
    }

    /// A random polynomial with up to `l` terms, where every variable of a term has
    /// an exponent below `d` with probability `q` and exponent zero otherwise.
    /// The coefficients are sampled from `(-k, k)`.
    pub fn random(
        self: &Arc<Self>,
        k: i64,
        l: usize,
        d: i64,
        q: f64,
        rng: &mut impl rand::RngCore,
    ) -> Result<GenPolynomial<C, E>, PolynomialError> {
        let mut b = PolynomialBuilder::new(self);
        for _ in 0..l {
            let mut e = Vec::with_capacity(self.nvars);
            for _ in 0..self.nvars {
                if d > 0 && rng.gen_bool(q.clamp(0., 1.)) {
                    e.push(rng.gen_range(0..d));
                } else {
                    e.push(0);
                }
            }

            let c = self.coefficient_ring.sample(rng, (-k.max(1) + 1, k.max(1)));
            b.add_term(ExpVector::new(&e)?, c);
        }

        Ok(b.freeze())
    }
}

impl<C: Ring, E: Exponent> std::fmt::Debug for GenPolynomialRing<C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenPolynomialRing")
            .field("coefficient_ring", &self.coefficient_ring)
            .field("vars", &self.vars)
            .field("order", &self.order)
            .field("table", &self.table)
            .finish()
    }
}

impl<C: Ring, E: Exponent> Display for GenPolynomialRing<C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[", self.coefficient_ring)?;
        for (i, v) in self.vars.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "] {}", self.order)?;

        if let Some(t) = &self.table {
            write!(f, " {}", t)?;
        }
        Ok(())
    }
}

impl<C: Ring, E: Exponent> PartialEq for GenPolynomialRing<C, E> {
    fn eq(&self, other: &Self) -> bool {
        let same_table = match (&self.table, &other.table) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };

        self.coefficient_ring == other.coefficient_ring
            && self.nvars == other.nvars
            && self.order == other.order
            && self.vars == other.vars
            && same_table
    }
}

impl<C: Ring, E: Exponent> Eq for GenPolynomialRing<C, E> {}

impl<C: Ring, E: Exponent> Hash for GenPolynomialRing<C, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coefficient_ring.hash(state);
        self.nvars.hash(state);
        self.order.hash(state);
        self.vars.hash(state);
        self.table.is_some().hash(state);
    }
}

/// Polynomial rings are rings themselves, which allows for recursive polynomials.
impl<C: Ring, E: Exponent> Ring for Arc<GenPolynomialRing<C, E>> {
    type Element = GenPolynomial<C, E>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.multiply(a, b)
            .unwrap_or_else(|e| panic!("Cannot multiply {} and {}: {}", a, b, e))
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a + b;
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a - b;
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a + &self.mul(b, c);
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a - &self.mul(b, c);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.negate()
    }

    fn zero(&self) -> Self::Element {
        GenPolynomialRing::zero(self)
    }

    fn one(&self) -> Self::Element {
        GenPolynomialRing::one(self)
    }

    fn nth(&self, n: i64) -> Self::Element {
        self.from_integer(n)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
            .unwrap_or_else(|err| panic!("Cannot compute ({})^{}: {}", b, e, err))
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    /// Only the constant units are units of a polynomial ring.
    fn is_unit(&self, a: &Self::Element) -> bool {
        a.is_unit()
    }

    fn characteristic(&self) -> Integer {
        self.coefficient_ring.characteristic()
    }

    fn inv(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        if a.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        if !a.is_constant() {
            return Err(PolynomialError::NotInvertible(a.to_string()));
        }

        Ok(self.value_of(self.coefficient_ring.inv(&a.coefficients[0])?))
    }

    /// Panics when the ring has a local order.
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.is_zero() {
            return None;
        }
        a.divide_exact(b)
            .unwrap_or_else(|e| panic!("Cannot divide {} by {}: {}", a, b, e))
    }

    fn signum(&self, a: &Self::Element) -> i32 {
        self.coefficient_ring.signum(&a.leading_base_coefficient())
    }

    fn generators(&self) -> Vec<Self::Element> {
        GenPolynomialRing::generators(self)
    }

    /// A random polynomial in every variable with at most three terms of degree below three.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let mut b = PolynomialBuilder::new(self);
        let nterms = rng.gen_range(0..4);
        for _ in 0..nterms {
            let e: Vec<_> = (0..self.nvars)
                .map(|_| E::from_i64(rng.gen_range(0..3)).unwrap_or_else(E::zero))
                .collect();
            b.add_term(
                ExpVector::from_backing(&e),
                self.coefficient_ring.sample(rng, range),
            );
        }
        b.freeze()
    }

    fn fmt_display(&self, element: &Self::Element, f: &mut Formatter<'_>) -> Result<(), Error> {
        element.fmt(f)
    }
}
