//! Conversions between polynomial rings with a different set of variables.
use std::collections::hash_map::Entry;
use std::sync::Arc;

use ahash::HashMap;

use crate::domains::Ring;
use crate::error::PolynomialError;

use super::exponent::ExpVector;
use super::polynomial::{GenPolynomial, PolynomialBuilder};
use super::ring::{GenPolynomialRing, RecursiveRing};
use super::Exponent;

impl<C: Ring, E: Exponent> GenPolynomial<C, E> {
    fn check_target_nvars(&self, expected: usize, found: usize) -> Result<(), PolynomialError> {
        if expected == found {
            Ok(())
        } else {
            Err(PolynomialError::DimensionMismatch { expected, found })
        }
    }

    /// Convert to a polynomial in the variables of `ring`, with coefficients that are
    /// polynomials in the remaining variables. The ring is created with
    /// [GenPolynomialRing::recursive].
    pub fn to_recursive(
        &self,
        ring: &Arc<RecursiveRing<C, E>>,
    ) -> Result<GenPolynomial<Arc<GenPolynomialRing<C, E>>, E>, PolynomialError> {
        let inner = ring.coefficient_ring();
        let k = ring.nvars();
        self.check_target_nvars(self.nvars(), k + inner.nvars())?;

        let mut parts: HashMap<ExpVector<E>, PolynomialBuilder<C, E>> = HashMap::default();
        for t in self {
            let outer = t.exponent.contract(0, k)?;
            let e = t.exponent.contract(k, inner.nvars())?;
            match parts.entry(outer) {
                Entry::Occupied(mut o) => o.get_mut().add_term(e, t.coefficient.clone()),
                Entry::Vacant(v) => {
                    let mut b = PolynomialBuilder::new(inner);
                    b.add_term(e, t.coefficient.clone());
                    v.insert(b);
                }
            }
        }

        let mut b = PolynomialBuilder::new(ring);
        for (e, p) in parts {
            b.add_term(e, p.freeze());
        }
        Ok(b.freeze())
    }

    /// Distribute a recursive polynomial over the ring `ring`, whose variables are those
    /// of the outer ring followed by those of the coefficient ring.
    pub fn from_recursive(
        ring: &Arc<GenPolynomialRing<C, E>>,
        p: &GenPolynomial<Arc<GenPolynomialRing<C, E>>, E>,
    ) -> Result<Self, PolynomialError> {
        let outer = p.ring();
        let n = outer.nvars() + outer.coefficient_ring().nvars();
        if n != ring.nvars() {
            return Err(PolynomialError::DimensionMismatch {
                expected: ring.nvars(),
                found: n,
            });
        }

        let mut b = PolynomialBuilder::new(ring);
        for t in p {
            for c in t.coefficient {
                b.add_term(t.exponent.combine(c.exponent), c.coefficient.clone());
            }
        }
        Ok(b.freeze())
    }

    /// Embed into `ring`, which has new leading variables, and multiply by `x_j^k`
    /// for the new variable `j`.
    pub fn extend(
        &self,
        ring: &Arc<GenPolynomialRing<C, E>>,
        j: usize,
        k: i64,
    ) -> Result<Self, PolynomialError> {
        let i = ring.nvars().saturating_sub(self.nvars());
        self.check_target_nvars(ring.nvars(), self.nvars() + i)?;
        ExpVector::<E>::check_new_variable(i, j)?;

        let mut b = PolynomialBuilder::new(ring);
        for t in self {
            b.add_term(t.exponent.extend(i, j, k)?, t.coefficient.clone());
        }
        Ok(b.freeze())
    }

    /// Embed into `ring`, which has new trailing variables, and multiply by `x_j^k`
    /// for the new variable `j`.
    pub fn extend_lower(
        &self,
        ring: &Arc<GenPolynomialRing<C, E>>,
        j: usize,
        k: i64,
    ) -> Result<Self, PolynomialError> {
        let i = ring.nvars().saturating_sub(self.nvars());
        self.check_target_nvars(ring.nvars(), self.nvars() + i)?;
        ExpVector::<E>::check_new_variable(i, j)?;

        let mut b = PolynomialBuilder::new(ring);
        for t in self {
            b.add_term(t.exponent.extend_lower(i, j, k)?, t.coefficient.clone());
        }
        Ok(b.freeze())
    }

    /// Split off the leading variables that `ring` does not have. The result maps
    /// every exponent vector of the removed variables to its coefficient polynomial in `ring`.
    pub fn contract(
        &self,
        ring: &Arc<GenPolynomialRing<C, E>>,
    ) -> Result<HashMap<ExpVector<E>, Self>, PolynomialError> {
        if ring.nvars() > self.nvars() {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.nvars(),
                found: ring.nvars(),
            });
        }

        let k = self.nvars() - ring.nvars();
        let mut parts: HashMap<ExpVector<E>, PolynomialBuilder<C, E>> = HashMap::default();
        for t in self {
            let head = t.exponent.contract(0, k)?;
            let tail = t.exponent.contract(k, ring.nvars())?;
            parts
                .entry(head)
                .or_insert_with(|| PolynomialBuilder::new(ring))
                .add_term(tail, t.coefficient.clone());
        }

        Ok(parts.into_iter().map(|(e, b)| (e, b.freeze())).collect())
    }

    /// Map into the ring created with [GenPolynomialRing::reverse] with the same `partial` flag.
    pub fn reverse(
        &self,
        ring: &Arc<GenPolynomialRing<C, E>>,
        partial: bool,
    ) -> Result<Self, PolynomialError> {
        self.check_target_nvars(ring.nvars(), self.nvars())?;

        let split = self.ring.term_order().reversed_prefix(partial);
        let mut b = PolynomialBuilder::new(ring);
        for t in self {
            let e = match split {
                Some(j) => t.exponent.reverse_part(j),
                None => t.exponent.reverse(),
            };
            b.add_term(e, t.coefficient.clone());
        }
        Ok(b.freeze())
    }
}
