use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::PolynomialError;

use super::{Exponent, INLINED_EXPONENTS};

/// The exponents of a single term: one signed exponent per ring variable,
/// stored in the backing type `E`.
///
/// Exponent vectors are values. Every operation that changes an entry or the length
/// returns a new vector, and arithmetic is checked against the backing type.
#[derive(Clone)]
pub struct ExpVector<E: Exponent = i64> {
    exponents: SmallVec<[E; INLINED_EXPONENTS]>,
}

/// Variable indices, as returned by [ExpVector::dependency_on_variables].
pub type VariableSet = SmallVec<[usize; INLINED_EXPONENTS]>;

impl<E: Exponent> ExpVector<E> {
    /// Create an exponent vector from a list of exponents.
    pub fn new(exponents: &[i64]) -> Result<Self, PolynomialError> {
        Ok(ExpVector {
            exponents: exponents
                .iter()
                .map(|e| E::try_from_i64(*e))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn from_backing(exponents: &[E]) -> Self {
        ExpVector {
            exponents: SmallVec::from_slice(exponents),
        }
    }

    pub fn zero(nvars: usize) -> Self {
        ExpVector {
            exponents: SmallVec::from_elem(E::zero(), nvars),
        }
    }

    /// The exponent vector `x_i^e` in `nvars` variables.
    pub fn univariate(nvars: usize, i: usize, e: E) -> Self {
        let mut r = Self::zero(nvars);
        r.exponents[i] = e;
        r
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> E {
        self.exponents[i]
    }

    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.exponents
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.exponents.iter()
    }

    /// Return a copy with the exponent of variable `i` replaced by `e`.
    pub fn set(&self, i: usize, e: i64) -> Result<Self, PolynomialError> {
        if i >= self.len() {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.len(),
                found: i + 1,
            });
        }

        let mut r = self.clone();
        r.exponents[i] = E::try_from_i64(e)?;
        Ok(r)
    }

    pub fn is_zero(&self) -> bool {
        self.exponents.iter().all(|e| e.is_zero())
    }

    fn overflow(value: i128) -> PolynomialError {
        PolynomialError::ExponentOverflow {
            value,
            backing: E::BACKING,
        }
    }

    /// The componentwise sum. This corresponds to multiplying two terms.
    pub fn sum(&self, other: &Self) -> Result<Self, PolynomialError> {
        debug_assert_eq!(self.len(), other.len());
        Ok(ExpVector {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| {
                    a.checked_add(b).ok_or_else(|| {
                        Self::overflow(a.to_i64() as i128 + b.to_i64() as i128)
                    })
                })
                .collect::<Result<_, _>>()?,
        })
    }

    /// The componentwise difference. This corresponds to dividing two terms.
    pub fn subtract(&self, other: &Self) -> Result<Self, PolynomialError> {
        debug_assert_eq!(self.len(), other.len());
        Ok(ExpVector {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| {
                    a.checked_sub(b).ok_or_else(|| {
                        Self::overflow(a.to_i64() as i128 - b.to_i64() as i128)
                    })
                })
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn negate(&self) -> Result<Self, PolynomialError> {
        Ok(ExpVector {
            exponents: self
                .exponents
                .iter()
                .map(|a| {
                    a.checked_neg()
                        .ok_or_else(|| Self::overflow(-(a.to_i64() as i128)))
                })
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn abs(&self) -> Result<Self, PolynomialError> {
        Ok(ExpVector {
            exponents: self
                .exponents
                .iter()
                .map(|a| {
                    if a.to_i64() < 0 {
                        a.checked_neg()
                            .ok_or_else(|| Self::overflow(-(a.to_i64() as i128)))
                    } else {
                        Ok(*a)
                    }
                })
                .collect::<Result<_, _>>()?,
        })
    }

    /// The componentwise maximum.
    pub fn lcm(&self, other: &Self) -> Self {
        ExpVector {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| *a.max(b))
                .collect(),
        }
    }

    /// The componentwise minimum.
    pub fn gcd(&self, other: &Self) -> Self {
        ExpVector {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| *a.min(b))
                .collect(),
        }
    }

    /// The sum of all exponents. The sum is exact for every backing type.
    pub fn total_deg(&self) -> i128 {
        self.partial_sum(0, self.len())
    }

    /// The largest exponent, or 0 for an empty vector.
    pub fn max_deg(&self) -> i64 {
        self.exponents
            .iter()
            .map(|e| e.to_i64())
            .max()
            .unwrap_or(0)
    }

    /// Returns `true` iff every exponent of `self` is at least the matching exponent of `other`,
    /// i.e. the term `other` divides the term `self`.
    pub fn multiple_of(&self, other: &Self) -> bool {
        self.exponents
            .iter()
            .zip(&other.exponents)
            .all(|(a, b)| a >= b)
    }

    /// The indices of the variables with a positive exponent.
    pub fn dependency_on_variables(&self) -> VariableSet {
        self.exponents
            .iter()
            .enumerate()
            .filter_map(|(i, e)| if e.to_i64() > 0 { Some(i) } else { None })
            .collect()
    }

    /// Insert `i` new leading variables, where the new variable `j < i` gets exponent `e`.
    pub fn extend(&self, i: usize, j: usize, e: i64) -> Result<Self, PolynomialError> {
        Self::check_new_variable(i, j)?;

        let mut exponents = SmallVec::with_capacity(self.len() + i);
        exponents.extend(std::iter::repeat(E::zero()).take(i));
        exponents.extend_from_slice(&self.exponents);
        if i > 0 {
            exponents[j] = E::try_from_i64(e)?;
        }
        Ok(ExpVector { exponents })
    }

    /// Append `i` new trailing variables, where the new variable `j < i` gets exponent `e`.
    pub fn extend_lower(&self, i: usize, j: usize, e: i64) -> Result<Self, PolynomialError> {
        Self::check_new_variable(i, j)?;

        let n = self.len();
        let mut exponents = self.exponents.clone();
        exponents.extend(std::iter::repeat(E::zero()).take(i));
        if i > 0 {
            exponents[n + j] = E::try_from_i64(e)?;
        }
        Ok(ExpVector { exponents })
    }

    /// Check that `j` names one of `i` new variables.
    pub(crate) fn check_new_variable(i: usize, j: usize) -> Result<(), PolynomialError> {
        if i > 0 && j >= i {
            Err(PolynomialError::DimensionMismatch {
                expected: i,
                found: j + 1,
            })
        } else {
            Ok(())
        }
    }

    /// Keep the `len` variables starting at `i`.
    pub fn contract(&self, i: usize, len: usize) -> Result<Self, PolynomialError> {
        if i + len > self.len() {
            return Err(PolynomialError::DimensionMismatch {
                expected: self.len(),
                found: i + len,
            });
        }

        Ok(ExpVector::from_backing(&self.exponents[i..i + len]))
    }

    /// Reverse the order of the variables.
    pub fn reverse(&self) -> Self {
        ExpVector {
            exponents: self.exponents.iter().rev().cloned().collect(),
        }
    }

    /// Reverse the order of the first `j` variables and keep the others in place.
    pub fn reverse_part(&self, j: usize) -> Self {
        let mut r = self.clone();
        r.exponents[..j].reverse();
        r
    }

    /// Concatenate the variables of `other` after the ones of `self`.
    pub fn combine(&self, other: &Self) -> Self {
        let mut r = self.clone();
        r.exponents.extend_from_slice(&other.exponents);
        r
    }

    /// Convert to a backing type that holds every value of `E`.
    pub fn widen(&self) -> ExpVector<i64> {
        ExpVector {
            exponents: self.exponents.iter().map(|e| e.to_i64()).collect(),
        }
    }

    /// Convert to another backing type, failing if an exponent does not fit.
    pub fn narrow<F: Exponent>(&self) -> Result<ExpVector<F>, PolynomialError> {
        Ok(ExpVector {
            exponents: self
                .exponents
                .iter()
                .map(|e| F::try_from_i64(e.to_i64()))
                .collect::<Result<_, _>>()?,
        })
    }

    #[inline]
    fn first_difference(&self, other: &Self, begin: usize, end: usize) -> Option<usize> {
        (begin..end).find(|&i| self.exponents[i] != other.exponents[i])
    }

    #[inline]
    fn last_difference(&self, other: &Self, begin: usize, end: usize) -> Option<usize> {
        (begin..end)
            .rev()
            .find(|&i| self.exponents[i] != other.exponents[i])
    }

    #[inline]
    fn partial_sum(&self, begin: usize, end: usize) -> i128 {
        self.exponents[begin..end]
            .iter()
            .map(|e| e.to_i64() as i128)
            .sum()
    }

    /// Lexicographic comparison: the first differing exponent decides.
    /// `Greater` means that `self` is the larger term.
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.lex_cmp_range(other, 0, self.len())
    }

    pub fn lex_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        match self.first_difference(other, begin, end) {
            Some(i) => self.exponents[i].cmp(&other.exponents[i]),
            None => Ordering::Equal,
        }
    }

    /// The negation of [Self::lex_cmp].
    pub fn inv_lex_cmp(&self, other: &Self) -> Ordering {
        self.inv_lex_cmp_range(other, 0, self.len())
    }

    pub fn inv_lex_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        self.lex_cmp_range(other, begin, end).reverse()
    }

    /// Graded lexicographic comparison: the total degree decides, ties are broken
    /// by [Self::lex_cmp].
    pub fn grad_cmp(&self, other: &Self) -> Ordering {
        self.grad_cmp_range(other, 0, self.len())
    }

    pub fn grad_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        let Some(i) = self.first_difference(other, begin, end) else {
            return Ordering::Equal;
        };

        // the exponents before `i` agree, so the sums from `i` decide the degree
        self.partial_sum(i, end)
            .cmp(&other.partial_sum(i, end))
            .then_with(|| self.exponents[i].cmp(&other.exponents[i]))
    }

    /// Graded comparison with ties broken by [Self::inv_lex_cmp].
    pub fn inv_grad_cmp(&self, other: &Self) -> Ordering {
        self.inv_grad_cmp_range(other, 0, self.len())
    }

    pub fn inv_grad_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        let Some(i) = self.first_difference(other, begin, end) else {
            return Ordering::Equal;
        };

        self.partial_sum(i, end)
            .cmp(&other.partial_sum(i, end))
            .then_with(|| other.exponents[i].cmp(&self.exponents[i]))
    }

    /// Reverse lexicographic comparison: the last differing exponent decides.
    pub fn rev_lex_cmp(&self, other: &Self) -> Ordering {
        self.rev_lex_cmp_range(other, 0, self.len())
    }

    pub fn rev_lex_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        match self.last_difference(other, begin, end) {
            Some(i) => self.exponents[i].cmp(&other.exponents[i]),
            None => Ordering::Equal,
        }
    }

    /// The negation of [Self::rev_lex_cmp].
    pub fn rev_inv_lex_cmp(&self, other: &Self) -> Ordering {
        self.rev_inv_lex_cmp_range(other, 0, self.len())
    }

    pub fn rev_inv_lex_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        self.rev_lex_cmp_range(other, begin, end).reverse()
    }

    /// Graded comparison with ties broken by [Self::rev_lex_cmp].
    pub fn rev_grad_cmp(&self, other: &Self) -> Ordering {
        self.rev_grad_cmp_range(other, 0, self.len())
    }

    pub fn rev_grad_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        let Some(i) = self.last_difference(other, begin, end) else {
            return Ordering::Equal;
        };

        self.partial_sum(begin, i + 1)
            .cmp(&other.partial_sum(begin, i + 1))
            .then_with(|| self.exponents[i].cmp(&other.exponents[i]))
    }

    /// Graded comparison with ties broken by [Self::rev_inv_lex_cmp]. This is the
    /// classical graded reverse lexicographic order.
    pub fn rev_inv_grad_cmp(&self, other: &Self) -> Ordering {
        self.rev_inv_grad_cmp_range(other, 0, self.len())
    }

    pub fn rev_inv_grad_cmp_range(&self, other: &Self, begin: usize, end: usize) -> Ordering {
        let Some(i) = self.last_difference(other, begin, end) else {
            return Ordering::Equal;
        };

        self.partial_sum(begin, i + 1)
            .cmp(&other.partial_sum(begin, i + 1))
            .then_with(|| other.exponents[i].cmp(&self.exponents[i]))
    }

    /// Compare the weighted degrees row by row. Missing weights count as zero.
    pub(crate) fn weight_rows_cmp(&self, other: &Self, weights: &[Vec<i64>]) -> Ordering {
        for row in weights {
            let weighted = |e: &Self| -> i128 {
                e.exponents
                    .iter()
                    .zip(row)
                    .map(|(x, w)| x.to_i64() as i128 * *w as i128)
                    .sum()
            };

            match weighted(self).cmp(&weighted(other)) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        Ordering::Equal
    }

    /// Weighted comparison: the rows of `weights` are tried in order and the first
    /// differing weighted degree decides. A full tie is broken by [Self::lex_cmp].
    pub fn weight_cmp(&self, other: &Self, weights: &[Vec<i64>]) -> Ordering {
        self.weight_rows_cmp(other, weights)
            .then_with(|| self.lex_cmp(other))
    }
}

impl<E: Exponent, F: Exponent> PartialEq<ExpVector<F>> for ExpVector<E> {
    fn eq(&self, other: &ExpVector<F>) -> bool {
        self.len() == other.len()
            && self
                .exponents
                .iter()
                .zip(&other.exponents)
                .all(|(a, b)| a.to_i64() == b.to_i64())
    }
}

impl<E: Exponent> Eq for ExpVector<E> {}

impl<E: Exponent> Hash for ExpVector<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // hash the logical values, so that equal vectors of different widths agree
        state.write_usize(self.len());
        for e in &self.exponents {
            state.write_i64(e.to_i64());
        }
    }
}

impl<E: Exponent> Debug for ExpVector<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<E: Exponent> Display for ExpVector<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, e) in self.exponents.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use crate::error::PolynomialError;

    use super::ExpVector;

    fn ev(e: &[i64]) -> ExpVector {
        ExpVector::new(e).unwrap()
    }

    #[test]
    fn sum_and_degree() {
        let a = ev(&[2, 0, 1]);
        let b = ev(&[1, 1, 0]);
        let s = a.sum(&b).unwrap();
        assert_eq!(s, ev(&[3, 1, 1]));
        assert_eq!(s.total_deg(), 5);
        assert_eq!(s.max_deg(), 3);
        assert_eq!(s.subtract(&b).unwrap(), a);
        assert_eq!(s.dependency_on_variables().as_slice(), &[0, 1, 2]);
        assert_eq!(a.dependency_on_variables().as_slice(), &[0, 2]);
    }

    #[test]
    fn overflow() {
        let a = ExpVector::<i8>::new(&[100]).unwrap();
        assert_eq!(
            a.sum(&a),
            Err(PolynomialError::ExponentOverflow {
                value: 200,
                backing: "i8"
            })
        );
        assert!(ExpVector::<i8>::new(&[-128]).unwrap().negate().is_err());

        let m = ExpVector::<i64>::from_backing(&[i64::MAX, i64::MAX, 1]);
        assert_eq!(m.total_deg(), 2 * i64::MAX as i128 + 1);
        let n = ExpVector::<i8>::from_backing(&[-128, -128]);
        assert_eq!(n.total_deg(), -256);
        assert!(ExpVector::<i8>::new(&[300]).is_err());
        assert!(ev(&[1, 2]).widen().narrow::<i8>().is_ok());
    }

    #[test]
    fn cross_width_equality() {
        let a = ExpVector::<i8>::new(&[1, 2]).unwrap();
        let b = ExpVector::<i64>::new(&[1, 2]).unwrap();
        assert!(a == b);

        use std::hash::BuildHasher;
        let s = ahash::RandomState::with_seeds(1, 2, 3, 4);
        assert_eq!(s.hash_one(&a), s.hash_one(&b));
    }

    #[test]
    fn lcm_gcd_multiple() {
        let a = ev(&[2, 0, 3]);
        let b = ev(&[1, 4, 3]);
        assert_eq!(a.lcm(&b), ev(&[2, 4, 3]));
        assert_eq!(a.gcd(&b), ev(&[1, 0, 3]));
        assert!(a.lcm(&b).multiple_of(&a));
        assert!(a.multiple_of(&a.gcd(&b)));
        assert!(!a.multiple_of(&b));
    }

    #[test]
    fn reshape() {
        let a = ev(&[1, 2, 3]);
        assert_eq!(a.extend(2, 1, 5).unwrap(), ev(&[0, 5, 1, 2, 3]));
        assert_eq!(a.extend_lower(2, 0, 5).unwrap(), ev(&[1, 2, 3, 5, 0]));
        assert_eq!(a.extend(2, 1, 5).unwrap().contract(2, 3).unwrap(), a);
        assert!(a.contract(2, 2).is_err());
        assert_eq!(a.reverse(), ev(&[3, 2, 1]));
        assert_eq!(a.reverse_part(2), ev(&[2, 1, 3]));
        assert_eq!(a.combine(&ev(&[4])), ev(&[1, 2, 3, 4]));
        assert_eq!(a.set(1, 7).unwrap(), ev(&[1, 7, 3]));
        assert_eq!(a.get(1), 2);

        // the new variable must be one of the inserted ones
        assert_eq!(
            a.extend(1, 2, 9),
            Err(PolynomialError::DimensionMismatch {
                expected: 1,
                found: 3
            })
        );
        assert!(a.extend(2, 2, 9).is_err());
        assert!(a.extend_lower(1, 1, 9).is_err());
        assert_eq!(a.extend(0, 5, 9).unwrap(), a);
        assert_eq!(a.extend_lower(0, 5, 9).unwrap(), a);
    }

    #[test]
    fn comparators() {
        let a = ev(&[1, 0, 2]);
        let b = ev(&[0, 3, 0]);

        assert_eq!(a.lex_cmp(&b), Ordering::Greater);
        assert_eq!(a.inv_lex_cmp(&b), Ordering::Less);
        // same degree: the tie break decides
        assert_eq!(a.grad_cmp(&b), Ordering::Greater);
        assert_eq!(a.inv_grad_cmp(&b), Ordering::Less);
        assert_eq!(a.rev_lex_cmp(&b), Ordering::Greater);
        assert_eq!(a.rev_grad_cmp(&b), Ordering::Greater);
        assert_eq!(a.rev_inv_grad_cmp(&b), Ordering::Less);

        let c = ev(&[0, 0, 4]);
        assert_eq!(c.grad_cmp(&a), Ordering::Greater);
        assert_eq!(c.lex_cmp(&a), Ordering::Less);
        assert_eq!(a.lex_cmp_range(&b, 1, 3), Ordering::Less);
        assert_eq!(a.rev_lex_cmp_range(&b, 0, 2), Ordering::Less);

        let w = vec![vec![1, 2, 1]];
        assert_eq!(a.weight_cmp(&b, &w), Ordering::Less);
        assert_eq!(a.weight_cmp(&a, &w), Ordering::Equal);
        let tie = vec![vec![0, 0, 0]];
        assert_eq!(a.weight_cmp(&b, &tie), a.lex_cmp(&b));
    }
}
