//! Sparse multivariate polynomials over a generic coefficient ring.
//!
//! The building blocks, from the leaves up:
//! - [ExpVector](exponent::ExpVector): the exponents of a single term,
//! - [TermOrder](term_order::TermOrder): a total order on exponent vectors,
//! - [GenPolynomialRing](ring::GenPolynomialRing): the ring data shared by all its polynomials,
//! - [GenPolynomial](polynomial::GenPolynomial): a sparse polynomial value,
//! - [RelationTable](solvable::RelationTable): commutation rules that turn a ring into a solvable ring.
pub mod division;
pub mod exponent;
pub mod polynomial;
pub mod recursive;
pub mod ring;
pub mod solvable;
pub mod term_order;

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::PolynomialError;

/// The number of exponents that are stored inline in an exponent vector
/// before it spills to the heap.
pub const INLINED_EXPONENTS: usize = 6;

/// The backing integer type of an exponent vector. Exponents are signed,
/// so that Laurent-type exponent vectors and differences can be represented.
pub trait Exponent:
    Hash + Debug + Display + Ord + Clone + Copy + PartialEq + Eq + Send + Sync + 'static
{
    /// The name of the backing type, used in error messages.
    const BACKING: &'static str;

    fn zero() -> Self;
    fn to_i64(&self) -> i64;
    /// Convert from `i64`, if the value fits in the backing type.
    fn from_i64(n: i64) -> Option<Self>;
    fn is_zero(&self) -> bool;
    fn checked_add(&self, other: &Self) -> Option<Self>;
    fn checked_sub(&self, other: &Self) -> Option<Self>;
    fn checked_neg(&self) -> Option<Self>;

    /// Convert from `i64`, reporting an [PolynomialError::ExponentOverflow] if the value does not fit.
    #[inline]
    fn try_from_i64(n: i64) -> Result<Self, PolynomialError> {
        Self::from_i64(n).ok_or(PolynomialError::ExponentOverflow {
            value: n as i128,
            backing: Self::BACKING,
        })
    }
}

macro_rules! impl_exponent {
    ($($t:ty),*) => {
        $(
            impl Exponent for $t {
                const BACKING: &'static str = stringify!($t);

                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn to_i64(&self) -> i64 {
                    *self as i64
                }

                #[inline]
                fn from_i64(n: i64) -> Option<Self> {
                    <$t>::try_from(n).ok()
                }

                #[inline]
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                #[inline]
                fn checked_add(&self, other: &Self) -> Option<Self> {
                    <$t>::checked_add(*self, *other)
                }

                #[inline]
                fn checked_sub(&self, other: &Self) -> Option<Self> {
                    <$t>::checked_sub(*self, *other)
                }

                #[inline]
                fn checked_neg(&self) -> Option<Self> {
                    <$t>::checked_neg(*self)
                }
            }
        )*
    };
}

impl_exponent!(i8, i16, i32, i64);

#[cfg(test)]
mod test {
    use crate::error::PolynomialError;

    use super::Exponent;

    #[test]
    fn backing_conversion() {
        assert_eq!(i8::from_i64(127), Some(127));
        assert_eq!(i8::from_i64(128), None);
        assert_eq!(
            i16::try_from_i64(40000),
            Err(PolynomialError::ExponentOverflow {
                value: 40000,
                backing: "i16"
            })
        );
        assert_eq!(i8::MIN.checked_neg(), None);
    }
}
