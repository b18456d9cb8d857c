use std::{
    cmp::Ordering,
    fmt::{Display, Error, Formatter},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand::Rng;
use rug::{ops::Pow, Integer as MultiPrecisionInteger};

use crate::{error::PolynomialError, utils};

use super::{EuclideanDomain, InternalOrdering, Ring};

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct IntegerRing;

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

/// An arbitrary-precision integer. Values that fit in an `i64` are always
/// stored as [Integer::Natural], so that equality and hashing are structural.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Integer {
    Natural(i64),
    Large(MultiPrecisionInteger),
}

macro_rules! from_with_cast {
    ($base: ty) => {
        impl From<$base> for Integer {
            #[inline]
            fn from(value: $base) -> Self {
                Integer::Natural(value as i64)
            }
        }
    };
}

from_with_cast!(i8);
from_with_cast!(i16);
from_with_cast!(i32);
from_with_cast!(i64);
from_with_cast!(u8);
from_with_cast!(u16);
from_with_cast!(u32);

impl From<u64> for Integer {
    #[inline]
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(value.into())
        }
    }
}

impl From<i128> for Integer {
    #[inline]
    fn from(value: i128) -> Self {
        if let Ok(n) = i64::try_from(value) {
            Integer::Natural(n)
        } else {
            Integer::Large(value.into())
        }
    }
}

impl From<MultiPrecisionInteger> for Integer {
    /// Convert from a multi-precision integer to an Integer, potentially
    /// downcasting the number.
    #[inline]
    fn from(n: MultiPrecisionInteger) -> Self {
        if let Some(n) = n.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(n)
        }
    }
}

impl Integer {
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    pub fn to_multi_prec(&self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => MultiPrecisionInteger::from(*n),
            Integer::Large(r) => r.clone(),
        }
    }

    /// Convert to an `i64`, if the value fits.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Natural(n) => Some(*n),
            Integer::Large(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Integer::Natural(0))
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Integer::Natural(1))
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    pub fn signum(&self) -> i32 {
        match self {
            Integer::Natural(n) => n.signum() as i32,
            Integer::Large(r) => match r.cmp0() {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            },
        }
    }

    pub fn abs(&self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if *n == i64::MIN {
                    Integer::Large(MultiPrecisionInteger::from(*n).abs())
                } else {
                    Integer::Natural(n.abs())
                }
            }
            Integer::Large(n) => Integer::Large(n.clone().abs()),
        }
    }

    pub fn pow(&self, e: u64) -> Integer {
        if e > u32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^32: {}", e);
        }
        let e = e as u32;

        match self {
            Integer::Natural(n1) => {
                if let Some(pn) = n1.checked_pow(e) {
                    Integer::Natural(pn)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1).pow(e))
                }
            }
            Integer::Large(r) => MultiPrecisionInteger::from(r.pow(e)).into(),
        }
    }

    /// Euclidean division with a non-negative remainder.
    fn div_rem_euclid(&self, b: &Integer) -> (Integer, Integer) {
        if let (Integer::Natural(a), Integer::Natural(b)) = (self, b) {
            if let (Some(q), Some(r)) = (a.checked_div_euclid(*b), a.checked_rem_euclid(*b)) {
                return (Integer::Natural(q), Integer::Natural(r));
            }
        }

        let (q, r) = self.to_multi_prec().div_rem_euc(b.to_multi_prec());
        (q.into(), r.into())
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(r) => r.fmt(f),
        }
    }
}

impl Display for IntegerRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Z")
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => n1.cmp(n2),
            (Integer::Natural(n1), Integer::Large(n2)) => n2
                .partial_cmp(n1)
                .unwrap_or(Ordering::Equal)
                .reverse(),
            (Integer::Large(n1), Integer::Natural(n2)) => {
                n1.partial_cmp(n2).unwrap_or(Ordering::Equal)
            }
            (Integer::Large(n1), Integer::Large(n2)) => n1.cmp(n2),
        }
    }
}

impl InternalOrdering for Integer {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += &(b * c);
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= &(b * c);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    fn zero(&self) -> Self::Element {
        Integer::Natural(0)
    }

    fn one(&self) -> Self::Element {
        Integer::Natural(1)
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        Integer::Natural(n)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        matches!(a, Integer::Natural(1) | Integer::Natural(-1))
    }

    fn characteristic(&self) -> Integer {
        Integer::Natural(0)
    }

    fn inv(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        if self.is_unit(a) {
            Ok(a.clone())
        } else {
            Err(PolynomialError::NotInvertible(a.to_string()))
        }
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.is_zero() {
            return None;
        }

        let (q, r) = a.div_rem_euclid(b);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    fn signum(&self, a: &Self::Element) -> i32 {
        a.signum()
    }

    fn abs(&self, a: &Self::Element) -> Self::Element {
        a.abs()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0..range.1);
        Integer::Natural(r)
    }

    fn fmt_display(&self, element: &Self::Element, f: &mut Formatter<'_>) -> Result<(), Error> {
        element.fmt(f)
    }
}

impl EuclideanDomain for IntegerRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.div_rem_euclid(b).1
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.div_rem_euclid(b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                Integer::from(utils::gcd_signed(*n1, *n2))
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                let r1 = MultiPrecisionInteger::from(*n1);
                r1.gcd(r2).into()
            }
            (Integer::Large(r1), Integer::Large(r2)) => r1.clone().gcd(r2).into(),
        }
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_add(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(
                        MultiPrecisionInteger::from(*n1) + MultiPrecisionInteger::from(*n2),
                    )
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                (MultiPrecisionInteger::from(*n1) + r2).into()
            }
            (Integer::Large(r1), Integer::Large(r2)) => {
                MultiPrecisionInteger::from(r1 + r2).into()
            }
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_sub(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(
                        MultiPrecisionInteger::from(*n1) - MultiPrecisionInteger::from(*n2),
                    )
                }
            }
            (Integer::Natural(n1), Integer::Large(r2)) => {
                (MultiPrecisionInteger::from(*n1) - r2).into()
            }
            (Integer::Large(r1), Integer::Natural(n2)) => {
                (r1.clone() - MultiPrecisionInteger::from(*n2)).into()
            }
            (Integer::Large(r1), Integer::Large(r2)) => {
                MultiPrecisionInteger::from(r1 - r2).into()
            }
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(nn) = n1.checked_mul(*n2) {
                    Integer::Natural(nn)
                } else {
                    Integer::Large(
                        MultiPrecisionInteger::from(*n1) * MultiPrecisionInteger::from(*n2),
                    )
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                (MultiPrecisionInteger::from(*n1) * r2).into()
            }
            (Integer::Large(r1), Integer::Large(r2)) => {
                MultiPrecisionInteger::from(r1 * r2).into()
            }
        }
    }
}

impl<'a> AddAssign<&'a Integer> for Integer {
    fn add_assign(&mut self, rhs: &'a Integer) {
        if let (Integer::Natural(n1), Integer::Natural(n2)) = (&mut *self, rhs) {
            if let Some(nn) = n1.checked_add(*n2) {
                *n1 = nn;
                return;
            }
        }

        *self = &*self + rhs;
    }
}

impl<'a> SubAssign<&'a Integer> for Integer {
    fn sub_assign(&mut self, rhs: &'a Integer) {
        if let (Integer::Natural(n1), Integer::Natural(n2)) = (&mut *self, rhs) {
            if let Some(nn) = n1.checked_sub(*n2) {
                *n1 = nn;
                return;
            }
        }

        *self = &*self - rhs;
    }
}

impl<'a> MulAssign<&'a Integer> for Integer {
    fn mul_assign(&mut self, rhs: &'a Integer) {
        if let (Integer::Natural(n1), Integer::Natural(n2)) = (&mut *self, rhs) {
            if let Some(nn) = n1.checked_mul(*n2) {
                *n1 = nn;
                return;
            }
        }

        *self = &*self * rhs;
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        match self {
            Integer::Natural(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::Natural(neg)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n).neg())
                }
            }
            Integer::Large(r) => MultiPrecisionInteger::from(-r).into(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{EuclideanDomain, Ring};

    use super::{Integer, Z};

    #[test]
    fn overflow_promotes() {
        let a = Integer::Natural(i64::MAX);
        let b = Z.add(&a, &Z.one());
        assert!(matches!(b, Integer::Large(_)));

        // coming back into range demotes again
        let c = Z.sub(&b, &Z.one());
        assert_eq!(c, a);
        assert!(Z::is_zero(&Z.sub(&c, &a)));
    }

    #[test]
    fn euclidean() {
        let (q, r) = Z.quot_rem(&Z.nth(-7), &Z.nth(2));
        assert_eq!((q, r), (Z.nth(-4), Z.nth(1)));
        assert_eq!(Z.gcd(&Z.nth(-12), &Z.nth(18)), Z.nth(6));
        assert_eq!(Z.try_div(&Z.nth(12), &Z.nth(-4)), Some(Z.nth(-3)));
        assert_eq!(Z.try_div(&Z.nth(3), &Z.nth(2)), None);
        assert_eq!(Z.try_div(&Z.nth(3), &Z.zero()), None);
    }

    #[test]
    fn units() {
        assert!(Z.is_unit(&Z.nth(-1)));
        assert_eq!(Z.inv(&Z.nth(-1)), Ok(Z.nth(-1)));
        assert!(Z.inv(&Z.nth(2)).is_err());
    }

    #[test]
    fn large_pow() {
        let a = Z.pow(&Z.nth(10), 30);
        let b = Z.pow(&Z.nth(10), 15);
        assert_eq!(Z.try_div(&a, &b), Some(b.clone()));
        assert_eq!(Z.signum(&Z.neg(&a)), -1);
    }
}
