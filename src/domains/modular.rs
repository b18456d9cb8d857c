use std::fmt::{Display, Error, Formatter};

use rand::Rng;

use crate::{error::PolynomialError, utils};

use super::{integer::Integer, Ring};

/// The modular ring `Z / mZ`, where `m` can be any integer larger than one.
/// Elements are stored in the range `[0, m)`.
///
/// When `m` is not a prime, not every non-zero element is a unit and
/// [Ring::inv] fails for those elements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Zn {
    modulus: u64,
}

impl Zn {
    pub fn new(modulus: u64) -> Zn {
        assert!(modulus > 1, "The modulus must be larger than 1");
        Zn { modulus }
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Map an integer into the ring.
    pub fn to_element(&self, a: i64) -> u64 {
        (a as i128).rem_euclid(self.modulus as i128) as u64
    }

    /// Return the representative of `a` in `[-m/2, m/2]`.
    pub fn to_symmetric_integer(&self, a: u64) -> Integer {
        if a > self.modulus / 2 {
            Integer::from(a as i128 - self.modulus as i128)
        } else {
            Integer::from(a)
        }
    }
}

impl Display for Zn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z/{}", self.modulus)
    }
}

impl Ring for Zn {
    type Element = u64;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        ((*a as u128 + *b as u128) % self.modulus as u128) as u64
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a >= b {
            a - b
        } else {
            self.modulus - (b - a)
        }
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        ((*a as u128 * *b as u128) % self.modulus as u128) as u64
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
        if *a == 0 {
            0
        } else {
            self.modulus - a
        }
    }

    fn zero(&self) -> Self::Element {
        0
    }

    fn one(&self) -> Self::Element {
        1
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        self.to_element(n)
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut base = *b;
        let mut result = 1;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(&result, &base);
            }
            base = self.mul(&base, &base);
            e >>= 1;
        }
        result
    }

    fn is_zero(a: &Self::Element) -> bool {
        *a == 0
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        utils::gcd_unsigned(*a, self.modulus) == 1
    }

    fn characteristic(&self) -> Integer {
        self.modulus.into()
    }

    /// Compute the inverse when `a` and the modulus are coprime.
    fn inv(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        if *a == 0 {
            return Err(PolynomialError::DivisionByZero);
        }

        let (g, s) = utils::half_extended_gcd(*a, self.modulus);
        if g != 1 {
            return Err(PolynomialError::NotInvertible(format!(
                "{} mod {}",
                a, self.modulus
            )));
        }

        Ok(s)
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        Some(self.mul(a, &self.inv(b).ok()?))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        self.to_element(rng.gen_range(range.0..range.1))
    }

    fn fmt_display(&self, element: &Self::Element, f: &mut Formatter<'_>) -> Result<(), Error> {
        element.fmt(f)
    }
}
