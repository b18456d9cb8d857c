//! Printing of polynomials.
use std::fmt::{self, Display, Write};

use smartstring::{LazyCompact, SmartString};

use crate::{
    domains::Ring,
    poly::{polynomial::GenPolynomial, Exponent},
};

/// Prints a polynomial as a sum of terms, from the highest to the lowest term,
/// e.g. `3/2*x^2*y-x+1`. Coefficients that print as a sum or difference
/// are wrapped in parentheses when they multiply variables.
pub struct PolynomialPrinter<'a, C: Ring, E: Exponent> {
    pub poly: &'a GenPolynomial<C, E>,
    pub vars: Option<Vec<SmartString<LazyCompact>>>,
}

impl<'a, C: Ring, E: Exponent> PolynomialPrinter<'a, C, E> {
    /// Print with the variable names of the ring of the polynomial.
    pub fn new(poly: &'a GenPolynomial<C, E>) -> PolynomialPrinter<'a, C, E> {
        PolynomialPrinter { poly, vars: None }
    }

    /// Print with the given variable names instead. Missing names are printed as `x{index}`.
    pub fn new_with_vars<S: AsRef<str>>(
        poly: &'a GenPolynomial<C, E>,
        vars: &[S],
    ) -> PolynomialPrinter<'a, C, E> {
        PolynomialPrinter {
            poly,
            vars: Some(vars.iter().map(|v| v.as_ref().into()).collect()),
        }
    }

    fn var_name(&self, i: usize) -> SmartString<LazyCompact> {
        let names = self.vars.as_deref().unwrap_or(self.poly.ring().vars());
        match names.get(i) {
            Some(n) => n.clone(),
            None => format!("x{}", i).into(),
        }
    }
}

/// Returns `true` if a printed coefficient needs parentheses as a factor.
fn is_compound(s: &str) -> bool {
    s.char_indices()
        .any(|(i, c)| c == '+' || (c == '-' && i > 0) || c == ' ')
}

impl<'a, C: Ring, E: Exponent> Display for PolynomialPrinter<'a, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.poly.is_zero() {
            return write!(f, "0");
        }

        let field = self.poly.ring().coefficient_ring();
        let mut out = String::new();

        for (i, monomial) in self.poly.into_iter().enumerate() {
            let is_constant = monomial.exponent.is_zero();

            let c = monomial.coefficient;
            let coeff = if is_constant {
                field.printer(c).to_string()
            } else if field.is_one(c) {
                String::new()
            } else if field.is_one(&field.neg(c)) {
                "-".to_string()
            } else {
                let s = field.printer(c).to_string();
                if is_compound(&s) {
                    format!("({})*", s)
                } else {
                    format!("{}*", s)
                }
            };

            if i > 0 && !coeff.starts_with('-') {
                out.push('+');
            }
            out.push_str(&coeff);

            let mut first = true;
            for (v, e) in monomial.exponent.iter().enumerate() {
                let e = e.to_i64();
                if e == 0 {
                    continue;
                }

                if !first {
                    out.push('*');
                }
                first = false;

                out.push_str(&self.var_name(v));
                if e < 0 {
                    write!(out, "^({})", e)?;
                } else if e != 1 {
                    write!(out, "^{}", e)?;
                }
            }
        }

        f.write_str(&out)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        domains::{
            integer::Z,
            rational::{Rational, Q},
            Ring,
        },
        poly::{
            exponent::ExpVector, polynomial::GenPolynomial, ring::GenPolynomialRing,
            term_order::TermOrder,
        },
    };

    #[test]
    fn print_terms() {
        let r = GenPolynomialRing::<_, i64>::new(Q, 2, TermOrder::default(), &["x", "y"]).unwrap();
        let p = GenPolynomial::from_terms(
            &r,
            [
                (ExpVector::new(&[2, 1]).unwrap(), Rational::from_i64(3, 2)),
                (ExpVector::new(&[1, 0]).unwrap(), Q.nth(-1)),
                (ExpVector::new(&[0, -2]).unwrap(), Q.nth(-2)),
                (ExpVector::new(&[0, 0]).unwrap(), Q.one()),
            ],
        )
        .unwrap();

        assert_eq!(p.to_string(), "3/2*x^2*y-x+1-2*y^(-2)");
        assert_eq!(p.to_string_with(&["a", "b"]), "3/2*a^2*b-a+1-2*b^(-2)");
        assert_eq!(r.zero().to_string(), "0");
        assert_eq!(r.from_integer(-3).to_string(), "-3");
    }

    #[test]
    fn print_nested() {
        let inner = GenPolynomialRing::<_, i64>::new(Z, 1, TermOrder::default(), &["y"]).unwrap();
        let outer =
            GenPolynomialRing::<_, i64>::new(inner.clone(), 1, TermOrder::default(), &["x"])
                .unwrap();

        let c = inner.univariate(0, 1) - inner.one();
        let p = outer.univariate(0, 1).scalar_multiply(&c) + outer.value_of(inner.from_integer(-1));
        assert_eq!(p.to_string(), "(y-1)*x-1");
        assert_eq!(outer.univariate(0, 1).negate().to_string(), "-x");
    }
}
