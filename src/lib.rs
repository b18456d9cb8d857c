//! genpoly is a kernel for sparse multivariate polynomials over generic coefficient rings.
//!
//! Polynomials live in a [GenPolynomialRing](poly::ring::GenPolynomialRing), which fixes
//! the coefficient ring, the variables and the [TermOrder](poly::term_order::TermOrder).
//! Rings with a [RelationTable](poly::solvable::RelationTable) are solvable: the product of
//! two variables may be rewritten by a commutation rule, as in the Weyl algebra.
//!
//! For example:
//!
//! ```
//! use genpoly::{
//!     domains::rational::Q,
//!     poly::{ring::GenPolynomialRing, term_order::TermOrder},
//! };
//!
//! let ring = GenPolynomialRing::<_, i64>::new(Q, 1, TermOrder::default(), &["x"]).unwrap();
//! let x = ring.univariate(0, 1);
//! let a = &x * &x - ring.one();
//! let b = &x - &ring.one();
//!
//! let (q, r) = a.quotient_remainder(&b).unwrap();
//! assert_eq!(q.to_string(), "x+1");
//! assert!(r.is_zero());
//! ```
//!
//! A solvable ring:
//!
//! ```
//! use genpoly::{
//!     domains::rational::Q,
//!     poly::{ring::GenPolynomialRing, term_order::TermOrder},
//! };
//!
//! let ring = GenPolynomialRing::<_, i64>::new_solvable(Q, 2, TermOrder::default(), &["x", "y"])
//!     .unwrap();
//! let x = ring.univariate(0, 1);
//! let y = ring.univariate(1, 1);
//!
//! // y * x = x*y - 1
//! ring.add_relation(1, 0, &(&(&x * &y) - &ring.one())).unwrap();
//! assert_eq!((&y * &x).to_string(), "x*y-1");
//! assert_eq!((&x * &y).to_string(), "x*y");
//! ```

pub mod domains;
pub mod error;
pub mod poly;
pub mod printer;
pub mod utils;

pub use error::PolynomialError;
pub use poly::exponent::ExpVector;
pub use poly::polynomial::GenPolynomial;
pub use poly::ring::GenPolynomialRing;
pub use poly::solvable::RelationTable;
pub use poly::term_order::{OrderKind, TermOrder};
