//! Errors raised by the polynomial kernel.

use thiserror::Error;

/// Every failure the kernel can report. Configuration errors are raised at
/// construction time, arithmetic errors at the point of detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// An exponent does not fit the backing integer type of an exponent vector.
    #[error("exponent {value} does not fit into a {backing} exponent")]
    ExponentOverflow { value: i128, backing: &'static str },

    #[error("invalid term order: {0}")]
    InvalidTermOrder(String),

    /// The operand does not have the dimension the ring or operation expects.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Division by, or inversion of, an element that is not a unit.
    #[error("{0} is not invertible")]
    NotInvertible(String),

    #[error("division by zero")]
    DivisionByZero,

    /// Two polynomials of different rings were combined.
    #[error("incompatible rings: {0}")]
    IncompatibleRings(String),

    /// A relation whose exponents do not reconstruct the leading term of its polynomial.
    #[error("inconsistent relation: {0}")]
    InconsistentRelation(String),
}
