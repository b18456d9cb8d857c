use std::cmp::Ordering;
use std::fmt::Display;

use crate::error::PolynomialError;

use super::{exponent::ExpVector, Exponent};

/// The elementary term orders. The integer codes are stable and can be
/// used to select an order with [TermOrder::from_code].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OrderKind {
    /// Lexicographic, the first variable is the most significant.
    Lex = 1,
    /// Lexicographic, the last variable is the most significant.
    InvLex = 2,
    /// Graded lexicographic.
    GrLex = 3,
    /// Graded, with ties broken by the last variable.
    InvGrLex = 4,
    /// Graded reverse lexicographic.
    GRevLex = 5,
    /// Graded reverse lexicographic, read from the last variable.
    GRevInvLex = 6,
    /// Negative lexicographic. This is a local order.
    NegLex = 7,
    /// Negative reverse lexicographic. This is a local order.
    NegRevLex = 8,
}

impl OrderKind {
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn from_code(code: u32) -> Result<OrderKind, PolynomialError> {
        Ok(match code {
            1 => OrderKind::Lex,
            2 => OrderKind::InvLex,
            3 => OrderKind::GrLex,
            4 => OrderKind::InvGrLex,
            5 => OrderKind::GRevLex,
            6 => OrderKind::GRevInvLex,
            7 => OrderKind::NegLex,
            8 => OrderKind::NegRevLex,
            _ => {
                return Err(PolynomialError::InvalidTermOrder(format!(
                    "unknown order code {}",
                    code
                )))
            }
        })
    }

    /// Returns `true` if every strictly decreasing sequence of terms is finite.
    /// Division and gcd computations require a global order.
    pub fn is_global(&self) -> bool {
        !matches!(self, OrderKind::NegLex | OrderKind::NegRevLex)
    }

    /// The kind that compares reversed exponent vectors the way `self`
    /// compares the original ones.
    pub fn mirror(&self) -> OrderKind {
        match self {
            OrderKind::Lex => OrderKind::InvLex,
            OrderKind::InvLex => OrderKind::Lex,
            OrderKind::GrLex => OrderKind::InvGrLex,
            OrderKind::InvGrLex => OrderKind::GrLex,
            OrderKind::GRevLex => OrderKind::GRevInvLex,
            OrderKind::GRevInvLex => OrderKind::GRevLex,
            OrderKind::NegLex => OrderKind::NegRevLex,
            OrderKind::NegRevLex => OrderKind::NegLex,
        }
    }

    /// Compare the exponents in `[begin, end)`. `Greater` means that `a` is the larger term.
    #[inline]
    pub fn compare_range<E: Exponent>(
        &self,
        a: &ExpVector<E>,
        b: &ExpVector<E>,
        begin: usize,
        end: usize,
    ) -> Ordering {
        match self {
            OrderKind::Lex => a.lex_cmp_range(b, begin, end),
            OrderKind::InvLex => a.rev_lex_cmp_range(b, begin, end),
            OrderKind::GrLex => a.grad_cmp_range(b, begin, end),
            OrderKind::InvGrLex => a.rev_grad_cmp_range(b, begin, end),
            OrderKind::GRevLex => a.rev_inv_grad_cmp_range(b, begin, end),
            OrderKind::GRevInvLex => a.inv_grad_cmp_range(b, begin, end),
            OrderKind::NegLex => a.inv_lex_cmp_range(b, begin, end),
            OrderKind::NegRevLex => a.rev_inv_lex_cmp_range(b, begin, end),
        }
    }
}

impl Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A total order on the exponent vectors of a ring.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TermOrder {
    /// One elementary order on all variables.
    Single(OrderKind),
    /// An elimination order: the variables `[0, split)` are compared with `first`,
    /// and only on a tie the variables `[split, nvars)` are compared with `second`.
    Block {
        first: OrderKind,
        second: OrderKind,
        split: usize,
        nvars: usize,
    },
    /// A weight matrix. The rows are tried in order and a full tie is
    /// broken by `tie_break`.
    Weighted {
        weights: Vec<Vec<i64>>,
        tie_break: OrderKind,
    },
}

impl Default for TermOrder {
    fn default() -> Self {
        TermOrder::Single(OrderKind::GRevLex)
    }
}

impl From<OrderKind> for TermOrder {
    fn from(kind: OrderKind) -> Self {
        TermOrder::Single(kind)
    }
}

impl TermOrder {
    pub fn new(kind: OrderKind) -> TermOrder {
        TermOrder::Single(kind)
    }

    pub fn from_code(code: u32) -> Result<TermOrder, PolynomialError> {
        Ok(TermOrder::Single(OrderKind::from_code(code)?))
    }

    pub fn block(
        first: OrderKind,
        second: OrderKind,
        split: usize,
        nvars: usize,
    ) -> Result<TermOrder, PolynomialError> {
        if split > nvars {
            return Err(PolynomialError::InvalidTermOrder(format!(
                "block split {} is larger than the number of variables {}",
                split, nvars
            )));
        }

        Ok(TermOrder::Block {
            first,
            second,
            split,
            nvars,
        })
    }

    /// Create a weight order. Every row must contain at least one non-zero weight.
    pub fn weighted(weights: Vec<Vec<i64>>) -> Result<TermOrder, PolynomialError> {
        if weights.is_empty() {
            return Err(PolynomialError::InvalidTermOrder(
                "empty weight matrix".into(),
            ));
        }

        for (i, row) in weights.iter().enumerate() {
            if row.iter().all(|w| *w == 0) {
                return Err(PolynomialError::InvalidTermOrder(format!(
                    "weight row {} is zero",
                    i
                )));
            }
        }

        Ok(TermOrder::Weighted {
            weights,
            tie_break: OrderKind::Lex,
        })
    }

    /// Returns `true` if the order is a well-order on the terms. A weight order is
    /// global when its first row is positive, or when no weight is negative and
    /// its tie break is global.
    pub fn is_global(&self) -> bool {
        match self {
            TermOrder::Single(k) => k.is_global(),
            TermOrder::Block { first, second, .. } => first.is_global() && second.is_global(),
            TermOrder::Weighted { weights, tie_break } => {
                weights[0].iter().all(|w| *w > 0)
                    || (weights.iter().flatten().all(|w| *w >= 0) && tie_break.is_global())
            }
        }
    }

    /// Compare two exponent vectors. `Greater` means that `a` is the larger term.
    #[inline]
    pub fn compare<E: Exponent>(&self, a: &ExpVector<E>, b: &ExpVector<E>) -> Ordering {
        match self {
            TermOrder::Single(k) => k.compare_range(a, b, 0, a.len()),
            TermOrder::Block {
                first,
                second,
                split,
                ..
            } => {
                let split = (*split).min(a.len());
                first
                    .compare_range(a, b, 0, split)
                    .then_with(|| second.compare_range(a, b, split, a.len()))
            }
            TermOrder::Weighted { weights, tie_break } => a
                .weight_rows_cmp(b, weights)
                .then_with(|| tie_break.compare_range(a, b, 0, a.len())),
        }
    }

    /// The comparison used to sort terms from high to low: `Less` means
    /// that `a` is sorted before `b`.
    #[inline]
    pub fn descend<E: Exponent>(&self, a: &ExpVector<E>, b: &ExpVector<E>) -> Ordering {
        self.compare(b, a)
    }

    /// The comparison used to sort terms from low to high.
    #[inline]
    pub fn ascend<E: Exponent>(&self, a: &ExpVector<E>, b: &ExpVector<E>) -> Ordering {
        self.compare(a, b)
    }

    pub fn descend_comparator<E: Exponent>(
        &self,
    ) -> impl Fn(&ExpVector<E>, &ExpVector<E>) -> Ordering + '_ {
        move |a, b| self.descend(a, b)
    }

    pub fn ascend_comparator<E: Exponent>(
        &self,
    ) -> impl Fn(&ExpVector<E>, &ExpVector<E>) -> Ordering + '_ {
        move |a, b| self.ascend(a, b)
    }

    /// The order for a ring with `k` new leading variables in front of the `r` existing
    /// ones. The new variables form the first block of an elimination order.
    pub fn extend(&self, r: usize, k: usize) -> TermOrder {
        if k == 0 {
            return self.clone();
        }

        match self {
            TermOrder::Single(kind) => TermOrder::Block {
                first: *kind,
                second: *kind,
                split: k,
                nvars: r + k,
            },
            TermOrder::Block {
                first,
                second,
                split,
                nvars,
            } => TermOrder::Block {
                first: *first,
                second: *second,
                split: split + k,
                nvars: nvars + k,
            },
            TermOrder::Weighted { weights, tie_break } => TermOrder::Weighted {
                weights: weights
                    .iter()
                    .map(|row| {
                        let mut new_row = vec![1; k];
                        new_row.extend_from_slice(row);
                        new_row
                    })
                    .collect(),
                tie_break: *tie_break,
            },
        }
    }

    /// The order restricted to the `len` variables starting at `k`.
    pub fn contract(&self, k: usize, len: usize) -> TermOrder {
        match self {
            TermOrder::Single(_) => self.clone(),
            TermOrder::Block {
                first,
                second,
                split,
                ..
            } => {
                if k + len <= *split {
                    TermOrder::Single(*first)
                } else if k >= *split {
                    TermOrder::Single(*second)
                } else {
                    TermOrder::Block {
                        first: *first,
                        second: *second,
                        split: split - k,
                        nvars: len,
                    }
                }
            }
            TermOrder::Weighted { weights, tie_break } => {
                let weights: Vec<Vec<i64>> = weights
                    .iter()
                    .map(|row| {
                        (k..k + len)
                            .map(|i| row.get(i).copied().unwrap_or(0))
                            .collect::<Vec<_>>()
                    })
                    .filter(|row| row.iter().any(|w| *w != 0))
                    .collect();

                if weights.is_empty() {
                    TermOrder::Single(*tie_break)
                } else {
                    TermOrder::Weighted {
                        weights,
                        tie_break: *tie_break,
                    }
                }
            }
        }
    }

    /// The number of leading variables that are reversed by [Self::reverse]
    /// with the same `partial` flag, or `None` if all variables are reversed.
    pub fn reversed_prefix(&self, partial: bool) -> Option<usize> {
        match self {
            TermOrder::Block { split, .. } if partial => Some(*split),
            _ => None,
        }
    }

    /// The order that compares reversed exponent vectors like `self` compares the
    /// original ones. With `partial` set, only the first block of an elimination order
    /// is reversed, see [Self::reversed_prefix]. Weight rows are reversed as a whole,
    /// so they must have one weight per variable, as in the order of a ring.
    pub fn reverse(&self, partial: bool) -> TermOrder {
        match self {
            TermOrder::Single(k) => TermOrder::Single(k.mirror()),
            TermOrder::Block {
                first,
                second,
                split,
                nvars,
            } => {
                if partial {
                    TermOrder::Block {
                        first: first.mirror(),
                        second: *second,
                        split: *split,
                        nvars: *nvars,
                    }
                } else {
                    TermOrder::Block {
                        first: second.mirror(),
                        second: first.mirror(),
                        split: nvars - split,
                        nvars: *nvars,
                    }
                }
            }
            TermOrder::Weighted { weights, tie_break } => TermOrder::Weighted {
                weights: weights
                    .iter()
                    .map(|row| row.iter().rev().copied().collect())
                    .collect(),
                tie_break: tie_break.mirror(),
            },
        }
    }
}

impl Display for TermOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermOrder::Single(k) => write!(f, "{}", k),
            TermOrder::Block {
                first,
                second,
                split,
                ..
            } => write!(f, "{}|{}|{}", first, split, second),
            TermOrder::Weighted { weights, .. } => write!(f, "W{:?}", weights),
        }
    }
}
