//! Commutation relations of solvable polynomial rings.
//!
//! A solvable ring has the same terms as a commutative polynomial ring, but the product
//! of two variables may be a polynomial instead of a term. For every pair of variables
//! `x_j` and `x_i` with `j > i`, the product `x_j * x_i` can be prescribed by a rule
//! `x_j * x_i = c * x_i x_j + p`, where `x_i x_j` is the standard (commutative) term and
//! `p` consists of smaller terms. Products without a rule commute.
use std::fmt::Display;
use std::sync::{Arc, RwLock};

use ahash::HashMap;
use tracing::{debug, instrument, trace};

use crate::domains::Ring;
use crate::error::PolynomialError;

use super::exponent::{ExpVector, VariableSet};
use super::polynomial::{GenPolynomial, PolynomialBuilder};
use super::ring::GenPolynomialRing;
use super::Exponent;

/// A stored rule `e * f = p`. The right-hand side is kept as a term list,
/// since the table is owned by the ring the polynomial would refer to.
#[derive(Clone, Debug)]
struct Relation<C: Ring, E: Exponent> {
    e: ExpVector<E>,
    f: ExpVector<E>,
    p: Vec<(ExpVector<E>, C::Element)>,
}

/// The result of a table lookup for `e * f`: the product equals `x^e * p * x^f`,
/// where `e` and `f` are the parts of the query that the matched rule did not cover.
#[derive(Clone, Debug)]
pub struct TableRelation<C: Ring, E: Exponent> {
    pub e: ExpVector<E>,
    pub f: ExpVector<E>,
    pub p: GenPolynomial<C, E>,
}

/// The commutation rules of a solvable ring, indexed by the variables the two
/// factors depend on. Rules for the same key are kept in insertion order.
///
/// The table is shared between the ring and all its polynomials, and may
/// be updated through a shared reference.
pub struct RelationTable<C: Ring, E: Exponent = i64> {
    rules: RwLock<HashMap<(VariableSet, VariableSet), Vec<Relation<C, E>>>>,
}

impl<C: Ring, E: Exponent> Default for RelationTable<C, E> {
    fn default() -> Self {
        RelationTable {
            rules: RwLock::new(HashMap::default()),
        }
    }
}

impl<C: Ring, E: Exponent> std::fmt::Debug for RelationTable<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationTable")
            .field("size", &self.size())
            .finish()
    }
}

impl<C: Ring, E: Exponent> Display for RelationTable<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules = self.rules.read().unwrap_or_else(|e| e.into_inner());
        let mut first = true;
        write!(f, "[")?;
        for r in rules.values().flatten() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{} * {} = {} terms", r.e, r.f, r.p.len())?;
        }
        write!(f, "]")
    }
}

impl<C: Ring, E: Exponent> RelationTable<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored rules.
    pub fn size(&self) -> usize {
        self.rules
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(|r| r.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn key(e: &ExpVector<E>, f: &ExpVector<E>) -> (VariableSet, VariableSet) {
        (e.dependency_on_variables(), f.dependency_on_variables())
    }

    /// Store the rule `e * f = p`, where `e` and `f` are powers of single variables.
    /// The leading term of `p` must be `e + f`.
    ///
    /// When `e` belongs to a lower variable than `f`, the product `e * f` is the standard
    /// term and the rule is read as a definition of that term. It is then stored as
    /// the rule for `f * e` instead.
    pub fn update(
        &self,
        ring: &GenPolynomialRing<C, E>,
        e: &ExpVector<E>,
        f: &ExpVector<E>,
        p: &GenPolynomial<C, E>,
    ) -> Result<(), PolynomialError> {
        if p.is_zero() {
            return Err(PolynomialError::InconsistentRelation(format!(
                "{} * {} = 0",
                e, f
            )));
        }

        if e.len() != ring.nvars() || f.len() != ring.nvars() {
            return Err(PolynomialError::DimensionMismatch {
                expected: ring.nvars(),
                found: e.len().max(f.len()),
            });
        }

        let de = e.dependency_on_variables();
        let df = f.dependency_on_variables();
        if de.len() != 1 || df.len() != 1 {
            return Err(PolynomialError::InconsistentRelation(format!(
                "{} * {}: a rule must relate powers of two single variables",
                e, f
            )));
        }
        if de[0] == df[0] {
            return Err(PolynomialError::InconsistentRelation(format!(
                "{} * {}: powers of the same variable commute",
                e, f
            )));
        }

        let ef = e.sum(f)?;
        if p.leading_exp_vector() != Some(&ef) {
            return Err(PolynomialError::InconsistentRelation(format!(
                "{} * {}: the leading term of {} is not {}",
                e, f, p, ef
            )));
        }

        let field = ring.coefficient_ring();
        let mut terms: Vec<_> = p
            .into_iter()
            .map(|t| (t.exponent.clone(), t.coefficient.clone()))
            .collect();

        let (e, f) = if de[0] < df[0] {
            // x_i^a * x_j^b = c * x_i^a x_j^b + r, so x_j^b * x_i^a = (x_i^a x_j^b - r) / c
            let lc = &terms[0].1;
            let inv = field.inv(lc).map_err(|_| {
                PolynomialError::InconsistentRelation(format!(
                    "{} * {}: cannot reorient a rule with leading coefficient {}",
                    e,
                    f,
                    field.printer(lc)
                ))
            })?;

            terms[0].1 = inv.clone();
            for t in &mut terms[1..] {
                t.1 = field.neg(&field.mul(&inv, &t.1));
            }

            debug!("Reoriented relation {} * {} to {} * {}", e, f, f, e);
            (f, e)
        } else {
            (e, f)
        };

        let mut rules = self.rules.write().unwrap_or_else(|e| e.into_inner());
        let list = rules.entry(Self::key(e, f)).or_default();

        let rule = Relation {
            e: e.clone(),
            f: f.clone(),
            p: terms,
        };

        if let Some(r) = list.iter_mut().find(|r| r.e == *e && r.f == *f) {
            *r = rule;
        } else {
            list.push(rule);
        }

        Ok(())
    }

    /// Store the rule `x_j * x_i = p` for the variables `j` and `i`.
    pub fn update_polynomial(
        &self,
        ring: &GenPolynomialRing<C, E>,
        j: usize,
        i: usize,
        p: &GenPolynomial<C, E>,
    ) -> Result<(), PolynomialError> {
        if i >= ring.nvars() || j >= ring.nvars() {
            return Err(PolynomialError::DimensionMismatch {
                expected: ring.nvars(),
                found: i.max(j) + 1,
            });
        }

        let one = E::try_from_i64(1)?;
        self.update(
            ring,
            &ExpVector::univariate(ring.nvars(), j, one),
            &ExpVector::univariate(ring.nvars(), i, one),
            p,
        )
    }

    /// Find the rule for `e * f`. The first stored rule whose factors divide `e`
    /// and `f` is used, and the remaining powers are returned alongside it.
    /// Without a matching rule, the factors commute.
    pub fn lookup(
        &self,
        ring: &Arc<GenPolynomialRing<C, E>>,
        e: &ExpVector<E>,
        f: &ExpVector<E>,
    ) -> Result<TableRelation<C, E>, PolynomialError> {
        let rules = self.rules.read().unwrap_or_else(|e| e.into_inner());

        if let Some(list) = rules.get(&Self::key(e, f)) {
            for r in list {
                if e.multiple_of(&r.e) && f.multiple_of(&r.f) {
                    return Ok(TableRelation {
                        e: e.subtract(&r.e)?,
                        f: f.subtract(&r.f)?,
                        p: GenPolynomial::from_sorted(
                            ring,
                            r.p.iter().map(|t| t.0.clone()).collect(),
                            r.p.iter().map(|t| t.1.clone()).collect(),
                        ),
                    });
                }
            }
        }

        trace!("No relation for {} * {}, using the commutative product", e, f);
        let zero = ring.zero_exponent().clone();
        Ok(TableRelation {
            e: zero.clone(),
            f: zero,
            p: ring.value_of_term(ring.coefficient_ring().one(), e.sum(f)?)?,
        })
    }

    /// Map every rule into another ring with the exponent map `map`. Rules for which
    /// `map` fails are dropped. The rules are stored again through [Self::update], so
    /// that they are oriented correctly in the new ring.
    pub(crate) fn remap(
        &self,
        ring: &Arc<GenPolynomialRing<C, E>>,
        map: impl Fn(&ExpVector<E>) -> Option<ExpVector<E>>,
    ) -> Result<RelationTable<C, E>, PolynomialError> {
        let new_table = RelationTable::new();
        let rules = self.rules.read().unwrap_or_else(|e| e.into_inner());

        'next: for r in rules.values().flatten() {
            let (Some(e), Some(f)) = (map(&r.e), map(&r.f)) else {
                debug!("Dropped relation {} * {}", r.e, r.f);
                continue;
            };

            let mut b = PolynomialBuilder::new(ring);
            for (exp, c) in &r.p {
                let Some(exp) = map(exp) else {
                    debug!("Dropped relation {} * {}", r.e, r.f);
                    continue 'next;
                };
                b.add_term(exp, c.clone());
            }

            new_table.update(ring, &e, &f, &b.freeze())?;
        }

        Ok(new_table)
    }

    /// Returns `true` if some rule involves one of the variables for which `test` holds.
    pub(crate) fn involves(&self, test: impl Fn(usize) -> bool) -> bool {
        let rules = self.rules.read().unwrap_or_else(|e| e.into_inner());
        rules.values().flatten().any(|r| {
            std::iter::once(&r.e)
                .chain(std::iter::once(&r.f))
                .chain(r.p.iter().map(|t| &t.0))
                .any(|e| e.dependency_on_variables().iter().any(|v| test(*v)))
        })
    }
}

impl<C: Ring, E: Exponent> GenPolynomialRing<C, E> {
    /// Store the relation `x_j * x_i = p` in the table of this ring.
    pub fn add_relation(
        &self,
        j: usize,
        i: usize,
        p: &GenPolynomial<C, E>,
    ) -> Result<(), PolynomialError> {
        match self.relation_table() {
            Some(t) => t.update_polynomial(self, j, i, p),
            None => Err(PolynomialError::InconsistentRelation(format!(
                "the ring {} is commutative",
                self
            ))),
        }
    }

    /// Multiply two polynomials with the relations of `table`. Coefficients
    /// are assumed to commute with the variables.
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn multiply_solvable(
        self: &Arc<Self>,
        table: &RelationTable<C, E>,
        a: &GenPolynomial<C, E>,
        b: &GenPolynomial<C, E>,
    ) -> Result<GenPolynomial<C, E>, PolynomialError> {
        if a.is_zero() || b.is_zero() {
            return Ok(self.zero());
        }

        if a.is_constant() || b.is_constant() {
            return a.multiply_commutative(b);
        }

        let field = self.coefficient_ring();
        let mut res = PolynomialBuilder::new(self);
        for t1 in a {
            for t2 in b {
                let p = self.multiply_terms(table, t1.exponent, t2.exponent)?;
                for t in &p {
                    res.add_term(
                        t.exponent.clone(),
                        field.mul(&field.mul(t1.coefficient, t.coefficient), t2.coefficient),
                    );
                }
            }
        }

        Ok(res.freeze())
    }

    /// The product `x^e * x^f` of two terms with coefficient one.
    fn multiply_terms(
        self: &Arc<Self>,
        table: &RelationTable<C, E>,
        e: &ExpVector<E>,
        f: &ExpVector<E>,
    ) -> Result<GenPolynomial<C, E>, PolynomialError> {
        let one = self.coefficient_ring().one();

        let de = e.dependency_on_variables();
        let df = f.dependency_on_variables();
        let (Some(&l), Some(&m)) = (de.last(), df.first()) else {
            return self.value_of_term(one, e.sum(f)?);
        };

        if l <= m {
            return self.value_of_term(one, e.sum(f)?);
        }

        // e = e1 * x_l^a and f = x_m^b * f1
        let e2 = ExpVector::univariate(e.len(), l, e.get(l));
        let f2 = ExpVector::univariate(f.len(), m, f.get(m));
        let e1 = e.subtract(&e2)?;
        let f1 = f.subtract(&f2)?;

        let rel = table.lookup(self, &e2, &f2)?;

        let mut core = rel.p;
        if !rel.e.is_zero() {
            let left = self.value_of_term(one.clone(), rel.e)?;
            core = self.multiply_solvable(table, &left, &core)?;
        }
        if !rel.f.is_zero() {
            let right = self.value_of_term(one.clone(), rel.f)?;
            core = self.multiply_solvable(table, &core, &right)?;
        }

        if !e1.is_zero() {
            let left = self.value_of_term(one.clone(), e1)?;
            core = self.multiply_solvable(table, &left, &core)?;
        }
        if !f1.is_zero() {
            let right = self.value_of_term(one, f1)?;
            core = self.multiply_solvable(table, &core, &right)?;
        }

        Ok(core)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::rational::{Rational, Q},
        error::PolynomialError,
        poly::{
            exponent::ExpVector,
            ring::GenPolynomialRing,
            term_order::{OrderKind, TermOrder},
        },
    };

    fn weyl() -> Arc<GenPolynomialRing<Q>> {
        let r = GenPolynomialRing::<_, i64>::new_solvable(
            Q,
            2,
            TermOrder::new(OrderKind::GrLex),
            &["x", "y"],
        )
        .unwrap();
        let p = &r.univariate(0, 1) * &r.univariate(1, 1) - r.one();
        r.add_relation(1, 0, &p).unwrap();
        r
    }

    #[test]
    fn weyl_products() {
        let r = weyl();
        let x = r.univariate(0, 1);
        let y = r.univariate(1, 1);

        assert_eq!(x.multiply(&y).unwrap().to_string(), "x*y");
        assert_eq!(y.multiply(&x).unwrap().to_string(), "x*y-1");

        // y * x^2 = x^2 y - 2x
        let yx2 = y.multiply(&x.pow(2).unwrap()).unwrap();
        assert_eq!(yx2.to_string(), "x^2*y-2*x");

        // y^2 * x = x y^2 - 2y
        let y2x = y.pow(2).unwrap().multiply(&x).unwrap();
        assert_eq!(y2x.to_string(), "x*y^2-2*y");
    }

    #[test]
    fn associativity() {
        let r = weyl();
        let x = r.univariate(0, 1);
        let y = r.univariate(1, 1);
        let a = &y + &r.from_integer(2);
        let b = &x * &y;
        let c = x.pow(2).unwrap() - y.clone();

        let ab_c = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let a_bc = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        assert_eq!(ab_c, a_bc);
    }

    #[test]
    fn reoriented_rule() {
        let r = GenPolynomialRing::<_, i64>::new_solvable(
            Q,
            2,
            TermOrder::new(OrderKind::GrLex),
            &["x", "y"],
        )
        .unwrap();
        // x * y = x y + 1 stated for the standard term gives y * x = x y - 1
        let p = &r.univariate(0, 1) * &r.univariate(1, 1) + r.one();
        r.add_relation(0, 1, &p).unwrap();

        let x = r.univariate(0, 1);
        let y = r.univariate(1, 1);
        assert_eq!(y.multiply(&x).unwrap().to_string(), "x*y-1");
        assert_eq!(r.relation_table().unwrap().size(), 1);
    }

    #[test]
    fn rejected_rules() {
        let r = GenPolynomialRing::<_, i64>::new_solvable(
            Q,
            2,
            TermOrder::new(OrderKind::GrLex),
            &["x", "y"],
        )
        .unwrap();
        let x = r.univariate(0, 1);
        assert!(matches!(
            r.add_relation(1, 0, &x),
            Err(PolynomialError::InconsistentRelation(_))
        ));
        assert!(matches!(
            r.add_relation(0, 0, &x.pow(2).unwrap()),
            Err(PolynomialError::InconsistentRelation(_))
        ));
        assert!(matches!(
            r.add_relation(1, 0, &r.zero()),
            Err(PolynomialError::InconsistentRelation(_))
        ));

        let c = GenPolynomialRing::<_, i64>::new(Q, 2, TermOrder::default(), &["x", "y"]).unwrap();
        assert!(c.add_relation(1, 0, &c.one()).is_err());
    }

    #[test]
    fn lookup_without_rule_commutes() {
        let r = weyl();
        let t = r.relation_table().unwrap();
        let e = ExpVector::new(&[0, 2]).unwrap();
        let f = ExpVector::new(&[3, 0]).unwrap();
        let rel = t.lookup(&r, &f, &e).unwrap();
        assert!(rel.e.is_zero() && rel.f.is_zero());
        assert_eq!(
            rel.p.leading_exp_vector(),
            Some(&ExpVector::new(&[3, 2]).unwrap())
        );

        let rel = t.lookup(&r, &e, &f).unwrap();
        assert_eq!(rel.e, ExpVector::<i64>::new(&[0, 1]).unwrap());
        assert_eq!(rel.f, ExpVector::<i64>::new(&[2, 0]).unwrap());
        assert_eq!(
            rel.p.coefficient(&ExpVector::new(&[0, 0]).unwrap()),
            Rational::from(-1)
        );
    }
}
