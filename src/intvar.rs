//! The integer-variable layer.
//!
//! A [`IntVariable`] is a named, finitely bounded integer. Its value is
//! never represented directly in a [`crate::formula::Formula`] — instead,
//! equality to a constant ([`IntVariable::eq_const`]) or to another integer
//! variable ([`IntVariable::eq_var`]) produces a `Formula`, and
//! [`IntVariable::specification`] produces the one-hot CNF that pins down
//! exactly one of those equalities as true.

use crate::error::Error;
use crate::formula::{is_reserved_name, Formula};

/// A named integer variable with an inclusive `[min, max]` domain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVariable {
    name: String,
    min: i64,
    max: i64,
}

impl IntVariable {
    /// Creates a new integer variable.
    ///
    /// Fails with [`Error::ReservedName`] if `name` starts with the
    /// Tseytin auxiliary prefix or contains `"=="` (which would collide
    /// with the `"{name}=={value}"` encoding of [`Formula::EqConstTerm`]),
    /// and with [`Error::InvalidDomain`] if `min > max`.
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Result<Self, Error> {
        let name = name.into();
        if is_reserved_name(&name) || name.contains("==") {
            return Err(Error::ReservedName { name });
        }
        if min > max {
            return Err(Error::InvalidDomain { name, min, max });
        }
        Ok(Self { name, min, max })
    }

    /// This variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The inclusive lower bound of this variable's domain.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// The inclusive upper bound of this variable's domain.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Every value in this variable's domain, in ascending order.
    pub fn domain(&self) -> impl Iterator<Item = i64> + '_ {
        self.min..=self.max
    }

    /// Builds the literal `self == val` (an [`Formula::EqConstTerm`]).
    ///
    /// `val` need not lie in `[min, max]`: the literal is well-formed
    /// regardless, though it is only constrained by
    /// [`IntVariable::specification`] when it does.
    pub fn eq_const(&self, val: i64) -> Formula {
        Formula::EqConstTerm {
            var: self.name.clone(),
            val,
        }
    }

    /// Builds the formula `self == other` (an [`Formula::EqVarTerm`]).
    ///
    /// Not a literal: [`crate::tseytin::transform`] expands it into a
    /// disjunction over the intersection of the two domains.
    ///
    /// `==` is symmetric, so the pair is canonicalized (smaller variable
    /// first, by `IntVariable`'s derived `Ord`) before constructing the
    /// node: `x.eq_var(&y) == y.eq_var(&x)`, matching the original
    /// implementation's symmetric `EqVarTerm` equality/hashing and letting
    /// Tseytin's structural cache share one auxiliary between the two
    /// orderings.
    pub fn eq_var(&self, other: &IntVariable) -> Formula {
        let (a, b) = if self <= other {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };
        Formula::EqVarTerm(a, b)
    }

    /// The one-hot domain specification: a CNF satisfied under a boolean
    /// assignment iff exactly one of `self == v` (for `v` in `[min, max]`)
    /// is true.
    ///
    /// Encoded with the pairwise at-most-one scheme: one at-least-one
    /// clause plus one binary clause per pair of values, for
    /// `k * (k - 1) / 2 + 1` clauses over a domain of size `k`. Adequate
    /// for the small domains this layer targets (e.g. `k <= 9` for
    /// Sudoku); a commander or ladder encoding would scale better to large
    /// domains but is not implemented here.
    pub fn specification(&self) -> Formula {
        let values: Vec<Formula> = self.domain().map(|v| self.eq_const(v)).collect();
        log::debug!(
            "building one-hot specification for '{}' over {} values",
            self.name,
            values.len()
        );

        let mut clauses = Vec::with_capacity(values.len() * (values.len() - 1) / 2 + 1);
        clauses.push(Formula::clause(values.clone()).expect("EqConstTerm literals only"));
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                let pair = vec![
                    crate::formula::not(values[i].clone()),
                    crate::formula::not(values[j].clone()),
                ];
                clauses.push(Formula::clause(pair).expect("negated literals only"));
            }
        }
        Formula::cnf(clauses).expect("clauses only")
    }
}

impl std::fmt::Display for IntVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_domain() {
        assert_eq!(
            IntVariable::new("v", 5, 1),
            Err(Error::InvalidDomain {
                name: "v".to_string(),
                min: 5,
                max: 1
            })
        );
    }

    #[test]
    fn rejects_reserved_and_colliding_names() {
        assert!(IntVariable::new("__ts_dis_3", 0, 1).is_err());
        assert!(IntVariable::new("x==3", 0, 1).is_err());
    }

    #[test]
    fn specification_has_k_choose_2_plus_one_clauses() {
        let v = IntVariable::new("v", 1, 9).unwrap();
        let spec = v.specification();
        let Formula::CNF(clauses) = spec else {
            panic!("expected CNF");
        };
        assert_eq!(clauses.len(), 9 * 8 / 2 + 1);
    }

    #[test]
    fn eq_var_is_symmetric() {
        // `==` is a symmetric relation: swapping operands must produce an
        // equal (and equally-hashing) `EqVarTerm`, not a distinct one.
        let x = IntVariable::new("x", 1, 3).unwrap();
        let y = IntVariable::new("y", 2, 4).unwrap();
        assert_eq!(x.eq_var(&y), y.eq_var(&x));
    }

    #[test]
    fn specification_degenerate_single_value() {
        let v = IntVariable::new("v", 4, 4).unwrap();
        let spec = v.specification();
        let Formula::CNF(clauses) = spec else {
            panic!("expected CNF");
        };
        assert_eq!(clauses.len(), 1);
    }
}
