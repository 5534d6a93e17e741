//! Data structures and algebraic builders for propositional formulas.
//!
//! A [`Formula`] is an immutable value: every builder in this module
//! returns a fresh node rather than mutating an existing one. Set-valued
//! children (`Clause`, `CNF`, `Disjunction`, `Conjunction`) are kept
//! sorted and deduplicated by every builder, so insertion order is never
//! observable and two formulas built from the same multiset of children
//! compare equal via the derived [`PartialEq`]/[`Hash`] — no separate
//! canonicalization pass is needed.

use crate::error::Error;
use crate::intvar::IntVariable;

/// Prefix reserved for auxiliary variables introduced by
/// [`crate::tseytin::transform`]. A [`Formula::Variable`] or
/// [`IntVariable`] name starting with this prefix is rejected by their
/// respective constructors.
pub(crate) const AUX_PREFIX: &str = "__ts_";

/// Prefix for auxiliary variables standing in for a [`Formula::Disjunction`].
pub(crate) const AUX_DIS_PREFIX: &str = "__ts_dis_";

/// Prefix for auxiliary variables standing in for a [`Formula::Conjunction`].
pub(crate) const AUX_CON_PREFIX: &str = "__ts_con_";

/// Prefix for auxiliary variables standing in for a [`Formula::FormulaNegation`].
pub(crate) const AUX_NEG_PREFIX: &str = "__ts_neg_";

/// Returns whether `name` falls in the namespace reserved for Tseytin
/// auxiliary variables.
pub(crate) fn is_reserved_name(name: &str) -> bool {
    name.starts_with(AUX_PREFIX)
}

/// A propositional formula.
///
/// The subset `{Constant, Variable, LiteralNegation, EqConstTerm}` are
/// the formula's *literals*: nodes that carry a name and render to
/// exactly one signed solver variable (see [`is_literal`]). Every other
/// variant is a non-literal formula, including `EqVarTerm`, which looks
/// like a leaf (it only references two [`IntVariable`]s) but is not a
/// literal — it expands into a disjunction during
/// [`crate::tseytin::transform`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Formula {
    /// A boolean constant.
    Constant(bool),

    /// A named propositional variable.
    Variable(String),

    /// The literal `var == val` for a bounded integer variable named
    /// `var`. Its solver-level name is exactly `"{var}=={val}"` — this
    /// naming is load-bearing for callers that decode models back into
    /// integer assignments.
    EqConstTerm {
        /// The integer variable's name.
        var: String,
        /// The constant it is compared against.
        val: i64,
    },

    /// The negation of a literal. Always itself a literal.
    LiteralNegation(Box<Formula>),

    /// The negation of a non-literal formula.
    FormulaNegation(Box<Formula>),

    /// A disjunction all of whose children are literals.
    Clause(Vec<Formula>),

    /// A conjunction all of whose children are [`Formula::Clause`]s.
    CNF(Vec<Formula>),

    /// A disjunction of arbitrary sub-formulae (the non-canonical form).
    Disjunction(Vec<Formula>),

    /// A conjunction of arbitrary sub-formulae (the non-canonical form).
    Conjunction(Vec<Formula>),

    /// `lhs -> rhs`, kept as an explicit node and expanded during Tseytin.
    Implication(Box<Formula>, Box<Formula>),

    /// `lhs <-> rhs`, kept as an explicit node and expanded during Tseytin.
    ///
    /// Built only through [`iff`], which canonicalizes the operand order
    /// so that the relation's symmetry (`a <-> b` is `b <-> a`) is
    /// reflected in `Formula`'s derived equality and hashing.
    Equivalence(Box<Formula>, Box<Formula>),

    /// `lhs == rhs` for two bounded integer variables. Not a literal:
    /// expanded during Tseytin into a disjunction over the intersection
    /// of the two domains (see spec.md §4.2).
    ///
    /// Built only through [`crate::intvar::IntVariable::eq_var`], which
    /// canonicalizes the operand order so that `==`'s symmetry is
    /// reflected in `Formula`'s derived equality and hashing.
    EqVarTerm(IntVariable, IntVariable),
}

use Formula::*;

/// Sorts and deduplicates a formula's set-valued children.
///
/// Every builder in this module routes its children through this function
/// before constructing a set-valued variant, which is what gives set
/// semantics (order-independence, idempotence under duplication) to
/// [`Formula`]'s derived equality and hashing.
fn canon_set(mut items: Vec<Formula>) -> Vec<Formula> {
    items.sort();
    items.dedup();
    items
}

/// A human-readable name for a formula's variant, used in
/// [`Error::TypeMismatch`] messages.
fn variant_name(f: &Formula) -> &'static str {
    match f {
        Constant(_) => "Constant",
        Variable(_) => "Variable",
        EqConstTerm { .. } => "EqConstTerm",
        LiteralNegation(_) => "LiteralNegation",
        FormulaNegation(_) => "FormulaNegation",
        Clause(_) => "Clause",
        CNF(_) => "CNF",
        Disjunction(_) => "Disjunction",
        Conjunction(_) => "Conjunction",
        Implication(..) => "Implication",
        Equivalence(..) => "Equivalence",
        EqVarTerm(..) => "EqVarTerm",
    }
}

/// Returns whether `f` is a literal: a node that renders to exactly one
/// signed solver variable.
pub fn is_literal(f: &Formula) -> bool {
    matches!(
        f,
        Constant(_) | Variable(_) | EqConstTerm { .. } | LiteralNegation(_)
    )
}

impl Formula {
    /// Builds a boolean constant.
    pub fn constant(value: bool) -> Formula {
        Constant(value)
    }

    /// Builds a named variable.
    ///
    /// Fails with [`Error::ReservedName`] if `name` starts with the
    /// Tseytin auxiliary prefix or contains `"=="` (which would collide
    /// with the encoding of [`Formula::EqConstTerm`]).
    pub fn variable(name: impl Into<String>) -> Result<Formula, Error> {
        let name = name.into();
        if is_reserved_name(&name) || name.contains("==") {
            return Err(Error::ReservedName { name });
        }
        Ok(Variable(name))
    }

    /// Builds a clause directly from a list of literals.
    ///
    /// Fails with [`Error::TypeMismatch`] if any child is not a literal.
    /// Prefer [`or`] when building from arbitrary formulae — it never
    /// fails, since it picks the resulting shape itself.
    pub fn clause(items: Vec<Formula>) -> Result<Formula, Error> {
        for item in &items {
            if !is_literal(item) {
                return Err(Error::TypeMismatch {
                    expected: "literal",
                    found: variant_name(item),
                });
            }
        }
        Ok(Clause(canon_set(items)))
    }

    /// Builds a CNF directly from a list of clauses.
    ///
    /// Fails with [`Error::TypeMismatch`] if any child is not a
    /// [`Formula::Clause`]. Prefer [`and`] when building from arbitrary
    /// formulae.
    pub fn cnf(items: Vec<Formula>) -> Result<Formula, Error> {
        for item in &items {
            if !matches!(item, Clause(_)) {
                return Err(Error::TypeMismatch {
                    expected: "clause",
                    found: variant_name(item),
                });
            }
        }
        Ok(CNF(canon_set(items)))
    }

    /// Whether this formula is already in conjunctive normal form.
    pub fn is_cnf(&self) -> bool {
        matches!(self, CNF(_))
    }

    /// Converts this formula to CNF.
    ///
    /// Literals and clauses trivially promote (wrapped in a unit
    /// CNF/clause); `CNF` is the identity; every other node delegates to
    /// [`crate::tseytin::transform`] and conjoins a unit clause on the
    /// returned root literal with the returned side CNF.
    pub fn to_cnf(&self) -> Formula {
        match self {
            CNF(_) => self.clone(),
            Clause(_) => CNF(vec![self.clone()]),
            _ if is_literal(self) => CNF(vec![Clause(vec![self.clone()])]),
            _ => {
                let (root, side) = crate::tseytin::transform(self);
                and_cnf(CNF(vec![Clause(vec![root])]), side)
            }
        }
    }
}

/// Conjoins two CNFs by taking the (deduplicated) union of their clauses.
pub(crate) fn and_cnf(a: Formula, b: Formula) -> Formula {
    let (CNF(mut clauses_a), CNF(clauses_b)) = (a, b) else {
        panic!("and_cnf requires two CNFs");
    };
    clauses_a.extend(clauses_b);
    CNF(canon_set(clauses_a))
}

/// Negates a formula.
///
/// Returns [`Formula::LiteralNegation`] if `f` is a literal, otherwise
/// [`Formula::FormulaNegation`]. Double negation is eliminated at
/// construction: `not(not(f)) == f`, and `not(Constant(b)) ==
/// Constant(!b)` (a `LiteralNegation` of a `Constant` is never
/// constructed).
pub fn not(f: Formula) -> Formula {
    match f {
        Constant(b) => Constant(!b),
        LiteralNegation(inner) => *inner,
        FormulaNegation(inner) => *inner,
        other if is_literal(&other) => LiteralNegation(Box::new(other)),
        other => FormulaNegation(Box::new(other)),
    }
}

/// Flattens `f` into the list of children an `or` should merge: the
/// children of `f` itself if `f` is already a [`Formula::Clause`] or
/// [`Formula::Disjunction`], or the singleton `[f]` otherwise.
fn or_children(f: Formula) -> Vec<Formula> {
    match f {
        Clause(children) | Disjunction(children) => children,
        other => vec![other],
    }
}

/// Flattens `f` into the list of children an `and` should merge,
/// analogously to [`or_children`].
fn and_children(f: Formula) -> Vec<Formula> {
    match f {
        CNF(children) | Conjunction(children) => children,
        other => vec![other],
    }
}

/// Builds the disjunction of `a` and `b`.
///
/// If both are literals, the result is a [`Formula::Clause`]; if either
/// side is already a `Clause`/`Disjunction`, its children are flattened
/// into the result rather than nested (`or(or(a,b), or(c,d)) ==
/// or(a,b,c,d)`). Otherwise the result is a [`Formula::Disjunction`].
/// Children are deduplicated as a set, so `or(a,a) == or(a)` and
/// `or(a,b) == or(b,a)`.
///
/// This never fails: unlike [`Formula::clause`], `or` always picks a
/// shape that fits its actual operands.
pub fn or(a: Formula, b: Formula) -> Formula {
    let mut children = or_children(a);
    children.extend(or_children(b));
    let children = canon_set(children);
    if children.iter().all(is_literal) {
        Clause(children)
    } else {
        Disjunction(children)
    }
}

/// Builds the conjunction of `a` and `b`, dually to [`or`]: a
/// [`Formula::CNF`] if every resulting child is a [`Formula::Clause`],
/// otherwise a [`Formula::Conjunction`].
pub fn and(a: Formula, b: Formula) -> Formula {
    let mut children = and_children(a);
    children.extend(and_children(b));
    let children = canon_set(children);
    if children.iter().all(|c| matches!(c, Clause(_))) {
        CNF(children)
    } else {
        Conjunction(children)
    }
}

/// Builds `lhs -> rhs`.
pub fn implies(lhs: Formula, rhs: Formula) -> Formula {
    Implication(Box::new(lhs), Box::new(rhs))
}

/// Builds `lhs <-> rhs`.
///
/// `<->` is symmetric, so the operand pair is canonicalized (smaller
/// operand first, by `Formula`'s derived `Ord`) before constructing the
/// node: `iff(a, b) == iff(b, a)` and the two calls hash identically,
/// which in turn lets `tseytin::transform`'s structural cache share one
/// auxiliary between them instead of allocating two.
pub fn iff(lhs: Formula, rhs: Formula) -> Formula {
    let (a, b) = if lhs <= rhs { (lhs, rhs) } else { (rhs, lhs) };
    Equivalence(Box::new(a), Box::new(b))
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_list(f: &mut std::fmt::Formatter<'_>, kind: &str, children: &[Formula]) -> std::fmt::Result {
            write!(f, "{kind}(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{child}")?;
            }
            write!(f, ")")
        }
        match self {
            Constant(b) => write!(f, "{b}"),
            Variable(name) => write!(f, "{name}"),
            EqConstTerm { var, val } => write!(f, "{var}=={val}"),
            LiteralNegation(inner) | FormulaNegation(inner) => write!(f, "Not({inner})"),
            Clause(children) => write_list(f, "Clause", children),
            CNF(children) => write_list(f, "CNF", children),
            Disjunction(children) => write_list(f, "Or", children),
            Conjunction(children) => write_list(f, "And", children),
            Implication(lhs, rhs) => write!(f, "({lhs} -> {rhs})"),
            Equivalence(lhs, rhs) => write!(f, "({lhs} <-> {rhs})"),
            EqVarTerm(lhs, rhs) => write!(f, "{}=={}", lhs.name(), rhs.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Formula {
        Formula::variable(name).unwrap()
    }

    #[test]
    fn canonical_flattening() {
        let (a, b, c, d) = (var("a"), var("b"), var("c"), var("d"));
        let lhs = or(or(a.clone(), b.clone()), or(c.clone(), d.clone()));
        let rhs = or(a.clone(), or(b.clone(), or(c.clone(), d.clone())));
        assert_eq!(lhs, rhs);

        let lhs = and(and(a.clone(), b.clone()), and(c.clone(), d.clone()));
        let rhs = and(a, and(b, and(c, d)));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn double_negation() {
        let a = var("a");
        assert_eq!(not(not(a.clone())), a);

        let nested = or(a.clone(), var("b"));
        assert_eq!(not(not(nested.clone())), nested);
    }

    #[test]
    fn commutativity_and_idempotence() {
        let (a, b) = (var("a"), var("b"));
        assert_eq!(or(a.clone(), b.clone()), or(b.clone(), a.clone()));
        assert_eq!(or(a.clone(), a.clone()), Clause(vec![a.clone()]));
        assert_eq!(and(a.clone(), b.clone()), and(b, a.clone()));
        assert_eq!(and(a.clone(), a.clone()), Conjunction(vec![a]));
    }

    #[test]
    fn constant_folding_at_the_boundary() {
        assert_eq!(Formula::constant(true), not(Formula::constant(false)));
    }

    #[test]
    fn empty_disjunction_and_conjunction() {
        // An empty `Disjunction` is false; its `to_cnf()` must not panic and
        // must produce a `CNF` (the exact auxiliary encoding is an
        // implementation detail of `tseytin::transform`, covered directly in
        // that module's tests).
        assert!(Disjunction(vec![]).to_cnf().is_cnf());
        // `CNF` is the identity under `to_cnf`, including the empty CNF
        // (vacuously true, zero clauses).
        assert_eq!(CNF(vec![]).to_cnf(), CNF(vec![]));
    }

    #[test]
    fn or_promotes_to_clause_only_when_all_literals() {
        let (a, b) = (var("a"), var("b"));
        let non_literal = and(a.clone(), b.clone());
        assert!(matches!(or(a.clone(), non_literal.clone()), Disjunction(_)));
        assert!(matches!(or(a, b), Clause(_)));
    }

    #[test]
    fn reserved_names_are_rejected() {
        assert!(Formula::variable("__ts_dis_1").is_err());
        assert!(Formula::variable("x==3").is_err());
        assert!(Formula::variable("ordinary").is_ok());
    }

    #[test]
    fn raw_clause_and_cnf_constructors_reject_bad_shapes() {
        let non_literal = and(var("a"), var("b"));
        assert!(Formula::clause(vec![non_literal.clone()]).is_err());
        assert!(Formula::cnf(vec![non_literal]).is_err());
        assert!(Formula::cnf(vec![var("a")]).is_err());
    }

    #[test]
    fn strict_variant_equality() {
        // Regression for the Open Questions in spec.md §9: equality must
        // never cross variant boundaries, even when the two variants wrap
        // the same children.
        let (a, b) = (var("a"), var("b"));
        let conj = Conjunction(vec![a.clone(), b.clone()]);
        let disj = Disjunction(vec![a.clone(), b.clone()]);
        assert_ne!(conj, disj);

        let impl_ab = implies(a.clone(), b.clone());
        let iff_ab = iff(a, b);
        assert_ne!(impl_ab, iff_ab);
    }

    #[test]
    fn iff_is_symmetric() {
        // `<->` is a symmetric relation: swapping operands must produce an
        // equal (and equally-hashing) node, not a distinct one.
        let (a, b) = (var("a"), var("b"));
        assert_eq!(iff(a.clone(), b.clone()), iff(b, a));
    }
}
