//! The Tseytin transformation: converting an arbitrary [`Formula`] into an
//! equisatisfiable CNF by introducing one fresh auxiliary variable per
//! non-literal subformula.
//!
//! [`transform`] is the only entry point. It returns `(root, side)`: a
//! literal `root` and a CNF `side` such that any satisfying assignment of
//! `side` with `root` forced true extends to a satisfying assignment of
//! the input formula, and vice versa — equisatisfiability, not logical
//! equivalence, since the auxiliaries are existentially quantified.

use rustc_hash::FxHashMap;

use crate::formula::{and_cnf, is_literal, not, Formula};
use crate::formula::{AUX_CON_PREFIX, AUX_DIS_PREFIX, AUX_NEG_PREFIX};

/// Transforms `f` into `(root_literal, side_cnf)`.
///
/// Structurally identical subformulae encountered anywhere during this
/// call share a single auxiliary variable: a content-addressed cache
/// keyed on the subformula itself (not on a hash of it) hands out one
/// fresh name per unique subformula, which gives free common-subformula
/// elimination without the collision risk of deriving the name from a
/// structural hash directly.
pub fn transform(f: &Formula) -> (Formula, Formula) {
    let mut ctx = Context::default();
    ctx.transform(f)
}

#[derive(Default)]
struct Context {
    cache: FxHashMap<Formula, (Formula, Formula)>,
    next_dis: u64,
    next_con: u64,
    next_neg: u64,
}

impl Context {
    fn transform(&mut self, f: &Formula) -> (Formula, Formula) {
        if is_literal(f) {
            return (f.clone(), Formula::CNF(vec![]));
        }
        if let Some(cached) = self.cache.get(f) {
            return cached.clone();
        }
        let result = match f {
            Formula::Disjunction(children) => self.transform_disjunction(children),
            Formula::Conjunction(children) => self.transform_conjunction(children),
            Formula::FormulaNegation(inner) => self.transform_negation(inner),
            Formula::Implication(lhs, rhs) => {
                let reduced = crate::formula::or(not((**lhs).clone()), (**rhs).clone());
                self.transform(&reduced)
            }
            Formula::Equivalence(lhs, rhs) => {
                let forward = crate::formula::implies((**lhs).clone(), (**rhs).clone());
                let backward = crate::formula::implies((**rhs).clone(), (**lhs).clone());
                let reduced = crate::formula::and(forward, backward);
                self.transform(&reduced)
            }
            Formula::EqVarTerm(lhs, rhs) => self.transform_eq_var(lhs, rhs),
            Formula::Clause(children) => {
                // A clause is already a disjunction of literals; route it
                // through the same encoding as `Disjunction` so a root
                // literal standing for it can be used as a term by a
                // surrounding `CNF`/`Conjunction`.
                self.transform_disjunction(children)
            }
            Formula::CNF(clauses) => {
                // Used only when a CNF appears nested under a parent that needs
                // a single root literal (callers normally short-circuit this
                // case via `Formula::to_cnf`). Introduce a root standing for
                // the conjunction of the CNF's own clauses.
                self.transform_conjunction(clauses)
            }
            _ => unreachable!("literals are handled above"),
        };
        self.cache.insert(f.clone(), result.clone());
        result
    }

    fn fresh(prefix: &str, counter: &mut u64) -> Formula {
        let name = format!("{prefix}{counter}");
        *counter += 1;
        Formula::Variable(name)
    }

    fn transform_disjunction(&mut self, children: &[Formula]) -> (Formula, Formula) {
        let mut terms = Vec::with_capacity(children.len());
        let mut side = Formula::CNF(vec![]);
        for child in children {
            let (t, psi) = self.transform(child);
            side = and_cnf(side, psi);
            terms.push(t);
        }
        let s = Self::fresh(AUX_DIS_PREFIX, &mut self.next_dis);
        log::debug!("allocated {s} for disjunction of {} terms", terms.len());

        let mut long_clause = terms.clone();
        long_clause.push(not(s.clone()));
        let long_clause = Formula::clause(long_clause).expect("literals only");

        let mut clauses = vec![long_clause];
        for t in &terms {
            let bin = Formula::clause(vec![s.clone(), not(t.clone())]).expect("literals only");
            clauses.push(bin);
        }
        let encoding = Formula::cnf(clauses).expect("clauses only");
        (s, and_cnf(encoding, side))
    }

    fn transform_conjunction(&mut self, children: &[Formula]) -> (Formula, Formula) {
        let mut terms = Vec::with_capacity(children.len());
        let mut side = Formula::CNF(vec![]);
        for child in children {
            let (t, psi) = self.transform(child);
            side = and_cnf(side, psi);
            terms.push(t);
        }
        let s = Self::fresh(AUX_CON_PREFIX, &mut self.next_con);
        log::debug!("allocated {s} for conjunction of {} terms", terms.len());

        let mut long_clause: Vec<Formula> = terms.iter().map(|t| not(t.clone())).collect();
        long_clause.push(s.clone());
        let long_clause = Formula::clause(long_clause).expect("literals only");

        let mut clauses = vec![long_clause];
        for t in &terms {
            let bin = Formula::clause(vec![not(s.clone()), t.clone()]).expect("literals only");
            clauses.push(bin);
        }
        let encoding = Formula::cnf(clauses).expect("clauses only");
        (s, and_cnf(encoding, side))
    }

    fn transform_negation(&mut self, inner: &Formula) -> (Formula, Formula) {
        let (t, psi) = self.transform(inner);
        let s = Self::fresh(AUX_NEG_PREFIX, &mut self.next_neg);
        log::debug!("allocated {s} for negation");

        let c1 = Formula::clause(vec![not(s.clone()), not(t.clone())]).expect("literals only");
        let c2 = Formula::clause(vec![s.clone(), t]).expect("literals only");
        let encoding = Formula::cnf(vec![c1, c2]).expect("clauses only");
        (s, and_cnf(encoding, psi))
    }

    fn transform_eq_var(
        &mut self,
        lhs: &crate::intvar::IntVariable,
        rhs: &crate::intvar::IntVariable,
    ) -> (Formula, Formula) {
        let low = lhs.min().max(rhs.min());
        let high = lhs.max().min(rhs.max());
        if low > high {
            // Disjoint domains: identically false. A unit clause on a fresh
            // literal forced false (the empty disjunction) expresses this
            // without a distinguished "false" constant in the algebra.
            let empty = Formula::Disjunction(vec![]);
            return self.transform(&empty);
        }
        let mut disjuncts = Vec::new();
        for c in low..=high {
            disjuncts.push(crate::formula::and(lhs.eq_const(c), rhs.eq_const(c)));
        }
        let reduced = disjuncts
            .into_iter()
            .reduce(crate::formula::or)
            .expect("low <= high guarantees at least one disjunct");
        self.transform(&reduced)
    }
}
